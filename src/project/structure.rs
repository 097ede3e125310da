//! Project structure creation for `sweepy init`
//!
//! Creates a minimal sweepy project:
//! - sweepy.toml (configuration with commented defaults)
//! - .gitignore (ignore the artifacts `sweepy clean` removes)

use crate::error::{Error, Result};
use std::path::Path;

/// Create minimal project structure (sweepy.toml + .gitignore only).
///
/// # Arguments
/// * `root` - Path to the project root directory
/// * `force` - If true, overwrite existing files
///
/// # Returns
/// A list of created files for reporting
pub fn create_project_structure(root: &Path, force: bool) -> Result<Vec<String>> {
    let mut created = Vec::new();

    // Ensure root directory exists
    if !root.exists() {
        std::fs::create_dir_all(root).map_err(|e| {
            Error::Config(format!(
                "Failed to create project directory {}: {}",
                root.display(),
                e
            ))
        })?;
        created.push(root.display().to_string());
    }

    // Create sweepy.toml
    let config_path = root.join("sweepy.toml");
    if !config_path.exists() || force {
        std::fs::write(&config_path, generate_config_template()).map_err(|e| {
            Error::Config(format!(
                "Failed to create sweepy.toml at {}: {}",
                config_path.display(),
                e
            ))
        })?;
        created.push("sweepy.toml".to_string());
    }

    // Create .gitignore
    let gitignore_path = root.join(".gitignore");
    if !gitignore_path.exists() || force {
        std::fs::write(&gitignore_path, generate_gitignore()).map_err(|e| {
            Error::Config(format!(
                "Failed to create .gitignore at {}: {}",
                gitignore_path.display(),
                e
            ))
        })?;
        created.push(".gitignore".to_string());
    }

    Ok(created)
}

/// Check whether any project marker already exists in a directory.
pub fn has_project_markers(root: &Path) -> bool {
    root.join("sweepy.toml").exists()
}

/// Generate sweepy.toml template with commented defaults.
fn generate_config_template() -> &'static str {
    r#"# sweepy project configuration

[project]
# name = "my-project"
# description = "What this project does"

[clean]
# File-name globs removed by `sweepy clean`
# patterns = ["*.py[cod]", "*~", "*.rdb"]
# Directory names the cleanup never enters
# skip = [".git", ".hg", ".svn"]

[test]
# Test runner script, relative to the project root
# runner = "runtests.py"
# timeout_secs = 600

[deps]
# requirements = "requirements.txt"
# elevate = true

# Note: interpreter paths are NOT set here (they're machine-specific).
# Configure them in ~/.config/sweepy/config.toml or use $SWEEPY_PYTHON
# and $SWEEPY_PIP env vars.
"#
}

/// Generate .gitignore covering the artifacts `sweepy clean` removes.
fn generate_gitignore() -> &'static str {
    r#"# Compiled bytecode
*.py[cod]

# Editor backups
*~

# Database dumps
*.rdb
"#
}
