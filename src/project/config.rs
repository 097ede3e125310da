//! sweepy.toml configuration file parsing and validation
//!
//! Handles loading, parsing, and validating project configuration from `sweepy.toml`.
//! All fields have sensible defaults, so an empty or missing config file works.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default file-name globs removed by `sweepy clean`: compiled bytecode,
/// editor backups, and database dump artifacts.
pub const DEFAULT_CLEAN_PATTERNS: &[&str] = &["*.py[cod]", "*~", "*.rdb"];

/// Directories never descended into during cleanup.
pub const DEFAULT_SKIP_DIRS: &[&str] = &[".git", ".hg", ".svn"];

/// Default pattern set as owned strings, for callers outside a project.
pub fn default_patterns() -> Vec<String> {
    DEFAULT_CLEAN_PATTERNS.iter().map(|p| p.to_string()).collect()
}

/// Default skip set as owned strings, for callers outside a project.
pub fn default_skip_dirs() -> Vec<String> {
    DEFAULT_SKIP_DIRS.iter().map(|d| d.to_string()).collect()
}

/// Project configuration loaded from sweepy.toml
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Project-level settings
    pub project: ProjectSection,
    /// Cleanup settings (for `sweepy clean`)
    pub clean: CleanSection,
    /// Test delegation settings (for `sweepy test`)
    pub test: TestSection,
    /// Dependency installation settings (for `sweepy installdeps`)
    pub deps: DepsSection,
}

/// Project-level settings (committed to version control)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ProjectSection {
    /// Project name (for display purposes)
    pub name: Option<String>,
    /// Project description
    pub description: Option<String>,
}

/// Cleanup settings for `sweepy clean`
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CleanSection {
    /// File-name globs to remove; replaces the default set when present
    pub patterns: Vec<String>,
    /// Directory names the traversal never enters
    pub skip: Vec<String>,
}

impl Default for CleanSection {
    fn default() -> Self {
        Self {
            patterns: DEFAULT_CLEAN_PATTERNS
                .iter()
                .map(|p| p.to_string())
                .collect(),
            skip: DEFAULT_SKIP_DIRS.iter().map(|d| d.to_string()).collect(),
        }
    }
}

/// Test delegation settings for `sweepy test`
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TestSection {
    /// Test runner script, relative to the project root
    pub runner: PathBuf,
    /// Timeout in seconds for the whole test run (no timeout when absent)
    pub timeout_secs: Option<u64>,
}

impl Default for TestSection {
    fn default() -> Self {
        Self {
            runner: PathBuf::from("runtests.py"),
            timeout_secs: None,
        }
    }
}

/// Dependency installation settings for `sweepy installdeps`
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DepsSection {
    /// Dependency manifest, relative to the project root
    pub requirements: PathBuf,
    /// Run the installer through sudo on Unix (skipped when already root)
    pub elevate: bool,
}

impl Default for DepsSection {
    fn default() -> Self {
        Self {
            requirements: PathBuf::from("requirements.txt"),
            elevate: true,
        }
    }
}

/// Load configuration from sweepy.toml in the project root.
///
/// Returns `None` if the config file doesn't exist.
/// Returns an error if the file exists but is invalid TOML.
pub fn load_config(project_root: &Path) -> Result<Option<Config>> {
    let config_path = project_root.join("sweepy.toml");

    if !config_path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(&config_path).map_err(|e| {
        Error::Config(format!(
            "Failed to read {}: {}",
            config_path.display(),
            e
        ))
    })?;

    let config: Config = toml::from_str(&content).map_err(|e| {
        Error::Config(format!(
            "Failed to parse {}: {}",
            config_path.display(),
            e
        ))
    })?;

    validate_config(&config, &config_path)?;

    Ok(Some(config))
}

/// Reject configurations that cannot work before any command acts on them.
fn validate_config(config: &Config, config_path: &Path) -> Result<()> {
    if config.clean.patterns.is_empty() {
        return Err(Error::Config(format!(
            "{}: [clean] patterns must not be empty (remove the key to use defaults)",
            config_path.display()
        )));
    }

    for pattern in &config.clean.patterns {
        if pattern.contains('/') || pattern.contains('\\') {
            return Err(Error::Config(format!(
                "{}: clean pattern '{}' must be a file-name glob without path separators",
                config_path.display(),
                pattern
            )));
        }
    }

    if config.test.runner.as_os_str().is_empty() {
        return Err(Error::Config(format!(
            "{}: [test] runner must not be empty",
            config_path.display()
        )));
    }

    if config.deps.requirements.as_os_str().is_empty() {
        return Err(Error::Config(format!(
            "{}: [deps] requirements must not be empty",
            config_path.display()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_is_none() {
        let temp = TempDir::new().unwrap();
        let config = load_config(temp.path()).unwrap();
        assert!(config.is_none());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("sweepy.toml"), "").unwrap();

        let config = load_config(temp.path()).unwrap().unwrap();
        assert_eq!(config.clean.patterns, vec!["*.py[cod]", "*~", "*.rdb"]);
        assert_eq!(config.test.runner, PathBuf::from("runtests.py"));
        assert_eq!(config.deps.requirements, PathBuf::from("requirements.txt"));
        assert!(config.deps.elevate);
    }

    #[test]
    fn test_partial_config() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("sweepy.toml"),
            r#"
[clean]
patterns = ["*.tmp"]

[deps]
elevate = false
"#,
        )
        .unwrap();

        let config = load_config(temp.path()).unwrap().unwrap();
        assert_eq!(config.clean.patterns, vec!["*.tmp"]);
        // Untouched sections keep their defaults
        assert_eq!(config.test.runner, PathBuf::from("runtests.py"));
        assert!(!config.deps.elevate);
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("sweepy.toml"), "this is not toml {{{").unwrap();

        let result = load_config(temp.path());
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("sweepy.toml"));
    }

    #[test]
    fn test_empty_patterns_rejected() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("sweepy.toml"), "[clean]\npatterns = []\n").unwrap();

        let result = load_config(temp.path());
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("must not be empty"));
    }

    #[test]
    fn test_pattern_with_path_separator_rejected() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("sweepy.toml"),
            "[clean]\npatterns = [\"build/*.pyc\"]\n",
        )
        .unwrap();

        let result = load_config(temp.path());
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("path separators"));
    }

    #[test]
    fn test_project_section_parsed() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("sweepy.toml"),
            "[project]\nname = \"djcache\"\n",
        )
        .unwrap();

        let config = load_config(temp.path()).unwrap().unwrap();
        assert_eq!(config.project.name.as_deref(), Some("djcache"));
    }
}
