pub mod config;
pub mod root;
pub mod structure;
pub mod user_config;

// Re-export main types
pub use config::Config;

use crate::error::Result;
use std::path::{Path, PathBuf};

/// Represents a sweepy project with its root directory and configuration.
#[derive(Debug)]
pub struct Project {
    /// Path to the project root directory
    pub root: PathBuf,
    /// Configuration loaded from sweepy.toml (None if no config file)
    pub config: Option<Config>,
}

impl Project {
    /// Find project root by walking up from the current working directory.
    ///
    /// Looks for project markers in this order:
    /// 1. `sweepy.toml` - explicit project configuration
    /// 2. `requirements.txt` - dependency manifest
    /// 3. `runtests.py` - test runner script
    ///
    /// Returns `None` if no project is found.
    pub fn find() -> Result<Option<Project>> {
        match root::find_project_root_from_cwd()? {
            Some(root_info) => {
                let config = config::load_config(&root_info.path)?;
                Ok(Some(Project {
                    root: root_info.path,
                    config,
                }))
            }
            None => Ok(None),
        }
    }

    /// Find project root starting from a specific directory.
    pub fn find_from(start_dir: &Path) -> Result<Option<Project>> {
        match root::find_project_root(start_dir)? {
            Some(root_info) => {
                let config = config::load_config(&root_info.path)?;
                Ok(Some(Project {
                    root: root_info.path,
                    config,
                }))
            }
            None => Ok(None),
        }
    }

    /// Get the project root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Clean patterns from config, or the default set.
    pub fn clean_patterns(&self) -> Vec<String> {
        self.config
            .as_ref()
            .map(|c| c.clean.patterns.clone())
            .unwrap_or_else(config::default_patterns)
    }

    /// Directory names the cleanup traversal skips, from config or defaults.
    pub fn skip_dirs(&self) -> Vec<String> {
        self.config
            .as_ref()
            .map(|c| c.clean.skip.clone())
            .unwrap_or_else(config::default_skip_dirs)
    }

    /// Absolute path to the test runner script.
    pub fn runner_path(&self) -> PathBuf {
        let runner = self
            .config
            .as_ref()
            .map(|c| c.test.runner.clone())
            .unwrap_or_else(|| PathBuf::from("runtests.py"));
        self.root.join(runner)
    }

    /// Absolute path to the dependency manifest.
    pub fn requirements_path(&self) -> PathBuf {
        let requirements = self
            .config
            .as_ref()
            .map(|c| c.deps.requirements.clone())
            .unwrap_or_else(|| PathBuf::from("requirements.txt"));
        self.root.join(requirements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_from_loads_config() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("sweepy.toml"),
            "[clean]\npatterns = [\"*.tmp\"]\n",
        )
        .unwrap();

        let project = Project::find_from(temp.path()).unwrap().unwrap();
        assert!(project.config.is_some());
        assert_eq!(project.clean_patterns(), vec!["*.tmp"]);
    }

    #[test]
    fn test_defaults_without_config() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("requirements.txt"), "redis\n").unwrap();

        let project = Project::find_from(temp.path()).unwrap().unwrap();
        assert!(project.config.is_none());
        assert_eq!(project.clean_patterns(), vec!["*.py[cod]", "*~", "*.rdb"]);
        assert!(project.runner_path().ends_with("runtests.py"));
        assert!(project.requirements_path().ends_with("requirements.txt"));
    }

    #[test]
    fn test_configured_paths_join_root() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("sweepy.toml"),
            "[test]\nrunner = \"scripts/run_suite.py\"\n[deps]\nrequirements = \"reqs/base.txt\"\n",
        )
        .unwrap();

        let project = Project::find_from(temp.path()).unwrap().unwrap();
        assert!(project.runner_path().ends_with("scripts/run_suite.py"));
        assert!(project.requirements_path().ends_with("reqs/base.txt"));
    }
}
