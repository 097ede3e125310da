//! User-level configuration (~/.config/sweepy/config.toml)
//!
//! Machine-specific settings that should NOT be committed to version control.
//! This includes interpreter paths that vary between machines.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// User configuration loaded from ~/.config/sweepy/config.toml
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct UserConfig {
    /// Python interpreter path (machine-specific)
    pub python_binary: Option<String>,
    /// pip installer path (machine-specific)
    pub pip_binary: Option<String>,
}

/// Get the user config directory path.
///
/// Returns `~/.config/sweepy/` on Unix and `%APPDATA%\sweepy\` on Windows.
pub fn get_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("sweepy"))
}

/// Get the user config file path.
///
/// Returns `~/.config/sweepy/config.toml` on Unix.
pub fn get_config_path() -> Option<PathBuf> {
    get_config_dir().map(|p| p.join("config.toml"))
}

/// Load user configuration from ~/.config/sweepy/config.toml
///
/// Returns `None` if the config file doesn't exist.
/// Returns an error if the file exists but is invalid TOML.
pub fn load_user_config() -> Result<Option<UserConfig>> {
    let config_path = match get_config_path() {
        Some(path) => path,
        None => return Ok(None),
    };

    if !config_path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(&config_path).map_err(|e| {
        Error::Config(format!(
            "Failed to read user config at {}: {}",
            config_path.display(),
            e
        ))
    })?;

    let config: UserConfig = toml::from_str(&content).map_err(|e| {
        Error::Config(format!(
            "Failed to parse user config at {}: {}",
            config_path.display(),
            e
        ))
    })?;

    // Validate configured binaries if specified
    for (field, binary) in [
        ("python_binary", &config.python_binary),
        ("pip_binary", &config.pip_binary),
    ] {
        if let Some(binary) = binary {
            if !Path::new(binary).exists() {
                return Err(Error::Config(format!(
                    "{} specified in {} not found: {}\n\
                     Hint: Update the path or remove it to use auto-detection",
                    field,
                    config_path.display(),
                    binary
                )));
            }
        }
    }

    Ok(Some(config))
}

/// Save user configuration to ~/.config/sweepy/config.toml
///
/// Creates the config directory if it doesn't exist.
pub fn save_user_config(config: &UserConfig) -> Result<()> {
    let config_dir = get_config_dir()
        .ok_or_else(|| Error::Config("Unable to determine user config directory".to_string()))?;

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir).map_err(|e| {
            Error::Config(format!(
                "Failed to create config directory {}: {}",
                config_dir.display(),
                e
            ))
        })?;
    }

    let config_path = config_dir.join("config.toml");
    let content = generate_user_config_content(config);

    std::fs::write(&config_path, content).map_err(|e| {
        Error::Config(format!(
            "Failed to write user config at {}: {}",
            config_path.display(),
            e
        ))
    })?;

    Ok(())
}

/// Generate user config file content with comments
fn generate_user_config_content(config: &UserConfig) -> String {
    let mut content = String::from(
        "# sweepy user configuration (machine-specific, not committed to version control)\n\n",
    );

    if let Some(ref binary) = config.python_binary {
        content.push_str(&format!("python_binary = \"{}\"\n", binary));
    } else {
        content.push_str("# python_binary = \"/usr/bin/python3\"\n");
    }

    if let Some(ref binary) = config.pip_binary {
        content.push_str(&format!("pip_binary = \"{}\"\n", binary));
    } else {
        content.push_str("# pip_binary = \"/usr/bin/pip3\"\n");
    }

    content
}
