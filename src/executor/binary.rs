/// Interpreter detection with precedence chain
///
/// # Precedence Order
///
/// 1. CLI flag `--python` / `--pip` (highest priority)
/// 2. Environment variable `$SWEEPY_PYTHON` / `$SWEEPY_PIP` (machine-specific)
/// 3. User config `~/.config/sweepy/config.toml` (python_binary / pip_binary)
/// 4. PATH search (lowest priority)
///
/// Note: interpreter paths are NOT in project config (sweepy.toml) because
/// they're machine-specific and shouldn't be committed to version control.
///
/// # PATH Search Strategy
///
/// Python is searched in preference order `python3`, `python`; pip as
/// `pip3`, `pip`. The versioned name wins so systems where `python` is
/// still Python 2 resolve to the right interpreter.
use crate::error::{Error, Result};
use std::env;
use std::path::Path;
use std::process::Command;

/// Python interpreter preference order for PATH search
const PYTHON_NAMES: &[&str] = &["python3", "python"];

/// pip installer preference order for PATH search
const PIP_NAMES: &[&str] = &["pip3", "pip"];

/// Detect the Python interpreter using the precedence chain.
///
/// # Arguments
///
/// * `cli_python` - Optional binary from the CLI `--python` flag
///
/// # Errors
///
/// Returns error if no Python interpreter is found in any location
pub fn detect_python(cli_python: Option<&str>) -> Result<String> {
    detect_tool(
        cli_python,
        "--python",
        "SWEEPY_PYTHON",
        |config| config.python_binary,
        PYTHON_NAMES,
        "Python interpreter",
    )
}

/// Detect the pip installer using the precedence chain.
pub fn detect_pip(cli_pip: Option<&str>) -> Result<String> {
    detect_tool(
        cli_pip,
        "--pip",
        "SWEEPY_PIP",
        |config| config.pip_binary,
        PIP_NAMES,
        "pip installer",
    )
}

/// Shared precedence chain: CLI flag, env var, user config, PATH search.
fn detect_tool(
    cli_value: Option<&str>,
    cli_flag: &str,
    env_var: &str,
    from_user_config: fn(crate::project::user_config::UserConfig) -> Option<String>,
    path_names: &[&str],
    label: &str,
) -> Result<String> {
    // 1. CLI flag (highest priority)
    if let Some(binary) = cli_value {
        if verify_binary(binary)? {
            return Ok(binary.to_string());
        } else {
            return Err(Error::Execution(format!(
                "{} specified via {} not found or not executable: {}",
                label, cli_flag, binary
            )));
        }
    }

    // 2. Environment variable
    if let Ok(binary) = env::var(env_var) {
        if verify_binary(&binary)? {
            return Ok(binary);
        } else {
            return Err(Error::Execution(format!(
                "{} from ${} not found or not executable: {}",
                label, env_var, binary
            )));
        }
    }

    // 3. User config (~/.config/sweepy/config.toml)
    if let Some(binary) = crate::project::user_config::load_user_config()?.and_then(from_user_config)
    {
        if verify_binary(&binary)? {
            return Ok(binary);
        } else {
            return Err(Error::Execution(format!(
                "{} from ~/.config/sweepy/config.toml not found or not executable: {}",
                label, binary
            )));
        }
    }

    // 4. PATH search
    for name in path_names {
        if let Some(path) = find_in_path(name) {
            return Ok(path);
        }
    }

    Err(Error::Execution(format!(
        "{} not found. Tried:\n\
         - ${} env var\n\
         - ~/.config/sweepy/config.toml\n\
         - PATH search for: {}\n\n\
         Fix: install it, set ${}, or use the {} flag",
        label,
        env_var,
        path_names.join(", "),
        env_var,
        cli_flag
    )))
}

/// Find binary in PATH
fn find_in_path(binary_name: &str) -> Option<String> {
    // Use `which` command on Unix, `where` on Windows
    #[cfg(not(target_os = "windows"))]
    let which_cmd = "which";
    #[cfg(target_os = "windows")]
    let which_cmd = "where";

    if let Ok(output) = Command::new(which_cmd).arg(binary_name).output() {
        if output.status.success() {
            if let Ok(path) = String::from_utf8(output.stdout) {
                let path = path.lines().next().unwrap_or("").trim();
                if !path.is_empty() && Path::new(path).is_file() {
                    return Some(path.to_string());
                }
            }
        }
    }

    None
}

/// Verify that a binary exists and is executable
fn verify_binary(binary: &str) -> Result<bool> {
    let path = Path::new(binary);

    if !path.exists() {
        return Ok(false);
    }

    if !path.is_file() {
        return Ok(false);
    }

    Ok(is_executable(binary))
}

/// Check if a file is executable
#[cfg(unix)]
fn is_executable(path: &str) -> bool {
    use std::os::unix::fs::PermissionsExt;
    if let Ok(metadata) = std::fs::metadata(path) {
        let permissions = metadata.permissions();
        // Check if executable bit is set (0o111 = --x--x--x)
        permissions.mode() & 0o111 != 0
    } else {
        false
    }
}

#[cfg(not(unix))]
fn is_executable(_path: &str) -> bool {
    // On Windows, all .exe files are executable
    // For now, just return true if file exists
    true
}
