//! Project root detection
//!
//! Walks up the directory tree looking for project markers:
//! 1. `sweepy.toml` (explicit config - highest precedence)
//! 2. `requirements.txt` (dependency manifest)
//! 3. `runtests.py` (test runner script)

use crate::error::Result;
use std::path::{Path, PathBuf};

/// Markers that indicate a project root, in precedence order.
/// The first marker found determines the project root.
const PROJECT_MARKERS: &[&str] = &["sweepy.toml", "requirements.txt", "runtests.py"];

/// Information about a detected project root
#[derive(Debug, Clone)]
pub struct ProjectRoot {
    /// The path to the project root directory
    pub path: PathBuf,
    /// The marker that was found
    pub marker: String,
}

/// Find project root by walking up from the given directory.
///
/// Checks each directory for project markers in precedence order:
/// 1. `sweepy.toml` - explicit project configuration
/// 2. `requirements.txt` - dependency manifest
/// 3. `runtests.py` - test runner script
///
/// Returns the first directory containing any marker, or None if no project found.
pub fn find_project_root(start_dir: &Path) -> Result<Option<ProjectRoot>> {
    // Canonicalize the start directory to resolve symlinks and get absolute path
    let mut current = start_dir
        .canonicalize()
        .unwrap_or_else(|_| start_dir.to_path_buf());

    loop {
        if let Some(marker) = find_marker_in_dir(&current) {
            return Ok(Some(ProjectRoot {
                path: current,
                marker: marker.to_string(),
            }));
        }

        match current.parent() {
            Some(parent) => {
                if parent == current {
                    break;
                }
                current = parent.to_path_buf();
            }
            None => break,
        }
    }

    Ok(None)
}

/// Find project root starting from the current working directory.
pub fn find_project_root_from_cwd() -> Result<Option<ProjectRoot>> {
    let cwd = std::env::current_dir()?;
    find_project_root(&cwd)
}

/// Check if a directory contains any project marker.
/// Returns the first marker found (in precedence order), or None.
fn find_marker_in_dir(dir: &Path) -> Option<&'static str> {
    for marker in PROJECT_MARKERS {
        let marker_path = dir.join(marker);
        if marker_path.exists() {
            return Some(marker);
        }
    }
    None
}

/// Check if a directory is a project root (has any marker).
pub fn is_project_root(dir: &Path) -> bool {
    find_marker_in_dir(dir).is_some()
}
