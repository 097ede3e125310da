//! Output types for CLI commands
//!
//! These types ensure consistent output across all commands in JSON format.
//! Each command constructs its output struct and uses the trait methods for
//! serialization.

use serde::Serialize;
use std::path::PathBuf;

/// Trait for command outputs that can be serialized to JSON
pub trait CommandOutput: Serialize {
    /// Get the command name
    fn command_name(&self) -> &'static str;

    /// Serialize to pretty-printed JSON string
    fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

// =============================================================================
// CleanOutput
// =============================================================================

/// Output for `sweepy clean`
#[derive(Debug, Serialize)]
pub struct CleanOutput {
    /// "success" or "dry-run"
    pub status: String,
    /// Number of files removed (or that would be removed)
    pub removed_count: usize,
    /// Total bytes reclaimed
    pub bytes_reclaimed: u64,
    /// Whether this was a dry run
    pub dry_run: bool,
    /// Root directory that was cleaned
    pub root: PathBuf,
    /// Patterns the pass matched against
    pub patterns: Vec<String>,
    /// Removed files, sorted
    pub removed: Vec<PathBuf>,
}

impl CommandOutput for CleanOutput {
    fn command_name(&self) -> &'static str {
        "clean"
    }
}

// =============================================================================
// InitOutput
// =============================================================================

/// Output for `sweepy init`
#[derive(Debug, Serialize)]
pub struct InitOutput {
    /// "success" or "error"
    pub status: String,
    /// Directory that was initialized
    pub path: PathBuf,
    /// Files created
    pub created: Vec<String>,
}

impl CommandOutput for InitOutput {
    fn command_name(&self) -> &'static str {
        "init"
    }
}

// =============================================================================
// DoctorOutput
// =============================================================================

/// A single diagnostic check result for `sweepy doctor`
#[derive(Debug, Serialize)]
pub struct DoctorCheck {
    pub name: String,
    /// "pass", "warn", or "fail"
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// Output for `sweepy doctor`
#[derive(Debug, Serialize)]
pub struct DoctorOutput {
    /// True when no check failed
    pub ready: bool,
    pub passed: usize,
    pub warnings: usize,
    pub failed: usize,
    pub checks: Vec<DoctorCheck>,
}

impl CommandOutput for DoctorOutput {
    fn command_name(&self) -> &'static str {
        "doctor"
    }
}
