//! Recursive artifact removal
//!
//! Walks the project tree and deletes files whose names match the configured
//! glob patterns (`*.py[cod]`, `*~`, `*.rdb` by default). Matching is against
//! the file name only, like `find -name`. Directories are never removed, the
//! traversal does not follow symlinks, and VCS metadata directories are
//! skipped.

use crate::error::{Error, Result};
use glob::Pattern;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Options controlling a cleanup pass
#[derive(Debug)]
pub struct CleanOptions {
    patterns: Vec<Pattern>,
    skip_dirs: Vec<String>,
    dry_run: bool,
}

impl CleanOptions {
    /// Compile file-name globs into a cleanup pass.
    ///
    /// # Errors
    ///
    /// Returns `Error::Pattern` for globs that fail to compile.
    pub fn new(patterns: &[String], skip_dirs: &[String]) -> Result<Self> {
        Ok(Self {
            patterns: compile_patterns(patterns)?,
            skip_dirs: skip_dirs.to_vec(),
            dry_run: false,
        })
    }

    /// List matches without deleting anything.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    fn matches(&self, file_name: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(file_name))
    }

    fn skips(&self, dir_name: &str) -> bool {
        self.skip_dirs.iter().any(|d| d == dir_name)
    }
}

/// Result of a cleanup pass
#[derive(Debug, Default)]
pub struct CleanReport {
    /// Files removed (or that would be removed under --dry-run)
    pub removed: Vec<PathBuf>,
    /// Total size of removed files in bytes
    pub bytes_reclaimed: u64,
}

impl CleanReport {
    pub fn removed_count(&self) -> usize {
        self.removed.len()
    }
}

/// Compile file-name globs, surfacing the offending pattern on failure.
pub fn compile_patterns(patterns: &[String]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| {
            Pattern::new(p).map_err(|e| Error::Pattern {
                pattern: p.clone(),
                reason: e.msg.to_string(),
            })
        })
        .collect()
}

/// Recursively delete files matching the configured patterns under `root`.
///
/// Only regular files and symlinks are removed; directories whose names
/// happen to match a pattern are left alone. A second pass over the same
/// tree removes nothing (the operation is idempotent).
///
/// # Errors
///
/// Propagates the first traversal or deletion failure; files removed before
/// the failure stay removed, matching `find -delete` behavior.
pub fn clean_tree(root: &Path, options: &CleanOptions) -> Result<CleanReport> {
    let mut report = CleanReport::default();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| {
            // Prune skipped directories from the walk entirely
            if entry.file_type().is_dir() && entry.depth() > 0 {
                let name = entry.file_name().to_string_lossy();
                !options.skips(&name)
            } else {
                true
            }
        });

    for entry in walker {
        let entry = entry.map_err(|e| {
            Error::Execution(format!("Failed to walk {}: {}", root.display(), e))
        })?;

        if entry.file_type().is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if !options.matches(&name) {
            continue;
        }

        let path = entry.path();
        let size = entry.metadata().map(|m| m.len()).unwrap_or(0);

        if !options.dry_run {
            std::fs::remove_file(path).map_err(|e| {
                Error::Execution(format!("Failed to remove {}: {}", path.display(), e))
            })?;
        }

        report.removed.push(path.to_path_buf());
        report.bytes_reclaimed += size;
    }

    // Deterministic listing for output and tests
    report.removed.sort();

    Ok(report)
}
