//! CLI implementation for `sweepy installdeps`
//!
//! Delegates to pip against the project's dependency manifest:
//! `pip install -r requirements.txt`. Elevates through sudo by default on
//! Unix (the historical behavior of the Makefile target this replaces),
//! skipped when already root or on Windows.

use crate::error::{Error, Result};
use crate::executor::{detect_pip, is_root, run_command, RunOptions};
use crate::project::Project;
use crate::utils::output::print_success;
use clap::Args;
use std::path::PathBuf;
use std::process;

#[derive(Args)]
#[command(after_help = "\
Examples:
  sweepy installdeps                      Install from requirements.txt (sudo on Unix)
  sweepy installdeps --no-elevate         Install as the current user
  sweepy installdeps --pip /usr/bin/pip3  Use a specific installer")]
pub struct InstallDepsArgs {
    /// Dependency manifest (default: requirements.txt, or [deps] requirements in sweepy.toml)
    #[arg(long, value_name = "PATH")]
    pub requirements: Option<PathBuf>,

    /// pip installer to use (overrides $SWEEPY_PIP and user config)
    #[arg(long, value_name = "PATH")]
    pub pip: Option<String>,

    /// Run the installer as the current user, without sudo
    #[arg(long)]
    pub no_elevate: bool,

    /// Suppress sweepy's own output (the installer's output always passes through)
    #[arg(short, long)]
    pub quiet: bool,
}

pub fn execute(args: &InstallDepsArgs) -> Result<()> {
    // Find project (optional; fall back to cwd)
    let project = Project::find()?;
    let root = project
        .as_ref()
        .map(|p| p.root.clone())
        .unwrap_or(std::env::current_dir()?);

    let requirements = match &args.requirements {
        Some(path) if path.is_absolute() => path.clone(),
        Some(path) => root.join(path),
        None => project
            .as_ref()
            .map(|p| p.requirements_path())
            .unwrap_or_else(|| root.join("requirements.txt")),
    };

    if !requirements.exists() {
        return Err(Error::Execution(format!(
            "Dependency manifest not found: {}\n\
             Hint: create it, or point [deps] requirements in sweepy.toml at your manifest",
            requirements.display()
        )));
    }

    let pip = detect_pip(args.pip.as_deref())?;

    let elevate = should_elevate(args, &project);

    if !args.quiet {
        let via = if elevate { " (via sudo)" } else { "" };
        println!(
            "Installing dependencies from {}{}...",
            requirements.display(),
            via
        );
    }

    let install_args = vec![
        "install".to_string(),
        "-r".to_string(),
        requirements.display().to_string(),
    ];

    let options = if elevate {
        let mut sudo_args = vec![pip];
        sudo_args.extend(install_args);
        RunOptions::new("sudo")
            .with_args(sudo_args)
            .with_working_dir(&root)
    } else {
        RunOptions::new(&pip)
            .with_args(install_args)
            .with_working_dir(&root)
    };

    let result = run_command(options)?;

    // The installer's exit code is the contract; pass it through verbatim
    if result.exit_code != 0 {
        process::exit(result.exit_code);
    }

    if !args.quiet {
        print_success("Dependencies installed.");
    }

    Ok(())
}

/// Elevation policy: CLI opt-out wins, then `[deps] elevate` in sweepy.toml
/// (default true); never elevate when already root or off Unix.
fn should_elevate(args: &InstallDepsArgs, project: &Option<Project>) -> bool {
    if args.no_elevate || !cfg!(unix) || is_root() {
        return false;
    }

    project
        .as_ref()
        .and_then(|p| p.config.as_ref())
        .map(|c| c.deps.elevate)
        .unwrap_or(true)
}
