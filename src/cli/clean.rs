//! CLI implementation for `sweepy clean`
//!
//! Recursively removes build artifacts from the project tree: compiled
//! bytecode (`*.py[cod]`), editor backups (`*~`), and database dumps
//! (`*.rdb`) by default.

use crate::clean::{clean_tree, CleanOptions};
use crate::cli::output_format::OutputFormat;
use crate::cli::output_types::{CleanOutput, CommandOutput};
use crate::error::Result;
use crate::project::Project;
use crate::utils::output::{format_bytes, print_warning};
use clap::Args;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Args)]
#[command(after_help = "\
Examples:
  sweepy clean                            Remove artifacts under the project root
  sweepy clean --dry-run                  List what would be removed
  sweepy clean -p '*.log'                 Also remove log files this once
  sweepy clean --format json              Machine-readable output")]
pub struct CleanArgs {
    /// List matching files without deleting them
    #[arg(long)]
    pub dry_run: bool,

    /// Additional file-name glob for this invocation (can be repeated)
    #[arg(long, short = 'p', value_name = "GLOB", action = clap::ArgAction::Append)]
    pub pattern: Vec<String>,

    /// Skip the confirmation prompt on interactive terminals
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Output format: human (default) or json
    #[arg(long, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

pub fn execute(args: &CleanArgs) -> Result<()> {
    let format = args.format;

    // Find project (optional for clean; fall back to cwd)
    let project = Project::find()?;
    if project.is_none() && !args.quiet && format == OutputFormat::Human {
        print_warning("No project markers found; cleaning from the current directory.");
    }
    let root = project
        .as_ref()
        .map(|p| p.root.clone())
        .unwrap_or(std::env::current_dir()?);

    let mut patterns = project
        .as_ref()
        .map(|p| p.clean_patterns())
        .unwrap_or_else(crate::project::config::default_patterns);
    patterns.extend(args.pattern.iter().cloned());

    let skip_dirs = project
        .as_ref()
        .map(|p| p.skip_dirs())
        .unwrap_or_else(crate::project::config::default_skip_dirs);

    // Scan first so the prompt and dry-run listing can show what's at stake
    let spinner = start_spinner(args, format);
    let scan = clean_tree(
        &root,
        &CleanOptions::new(&patterns, &skip_dirs)?.dry_run(true),
    )?;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    if args.dry_run {
        return output_result(args, format, &root, &patterns, &scan, true);
    }

    if scan.removed_count() == 0 {
        return output_result(args, format, &root, &patterns, &scan, false);
    }

    if should_prompt(args, format) && !confirm_removal(scan.removed_count()) {
        if !args.quiet {
            println!("Aborted, nothing removed.");
        }
        return Ok(());
    }

    let report = clean_tree(&root, &CleanOptions::new(&patterns, &skip_dirs)?)?;
    output_result(args, format, &root, &patterns, &report, false)
}

/// Prompt only where a human is watching: interactive terminal, human
/// output, and no `--yes`. Piped and scripted runs delete directly.
fn should_prompt(args: &CleanArgs, format: OutputFormat) -> bool {
    !args.yes
        && !args.quiet
        && format == OutputFormat::Human
        && std::io::stdin().is_terminal()
        && std::io::stdout().is_terminal()
}

fn confirm_removal(count: usize) -> bool {
    dialoguer::Confirm::new()
        .with_prompt(format!(
            "Remove {} {}?",
            count,
            if count == 1 { "file" } else { "files" }
        ))
        .default(true)
        .interact()
        .unwrap_or(false)
}

fn start_spinner(args: &CleanArgs, format: OutputFormat) -> Option<indicatif::ProgressBar> {
    if args.quiet || format.is_machine_readable() || !std::io::stderr().is_terminal() {
        return None;
    }

    let spinner = indicatif::ProgressBar::new_spinner();
    spinner.set_message("Scanning for artifacts...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    Some(spinner)
}

fn output_result(
    args: &CleanArgs,
    format: OutputFormat,
    root: &std::path::Path,
    patterns: &[String],
    report: &crate::clean::CleanReport,
    dry_run: bool,
) -> Result<()> {
    let status = if dry_run { "dry-run" } else { "success" };
    let output = CleanOutput {
        status: status.to_string(),
        removed_count: report.removed_count(),
        bytes_reclaimed: report.bytes_reclaimed,
        dry_run,
        root: PathBuf::from(root),
        patterns: patterns.to_vec(),
        removed: report.removed.clone(),
    };

    match format {
        OutputFormat::Json => println!("{}", output.to_json()),
        OutputFormat::Human => {
            if args.quiet {
                return Ok(());
            }
            if dry_run {
                if report.removed.is_empty() {
                    println!("Nothing to remove.");
                } else {
                    for path in &report.removed {
                        println!("Would remove: {}", path.display());
                    }
                    println!();
                    println!(
                        "{} {} ({})",
                        report.removed_count(),
                        if report.removed_count() == 1 {
                            "file"
                        } else {
                            "files"
                        },
                        format_bytes(report.bytes_reclaimed)
                    );
                }
            } else if report.removed.is_empty() {
                println!("Nothing to remove.");
            } else {
                println!(
                    "Removed {} {} ({} reclaimed).",
                    report.removed_count(),
                    if report.removed_count() == 1 {
                        "file"
                    } else {
                        "files"
                    },
                    format_bytes(report.bytes_reclaimed)
                );
            }
        }
    }

    Ok(())
}
