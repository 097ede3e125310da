#![allow(dead_code)] // Modules are shared with the library target

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{Parser, Subcommand};
use std::process;

mod clean;
mod cli;
mod error;
mod executor;
mod project;
mod utils;

#[derive(Parser)]
#[command(name = "sweepy")]
#[command(version)]
#[command(before_help = concat!("\u{25b8} sweepy ", env!("CARGO_PKG_VERSION")))]
#[command(about = "Python project housekeeping with honest exit codes")]
#[command(
    long_about = "sweepy replaces the housekeeping Makefile of a Python project: it removes \
build artifacts, runs the test suite (always on a clean tree), and installs dependencies, \
propagating each delegated tool's exit code."
)]
#[command(after_help = "\
Getting started:
  sweepy init                    Create sweepy.toml in current directory
  sweepy clean                   Remove bytecode, backups, and dump files
  sweepy test                    Clean, then run python runtests.py
  sweepy doctor                  Check system configuration")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    // === Housekeeping (1-9) ===
    /// Remove build artifacts (bytecode, editor backups, database dumps)
    #[command(display_order = 1)]
    Clean(cli::clean::CleanArgs),
    /// Clean, then run the project's test suite
    #[command(display_order = 2)]
    Test(cli::test::TestArgs),
    /// Install dependencies from the requirements manifest
    #[command(display_order = 3)]
    Installdeps(cli::installdeps::InstallDepsArgs),

    // === Project (10-19) ===
    /// Initialize a new sweepy project
    #[command(display_order = 10)]
    Init(cli::init::InitArgs),

    // === Info (20-29) ===
    /// Run diagnostics and check system configuration
    #[command(display_order = 20)]
    Doctor(cli::doctor::DoctorArgs),
}

/// Handle clap parse errors with custom suggestions for common mistakes
fn handle_parse_error(mut err: clap::Error) -> ! {
    if err.kind() == ErrorKind::InvalidSubcommand {
        if let Some(ContextValue::String(cmd)) = err.get(ContextKind::InvalidSubcommand) {
            let suggestions = match cmd.as_str() {
                // make-style and pip-style spellings
                "install" | "install-deps" | "deps" => Some(vec![
                    "use 'sweepy installdeps' to install dependencies".into(),
                ]),
                "purge" | "clear" | "sweep" => Some(vec![
                    "use 'sweepy clean' to remove build artifacts".into(),
                ]),
                "check" => Some(vec![
                    "use 'sweepy doctor' to check system configuration: sweepy doctor".into(),
                    "use 'sweepy test' to run the test suite: sweepy test".into(),
                ]),
                _ => None,
            };
            if let Some(suggestions) = suggestions {
                err.insert(
                    ContextKind::Suggested,
                    ContextValue::StyledStrs(suggestions),
                );
            }
        }
    }
    err.exit()
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => handle_parse_error(e),
    };

    let result = match &cli.command {
        Commands::Clean(args) => cli::clean::execute(args),
        Commands::Test(args) => cli::test::execute(args),
        Commands::Installdeps(args) => cli::installdeps::execute(args),
        Commands::Init(args) => cli::init::execute(args),
        Commands::Doctor(args) => cli::doctor::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
