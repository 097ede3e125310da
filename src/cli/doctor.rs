//! `sweepy doctor` command implementation
//!
//! Runs system diagnostics to check for common issues:
//! - Python interpreter and pip detection
//! - Project detection and configuration
//! - Presence of the dependency manifest and test runner

use crate::cli::output_format::OutputFormat;
use crate::cli::output_types::{CommandOutput, DoctorCheck, DoctorOutput};
use crate::error::Result;
use crate::executor::{detect_pip, detect_python};
use crate::project::Project;
use clap::Args;
use colored::Colorize;

#[derive(Args)]
#[command(after_help = "\
Examples:
  sweepy doctor                           Run system diagnostics
  sweepy doctor --format json             Machine-readable report")]
pub struct DoctorArgs {
    /// Output format: human (default) or json
    #[arg(long, value_enum, default_value = "human")]
    pub format: OutputFormat,
}

/// Result of a diagnostic check
struct DiagnosticResult {
    name: String,
    status: CheckStatus,
    message: String,
    suggestion: Option<String>,
}

#[derive(Clone, Copy)]
enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

impl CheckStatus {
    fn as_str(&self) -> &'static str {
        match self {
            CheckStatus::Pass => "pass",
            CheckStatus::Warn => "warn",
            CheckStatus::Fail => "fail",
        }
    }

    fn icon(&self) -> colored::ColoredString {
        match self {
            CheckStatus::Pass => "PASS".green(),
            CheckStatus::Warn => "WARN".yellow(),
            CheckStatus::Fail => "FAIL".red(),
        }
    }
}

pub fn execute(args: &DoctorArgs) -> Result<()> {
    let checks = run_all_checks();

    let passed = checks
        .iter()
        .filter(|c| matches!(c.status, CheckStatus::Pass))
        .count();
    let warnings = checks
        .iter()
        .filter(|c| matches!(c.status, CheckStatus::Warn))
        .count();
    let failed = checks
        .iter()
        .filter(|c| matches!(c.status, CheckStatus::Fail))
        .count();

    let output = DoctorOutput {
        ready: failed == 0,
        passed,
        warnings,
        failed,
        checks: checks
            .iter()
            .map(|c| DoctorCheck {
                name: c.name.clone(),
                status: c.status.as_str().to_string(),
                message: c.message.clone(),
                suggestion: c.suggestion.clone(),
            })
            .collect(),
    };

    match args.format {
        OutputFormat::Json => println!("{}", output.to_json()),
        OutputFormat::Human => print_human_output(&checks, passed, warnings, failed),
    }

    // Exit with error if any check failed
    if failed > 0 {
        std::process::exit(1);
    }

    Ok(())
}

fn run_all_checks() -> Vec<DiagnosticResult> {
    vec![
        check_python(),
        check_pip(),
        check_project(),
        check_config(),
        check_requirements(),
        check_runner(),
    ]
}

fn check_python() -> DiagnosticResult {
    match detect_python(None) {
        Ok(binary) => DiagnosticResult {
            name: "Python Interpreter".to_string(),
            status: CheckStatus::Pass,
            message: format!("Found: {}", binary),
            suggestion: None,
        },
        Err(_) => DiagnosticResult {
            name: "Python Interpreter".to_string(),
            status: CheckStatus::Fail,
            message: "Python interpreter not found".to_string(),
            suggestion: Some(
                "Install Python, set $SWEEPY_PYTHON, or configure ~/.config/sweepy/config.toml"
                    .to_string(),
            ),
        },
    }
}

fn check_pip() -> DiagnosticResult {
    match detect_pip(None) {
        Ok(binary) => DiagnosticResult {
            name: "pip Installer".to_string(),
            status: CheckStatus::Pass,
            message: format!("Found: {}", binary),
            suggestion: None,
        },
        Err(_) => DiagnosticResult {
            name: "pip Installer".to_string(),
            status: CheckStatus::Fail,
            message: "pip not found".to_string(),
            suggestion: Some(
                "Install pip, set $SWEEPY_PIP, or configure ~/.config/sweepy/config.toml"
                    .to_string(),
            ),
        },
    }
}

fn check_project() -> DiagnosticResult {
    match Project::find() {
        Ok(Some(project)) => DiagnosticResult {
            name: "Project Detection".to_string(),
            status: CheckStatus::Pass,
            message: format!("Project root: {}", project.root.display()),
            suggestion: None,
        },
        Ok(None) => DiagnosticResult {
            name: "Project Detection".to_string(),
            status: CheckStatus::Warn,
            message: "Not in a sweepy project".to_string(),
            suggestion: Some("Run 'sweepy init' to create a project".to_string()),
        },
        Err(e) => DiagnosticResult {
            name: "Project Detection".to_string(),
            status: CheckStatus::Fail,
            message: format!("Error: {}", e),
            suggestion: None,
        },
    }
}

fn check_config() -> DiagnosticResult {
    match Project::find() {
        Ok(Some(project)) => {
            if project.config.is_some() {
                DiagnosticResult {
                    name: "Configuration".to_string(),
                    status: CheckStatus::Pass,
                    message: "sweepy.toml found and valid".to_string(),
                    suggestion: None,
                }
            } else {
                DiagnosticResult {
                    name: "Configuration".to_string(),
                    status: CheckStatus::Pass,
                    message: "No sweepy.toml (using defaults)".to_string(),
                    suggestion: None,
                }
            }
        }
        Ok(None) => DiagnosticResult {
            name: "Configuration".to_string(),
            status: CheckStatus::Warn,
            message: "No project found (configuration not applicable)".to_string(),
            suggestion: None,
        },
        Err(e) => DiagnosticResult {
            name: "Configuration".to_string(),
            status: CheckStatus::Fail,
            message: format!("Error loading config: {}", e),
            suggestion: Some("Check sweepy.toml syntax".to_string()),
        },
    }
}

fn check_requirements() -> DiagnosticResult {
    match Project::find() {
        Ok(Some(project)) => {
            let path = project.requirements_path();
            if path.exists() {
                DiagnosticResult {
                    name: "Dependency Manifest".to_string(),
                    status: CheckStatus::Pass,
                    message: format!("Found: {}", path.display()),
                    suggestion: None,
                }
            } else {
                DiagnosticResult {
                    name: "Dependency Manifest".to_string(),
                    status: CheckStatus::Warn,
                    message: format!("Not found: {}", path.display()),
                    suggestion: Some(
                        "sweepy installdeps needs a requirements file".to_string(),
                    ),
                }
            }
        }
        _ => DiagnosticResult {
            name: "Dependency Manifest".to_string(),
            status: CheckStatus::Warn,
            message: "No project found".to_string(),
            suggestion: None,
        },
    }
}

fn check_runner() -> DiagnosticResult {
    match Project::find() {
        Ok(Some(project)) => {
            let path = project.runner_path();
            if path.exists() {
                DiagnosticResult {
                    name: "Test Runner".to_string(),
                    status: CheckStatus::Pass,
                    message: format!("Found: {}", path.display()),
                    suggestion: None,
                }
            } else {
                DiagnosticResult {
                    name: "Test Runner".to_string(),
                    status: CheckStatus::Warn,
                    message: format!("Not found: {}", path.display()),
                    suggestion: Some("sweepy test needs a runner script".to_string()),
                }
            }
        }
        _ => DiagnosticResult {
            name: "Test Runner".to_string(),
            status: CheckStatus::Warn,
            message: "No project found".to_string(),
            suggestion: None,
        },
    }
}

fn print_human_output(
    checks: &[DiagnosticResult],
    passed: usize,
    warnings: usize,
    failed: usize,
) {
    println!("Diagnostics");
    println!("────────────────────────────────────────");

    for check in checks {
        println!("  {} {} - {}", check.status.icon(), check.name, check.message);
        if let Some(ref suggestion) = check.suggestion {
            println!("         {}", suggestion);
        }
    }

    println!();
    println!("{} passed, {} warnings, {} failed", passed, warnings, failed);
}
