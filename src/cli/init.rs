//! `sweepy init` command implementation
//!
//! Creates a minimal sweepy project:
//! - sweepy.toml (configuration with commented defaults)
//! - .gitignore (ignore the artifacts `sweepy clean` removes)

use crate::cli::output_format::OutputFormat;
use crate::cli::output_types::{CommandOutput, InitOutput};
use crate::error::Result;
use crate::project::structure::{create_project_structure, has_project_markers};
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
#[command(after_help = "\
Examples:
  sweepy init                             Initialize in current directory
  sweepy init myproject                   Create new project directory
  sweepy init --force                     Overwrite an existing sweepy.toml")]
pub struct InitArgs {
    /// Directory to initialize (default: current directory)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Overwrite existing project files
    #[arg(long)]
    pub force: bool,

    /// Output format: human (default) or json
    #[arg(long, value_enum, default_value = "human")]
    pub format: OutputFormat,
}

pub fn execute(args: &InitArgs) -> Result<()> {
    let format = args.format;

    // Determine target path
    let path = args
        .path
        .as_deref()
        .unwrap_or_else(|| std::path::Path::new("."));

    // Canonicalize if exists, otherwise use as-is
    let path = if path.exists() {
        path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
    } else {
        path.to_path_buf()
    };

    // Check if project already exists
    if !args.force && has_project_markers(&path) {
        let output = InitOutput {
            status: "error".to_string(),
            path: path.clone(),
            created: vec![],
        };

        match format {
            OutputFormat::Json => println!("{}", output.to_json()),
            OutputFormat::Human => {
                eprintln!("Error: Project already exists at {}", path.display());
                eprintln!();
                eprintln!("Use --force to overwrite existing project files.");
            }
        }
        std::process::exit(1);
    }

    let created = create_project_structure(&path, args.force)?;

    let output = InitOutput {
        status: "success".to_string(),
        path: path.clone(),
        created: created.clone(),
    };

    match format {
        OutputFormat::Json => println!("{}", output.to_json()),
        OutputFormat::Human => print_human_output(&path, &created),
    }

    Ok(())
}

fn print_human_output(path: &std::path::Path, created: &[String]) {
    println!("Initialized sweepy project in: {}", path.display());
    println!();

    if created.is_empty() {
        println!("All project files already exist.");
    } else {
        println!("Created:");
        for item in created {
            let description = match item.as_str() {
                "sweepy.toml" => "Project configuration",
                ".gitignore" => "Git ignore rules",
                _ => "",
            };
            if description.is_empty() {
                println!("  {}", item);
            } else {
                println!("  {:12} - {}", item, description);
            }
        }
    }

    println!();
    println!("Next steps:");
    println!("  sweepy clean            - Remove build artifacts");
    println!("  sweepy test             - Clean, then run the test suite");
    println!("  sweepy installdeps      - Install dependencies from requirements.txt");
}
