//! stagecheck CLI - quality checks for glTF/GLB assets
//!
//! Provides commands for validating assets before they enter a
//! scene-description conversion pipeline, and for inspecting the rule set.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;

use commands::OutputFormat;

/// stagecheck - pre-conversion quality checks for 3D assets
#[derive(Parser)]
#[command(name = "stagecheck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a glTF/GLB asset and report findings
    Check {
        /// Path to the asset file (.gltf or .glb)
        input: PathBuf,

        /// Companion resource file referenced by the asset (repeatable)
        #[arg(short, long)]
        resource: Vec<PathBuf>,

        /// Directory whose files are offered as companion resources
        #[arg(long)]
        resource_dir: Option<PathBuf>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: OutputFormat,

        /// Fail on warnings in addition to errors
        #[arg(long)]
        strict: bool,
    },

    /// List the validation rules and their severities
    Rules {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check {
            input,
            resource,
            resource_dir,
            format,
            strict,
        } => commands::check::run(&input, &resource, resource_dir.as_deref(), format, strict),
        Commands::Rules { format } => commands::rules::run(format),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::from(2)
        }
    }
}
