//! Rules command implementation.
//!
//! Lists the validation rules, their severities and descriptions.

use anyhow::Result;
use colored::Colorize;
use std::process::ExitCode;

use stagecheck_lint::{RuleMetadata, Severity, Validator};

use super::OutputFormat;

/// Run the rules command.
pub fn run(format: OutputFormat) -> Result<ExitCode> {
    let validator = Validator::new();
    let metadata = RuleMetadata::for_rules(validator.rules());

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&metadata)?);
        }
        OutputFormat::Text => {
            for rule in &metadata {
                let severity = match rule.severity {
                    Severity::Error => "error".red(),
                    Severity::Warning => "warning".yellow(),
                    Severity::Info => "info".blue(),
                };
                println!("{:30} [{}] {}", rule.id.bold(), severity, rule.description);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
