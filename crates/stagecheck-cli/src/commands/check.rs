//! Check command implementation.
//!
//! Loads the asset and its companion resources, runs the validator, and
//! renders the report grouped by severity.

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use stagecheck_lint::{Finding, Severity, ValidationReport, Validator};
use stagecheck_scene::ResourceBundle;

use super::OutputFormat;

/// JSON output for the check command.
#[derive(Debug, Serialize)]
struct CheckOutput<'a> {
    /// Whether the check passed for the chosen strictness.
    success: bool,
    /// Path to the checked asset.
    asset_path: String,
    /// The full validation report.
    report: &'a ValidationReport,
}

/// Extensions the validator accepts.
fn is_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let e = e.to_lowercase();
            e == "gltf" || e == "glb"
        })
        .unwrap_or(false)
}

/// Loads companion resources into a bundle keyed by filename.
fn load_resources(files: &[PathBuf], dir: Option<&Path>) -> Result<ResourceBundle> {
    let mut bundle = ResourceBundle::new();

    for file in files {
        let name = file
            .file_name()
            .and_then(|n| n.to_str())
            .with_context(|| format!("invalid resource path {}", file.display()))?
            .to_string();
        let bytes =
            std::fs::read(file).with_context(|| format!("failed to read {}", file.display()))?;
        bundle.insert(name, bytes);
    }

    if let Some(dir) = dir {
        let entries = std::fs::read_dir(dir)
            .with_context(|| format!("failed to read directory {}", dir.display()))?;
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            let bytes = std::fs::read(entry.path())
                .with_context(|| format!("failed to read {}", entry.path().display()))?;
            bundle.insert(name, bytes);
        }
    }

    Ok(bundle)
}

/// Builds the report for one input. Rejected and unreadable inputs become a
/// single-error report instead of failing the command.
fn build_report(
    input: &Path,
    resources: &[PathBuf],
    resource_dir: Option<&Path>,
) -> Result<ValidationReport> {
    // Unsupported extensions never reach the validator.
    if !is_supported_extension(input) {
        return Ok(ValidationReport::single(
            Finding::error(format!(
                "Unsupported file type: {}",
                input.file_name().and_then(|n| n.to_str()).unwrap_or("?")
            ))
            .with_detail("expected a .gltf or .glb file"),
        ));
    }

    let bytes = match std::fs::read(input) {
        Ok(bytes) => bytes,
        Err(err) => {
            return Ok(ValidationReport::single(
                Finding::error(format!("Failed to read {}", input.display()))
                    .with_detail(err.to_string()),
            ));
        }
    };

    let bundle = load_resources(resources, resource_dir)?;
    Ok(Validator::new().validate(&bytes, &bundle))
}

/// Run the check command.
pub fn run(
    input: &Path,
    resources: &[PathBuf],
    resource_dir: Option<&Path>,
    format: OutputFormat,
    strict: bool,
) -> Result<ExitCode> {
    let report = build_report(input, resources, resource_dir)?;

    let failed = report.error_count > 0 || (strict && report.warning_count > 0);

    match format {
        OutputFormat::Json => {
            let output = CheckOutput {
                success: !failed,
                asset_path: input.display().to_string(),
                report: &report,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => print_text_report(input, &report),
    }

    Ok(if failed {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    })
}

fn print_text_report(input: &Path, report: &ValidationReport) {
    println!("{} {}", "Checked".bold(), input.display());
    println!();

    print_group(report, Severity::Error, &"Errors".red().bold().to_string());
    print_group(
        report,
        Severity::Warning,
        &"Warnings".yellow().bold().to_string(),
    );
    print_group(report, Severity::Info, &"Info".blue().bold().to_string());

    if !report.has_issues() {
        println!("{}", "No issues found".green());
    }

    println!(
        "{} {} errors, {} warnings, {} info",
        "Summary:".bold(),
        report.error_count,
        report.warning_count,
        report.info_count
    );
    if let (Some(polygons), Some(meshes)) = (report.polygon_count, report.mesh_count) {
        println!("{} {} triangles, {} meshes", "Scene:".bold(), polygons, meshes);
    }
}

fn print_group(report: &ValidationReport, severity: Severity, heading: &str) {
    let mut findings = report.with_severity(severity).peekable();
    if findings.peek().is_none() {
        return;
    }
    println!("{}", heading);
    for finding in findings {
        match &finding.detail {
            Some(detail) => println!("  - {} ({})", finding.message, detail),
            None => println!("  - {}", finding.message),
        }
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_gate_accepts_gltf_and_glb_only() {
        assert!(is_supported_extension(Path::new("model.glb")));
        assert!(is_supported_extension(Path::new("model.GLTF")));
        assert!(!is_supported_extension(Path::new("model.fbx")));
        assert!(!is_supported_extension(Path::new("model")));
    }

    #[test]
    fn unreadable_input_becomes_a_single_error_report() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.glb");

        let report = build_report(&missing, &[], None).unwrap();
        assert_eq!(report.len(), 1);
        assert_eq!(report.findings()[0].severity, Severity::Error);
        assert!(report.findings()[0].message.contains("missing.glb"));
        assert!(report.findings()[0].detail.is_some());
    }

    #[test]
    fn unsupported_extension_becomes_a_single_error_report() {
        let report = build_report(Path::new("model.fbx"), &[], None).unwrap();
        assert_eq!(report.len(), 1);
        assert_eq!(report.findings()[0].severity, Severity::Error);
        assert!(report.findings()[0].message.contains("model.fbx"));
    }

    #[test]
    fn resources_are_keyed_by_filename() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mesh.bin");
        std::fs::write(&path, [1u8, 2, 3]).unwrap();

        let bundle = load_resources(&[path], None).unwrap();
        assert_eq!(bundle.resolve("buffers/mesh.bin"), Some(&[1u8, 2, 3][..]));
    }

    #[test]
    fn resource_dir_contents_are_loaded() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.bin"), [7u8]).unwrap();
        std::fs::write(dir.path().join("b.png"), [8u8]).unwrap();

        let bundle = load_resources(&[], Some(dir.path())).unwrap();
        assert_eq!(bundle.len(), 2);
        assert_eq!(bundle.resolve("a.bin"), Some(&[7u8][..]));
    }
}
