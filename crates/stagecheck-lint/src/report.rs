//! Finding and report types for structured output.

use serde::{Deserialize, Serialize};

/// Severity level for findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational, no action required.
    Info,
    /// Likely to cause trouble during conversion, worth fixing.
    Warning,
    /// The asset could not be processed.
    Error,
}

/// One diagnostic emitted during a validation run.
///
/// Findings are immutable once created and are kept in emission order (rule
/// order, then within-rule discovery order). They are never deduplicated or
/// merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Severity level.
    pub severity: Severity,

    /// Short human-readable description.
    pub message: String,

    /// Free-text detail carrying the specific values that triggered the
    /// finding.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Finding {
    /// Creates a new finding.
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            detail: None,
        }
    }

    /// Creates a warning finding.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Creates an error finding.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Builder method to attach detail text.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Complete result of one validation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    findings: Vec<Finding>,

    /// Total triangle count, absent when import failed.
    pub polygon_count: Option<u64>,

    /// Mesh-node count, absent when import failed.
    pub mesh_count: Option<u64>,

    /// Number of error-level findings.
    pub error_count: usize,
    /// Number of warning-level findings.
    pub warning_count: usize,
    /// Number of info-level findings.
    pub info_count: usize,
}

impl ValidationReport {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a report holding a single finding. Used for import failures
    /// and rejected inputs.
    pub fn single(finding: Finding) -> Self {
        let mut report = Self::new();
        report.push(finding);
        report
    }

    /// Appends a finding, updating the severity counters.
    pub fn push(&mut self, finding: Finding) {
        match finding.severity {
            Severity::Info => self.info_count += 1,
            Severity::Warning => self.warning_count += 1,
            Severity::Error => self.error_count += 1,
        }
        self.findings.push(finding);
    }

    /// All findings in emission order.
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// Findings of one severity, preserving relative order.
    pub fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.severity == severity)
    }

    /// True if any error or warning is present. Drives whether a details
    /// view is surfaced automatically.
    pub fn has_issues(&self) -> bool {
        self.error_count > 0 || self.warning_count > 0
    }

    /// Total number of findings.
    pub fn len(&self) -> usize {
        self.findings.len()
    }

    /// True if the report holds no findings.
    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn push_updates_counters() {
        let mut report = ValidationReport::new();
        assert!(!report.has_issues());

        report.push(Finding::warning("big texture"));
        report.push(Finding::new(Severity::Info, "note"));
        assert_eq!(report.warning_count, 1);
        assert_eq!(report.info_count, 1);
        assert!(report.has_issues());

        report.push(Finding::error("parse failed"));
        assert_eq!(report.error_count, 1);
        assert_eq!(report.len(), 3);
    }

    #[test]
    fn info_alone_is_not_an_issue() {
        let report = ValidationReport::single(Finding::new(Severity::Info, "note"));
        assert!(!report.has_issues());
    }

    #[test]
    fn findings_keep_emission_order() {
        let mut report = ValidationReport::new();
        report.push(Finding::warning("first"));
        report.push(Finding::error("second"));
        report.push(Finding::warning("third"));

        let messages: Vec<_> = report.findings().iter().map(|f| f.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second", "third"]);

        let warnings: Vec<_> = report
            .with_severity(Severity::Warning)
            .map(|f| f.message.as_str())
            .collect();
        assert_eq!(warnings, vec!["first", "third"]);
    }

    #[test]
    fn severity_ordering() {
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
    }

    #[test]
    fn report_serializes_to_json() {
        let mut report = ValidationReport::new();
        report.push(Finding::warning("oversized texture").with_detail("4096x4096"));
        report.polygon_count = Some(12);
        report.mesh_count = Some(1);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["findings"][0]["severity"], "warning");
        assert_eq!(json["findings"][0]["detail"], "4096x4096");
        assert_eq!(json["polygon_count"], 12);
    }
}
