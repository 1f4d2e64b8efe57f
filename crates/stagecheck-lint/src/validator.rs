//! Validation orchestrator.
//!
//! Owns the rule set and drives one validation run: import the bytes, run
//! every rule in fixed order against the same immutable snapshot, attach the
//! summary counters. Import failures and unexpected panics become a single
//! error finding instead of propagating to the caller, so a run always
//! returns a report.

use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::report::{Finding, ValidationReport};
use crate::rules::{all_rules, ValidationRule};
use stagecheck_scene::{import_slice, ResourceBundle};

/// Runs the fixed rule set over glTF/GLB bytes.
pub struct Validator {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl Validator {
    /// Creates a validator with the default rule set in its fixed order.
    pub fn new() -> Self {
        Self { rules: all_rules() }
    }

    /// The rules this validator runs, in execution order.
    pub fn rules(&self) -> &[Box<dyn ValidationRule>] {
        &self.rules
    }

    /// Validates an asset and returns the finding report.
    ///
    /// On import failure the report holds exactly one error finding and no
    /// summary counters. This method never panics.
    pub fn validate(&self, bytes: &[u8], resources: &ResourceBundle) -> ValidationReport {
        match catch_unwind(AssertUnwindSafe(|| self.run(bytes, resources))) {
            Ok(report) => report,
            Err(panic) => ValidationReport::single(
                Finding::error("Validation failed unexpectedly").with_detail(panic_message(&panic)),
            ),
        }
    }

    /// Validates an asset and invokes `on_complete` exactly once with the
    /// finished report, both on success and on failure.
    pub fn validate_with(
        &self,
        bytes: &[u8],
        resources: &ResourceBundle,
        on_complete: impl FnOnce(&ValidationReport),
    ) -> ValidationReport {
        let report = self.validate(bytes, resources);
        on_complete(&report);
        report
    }

    fn run(&self, bytes: &[u8], resources: &ResourceBundle) -> ValidationReport {
        let snapshot = match import_slice(bytes, resources) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                return ValidationReport::single(
                    Finding::error("Failed to read the model file").with_detail(err.to_string()),
                );
            }
        };

        let mut report = ValidationReport::new();
        for rule in &self.rules {
            for finding in rule.check(&snapshot) {
                report.push(finding);
            }
        }
        report.polygon_count = Some(snapshot.polygon_count());
        report.mesh_count = Some(snapshot.mesh_count());
        report
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown failure".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Severity;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;

    /// Minimal GLB with one named triangle mesh.
    fn triangle_glb() -> Vec<u8> {
        let json = r#"{
            "asset": {"version": "2.0"},
            "scene": 0,
            "scenes": [{"nodes": [0]}],
            "nodes": [{"name": "Tri", "mesh": 0}],
            "meshes": [{"name": "TriMesh", "primitives": [{"attributes": {"POSITION": 0}}]}],
            "accessors": [{"bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
                           "max": [1, 1, 0], "min": [0, 0, 0]}],
            "bufferViews": [{"buffer": 0, "byteOffset": 0, "byteLength": 36}],
            "buffers": [{"byteLength": 36}]
        }"#;

        let positions: [[f32; 3]; 3] = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.5, 1.0, 0.0]];
        let mut bin = Vec::new();
        for pos in positions {
            for coord in pos {
                bin.extend_from_slice(&coord.to_le_bytes());
            }
        }

        let mut json_bytes = json.as_bytes().to_vec();
        while json_bytes.len() % 4 != 0 {
            json_bytes.push(0x20);
        }
        let total = 12 + 8 + json_bytes.len() + 8 + bin.len();

        let mut glb = Vec::new();
        glb.extend_from_slice(b"glTF");
        glb.extend_from_slice(&2u32.to_le_bytes());
        glb.extend_from_slice(&(total as u32).to_le_bytes());
        glb.extend_from_slice(&(json_bytes.len() as u32).to_le_bytes());
        glb.extend_from_slice(&0x4E4F534Au32.to_le_bytes());
        glb.extend_from_slice(&json_bytes);
        glb.extend_from_slice(&(bin.len() as u32).to_le_bytes());
        glb.extend_from_slice(&0x004E4942u32.to_le_bytes());
        glb.extend_from_slice(&bin);
        glb
    }

    #[test]
    fn clean_triangle_produces_summaries_and_no_issues() {
        let report = Validator::new().validate(&triangle_glb(), &ResourceBundle::new());
        assert!(!report.has_issues());
        assert_eq!(report.polygon_count, Some(1));
        assert_eq!(report.mesh_count, Some(1));
    }

    #[test]
    fn malformed_bytes_yield_a_single_error_finding() {
        let report = Validator::new().validate(b"not a model", &ResourceBundle::new());
        assert_eq!(report.len(), 1);
        assert_eq!(report.findings()[0].severity, Severity::Error);
        assert!(report.findings()[0].detail.is_some());
        assert_eq!(report.polygon_count, None);
        assert_eq!(report.mesh_count, None);
    }

    #[test]
    fn completion_hook_runs_exactly_once_on_failure() {
        let calls = Cell::new(0);
        let report = Validator::new().validate_with(b"garbage", &ResourceBundle::new(), |r| {
            calls.set(calls.get() + 1);
            assert_eq!(r.len(), 1);
            assert_eq!(r.findings()[0].severity, Severity::Error);
        });
        assert_eq!(calls.get(), 1);
        assert_eq!(report.len(), 1);
    }

    #[test]
    fn completion_hook_runs_exactly_once_on_success() {
        let calls = Cell::new(0);
        Validator::new().validate_with(&triangle_glb(), &ResourceBundle::new(), |_| {
            calls.set(calls.get() + 1);
        });
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn repeated_runs_produce_identical_reports() {
        let validator = Validator::new();
        let glb = triangle_glb();
        let first = validator.validate(&glb, &ResourceBundle::new());
        let second = validator.validate(&glb, &ResourceBundle::new());
        assert_eq!(first, second);
    }

    #[test]
    fn summaries_match_an_independent_traversal() {
        let glb = triangle_glb();
        let snapshot =
            stagecheck_scene::import_slice(&glb, &ResourceBundle::new()).unwrap();

        let mut triangles = 0u64;
        let mut meshes = 0u64;
        snapshot.for_each_node(|node| {
            if let stagecheck_scene::NodeKind::Mesh(ref geometry) = node.kind {
                triangles += geometry.triangle_count;
                meshes += 1;
            }
        });

        let report = Validator::new().validate(&glb, &ResourceBundle::new());
        assert_eq!(report.polygon_count, Some(triangles));
        assert_eq!(report.mesh_count, Some(meshes));
    }
}
