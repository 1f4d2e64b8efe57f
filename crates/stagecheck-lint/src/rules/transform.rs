//! Transform checks: negative scale components.

use crate::report::{Finding, Severity};
use crate::rules::ValidationRule;
use stagecheck_scene::SceneSnapshot;

/// Warns for every node with a negative scale component.
///
/// Negative scale flips winding order and breaks most interchange
/// converters. Every offending node gets its own finding, even when nodes
/// share a name.
pub struct NegativeScaleRule;

impl ValidationRule for NegativeScaleRule {
    fn id(&self) -> &'static str {
        "transform/negative-scale"
    }

    fn description(&self) -> &'static str {
        "Flags nodes with a negative scale component"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, scene: &SceneSnapshot) -> Vec<Finding> {
        let mut findings = Vec::new();
        scene.for_each_node(|node| {
            if node.scale.iter().any(|&component| component < 0.0) {
                findings.push(
                    Finding::warning(format!(
                        "Node \"{}\" has a negative scale",
                        node.display_name()
                    ))
                    .with_detail(format!(
                        "scale is [{}, {}, {}]",
                        node.scale[0], node.scale[1], node.scale[2]
                    )),
                );
            }
        });
        findings
    }
}
