//! Hierarchy checks: deep subtrees below mesh nodes.

use crate::report::{Finding, Severity};
use crate::rules::ValidationRule;
use stagecheck_scene::SceneSnapshot;

/// Warns when a mesh node carries a descendant subtree deeper than the
/// budget.
///
/// Depth is measured below the mesh (the mesh itself is depth 0); the
/// mesh's own distance from the scene root is not counted.
pub struct MeshDepthRule;

impl MeshDepthRule {
    /// Deepest descendant subtree accepted without a finding.
    pub const DEPTH_BUDGET: u32 = 5;
}

impl ValidationRule for MeshDepthRule {
    fn id(&self) -> &'static str {
        "hierarchy/mesh-depth"
    }

    fn description(&self) -> &'static str {
        "Flags mesh nodes whose descendant subtree is deeper than 5 levels"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, scene: &SceneSnapshot) -> Vec<Finding> {
        let mut findings = Vec::new();
        scene.for_each_node(|node| {
            if !node.is_mesh() {
                return;
            }
            let depth = node.subtree_depth();
            if depth > Self::DEPTH_BUDGET {
                findings.push(
                    Finding::warning(format!(
                        "Mesh \"{}\" has a deep child hierarchy",
                        node.display_name()
                    ))
                    .with_detail(format!(
                        "{} levels below the mesh, recommended maximum is {}",
                        depth,
                        Self::DEPTH_BUDGET
                    )),
                );
            }
        });
        findings
    }
}
