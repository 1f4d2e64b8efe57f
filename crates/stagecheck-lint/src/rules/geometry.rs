//! Geometry budget checks: polygon and mesh counts.

use crate::report::{Finding, Severity};
use crate::rules::ValidationRule;
use stagecheck_scene::SceneSnapshot;

/// Warns when the scene's total triangle count exceeds the budget.
///
/// The total is the same value the orchestrator reports as the polygon
/// summary, computed by [`SceneSnapshot::polygon_count`].
pub struct PolygonCountRule;

impl PolygonCountRule {
    /// Largest triangle total accepted without a finding.
    pub const TRIANGLE_BUDGET: u64 = 50_000;
}

impl ValidationRule for PolygonCountRule {
    fn id(&self) -> &'static str {
        "geometry/polygon-count"
    }

    fn description(&self) -> &'static str {
        "Warns when the scene exceeds 50000 triangles"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, scene: &SceneSnapshot) -> Vec<Finding> {
        let total = scene.polygon_count();
        if total <= Self::TRIANGLE_BUDGET {
            return vec![];
        }

        vec![
            Finding::warning(format!("High polygon count: {} triangles", total)).with_detail(
                format!("recommended maximum is {} triangles", Self::TRIANGLE_BUDGET),
            ),
        ]
    }
}

/// Warns when the scene carries too many separate mesh nodes.
pub struct MeshCountRule;

impl MeshCountRule {
    /// Largest mesh-node count accepted without a finding.
    pub const MESH_BUDGET: u64 = 50;
}

impl ValidationRule for MeshCountRule {
    fn id(&self) -> &'static str {
        "geometry/mesh-count"
    }

    fn description(&self) -> &'static str {
        "Warns when the scene contains more than 50 mesh nodes"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, scene: &SceneSnapshot) -> Vec<Finding> {
        let count = scene.mesh_count();
        if count <= Self::MESH_BUDGET {
            return vec![];
        }

        vec![
            Finding::warning(format!("High mesh count: {} meshes", count)).with_detail(format!(
                "recommended maximum is {} meshes, consider merging",
                Self::MESH_BUDGET
            )),
        ]
    }
}
