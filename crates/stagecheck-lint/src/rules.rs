//! Validation rule trait and the fixed rule set.

use crate::report::{Finding, Severity};
use stagecheck_scene::SceneSnapshot;

pub mod animation;
pub mod geometry;
pub mod hierarchy;
pub mod naming;
pub mod skeleton;
pub mod texture;
pub mod transform;


pub use animation::ZeroScaleAnimationRule;
pub use geometry::{MeshCountRule, PolygonCountRule};
pub use hierarchy::MeshDepthRule;
pub use naming::{CharsetRule, DuplicateNamesRule};
pub use skeleton::MultipleRootBonesRule;
pub use texture::TextureRule;
pub use transform::NegativeScaleRule;

/// A validation check that reads a scene snapshot and reports findings.
///
/// Rules run in a fixed order against the same immutable snapshot and never
/// see each other's findings.
pub trait ValidationRule: Send + Sync {
    /// Unique identifier (e.g., "texture/oversize", "geometry/polygon-count").
    fn id(&self) -> &'static str;

    /// Human-readable description.
    fn description(&self) -> &'static str;

    /// Severity of the findings this rule emits.
    fn default_severity(&self) -> Severity;

    /// Run the check, return findings in discovery order.
    fn check(&self, scene: &SceneSnapshot) -> Vec<Finding>;
}

/// Returns all validation rules in their fixed execution order.
///
/// The order is part of the contract: findings accumulate in rule order,
/// then within-rule discovery order, so repeated runs over the same scene
/// produce identical reports.
pub fn all_rules() -> Vec<Box<dyn ValidationRule>> {
    vec![
        Box::new(TextureRule),
        Box::new(PolygonCountRule),
        Box::new(MeshCountRule),
        Box::new(NegativeScaleRule),
        Box::new(ZeroScaleAnimationRule),
        Box::new(MeshDepthRule),
        Box::new(CharsetRule),
        Box::new(DuplicateNamesRule),
        Box::new(MultipleRootBonesRule),
    ]
}

/// Metadata about a validation rule for documentation/introspection.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RuleMetadata {
    /// Rule identifier.
    pub id: String,
    /// Human-readable description.
    pub description: String,
    /// Severity of the rule's findings.
    pub severity: Severity,
}

impl RuleMetadata {
    /// Collects metadata for a rule slice.
    pub fn for_rules(rules: &[Box<dyn ValidationRule>]) -> Vec<Self> {
        rules
            .iter()
            .map(|rule| Self {
                id: rule.id().to_string(),
                description: rule.description().to_string(),
                severity: rule.default_severity(),
            })
            .collect()
    }
}
