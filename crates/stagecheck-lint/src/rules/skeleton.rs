//! Skeleton checks: multiple root bones.

use std::collections::HashSet;

use crate::report::{Finding, Severity};
use crate::rules::ValidationRule;
use stagecheck_scene::SceneSnapshot;

/// Warns when an animated skeleton has more than one root bone.
///
/// Runs only when at least one animation track targets a bone node (matched
/// by node index or by name). A root bone is a bone with no bone ancestor.
pub struct MultipleRootBonesRule;

impl ValidationRule for MultipleRootBonesRule {
    fn id(&self) -> &'static str {
        "skeleton/multiple-roots"
    }

    fn description(&self) -> &'static str {
        "Flags animated skeletons with more than one root bone"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, scene: &SceneSnapshot) -> Vec<Finding> {
        if scene.animations.is_empty() {
            return vec![];
        }

        let mut bone_indices = HashSet::new();
        let mut bone_names = HashSet::new();
        scene.for_each_node(|node| {
            if node.is_bone() {
                bone_indices.insert(node.index);
                if !node.name.is_empty() {
                    bone_names.insert(node.name.clone());
                }
            }
        });

        let targets_bone = scene.animations.iter().flat_map(|clip| &clip.tracks).any(
            |track| match track.target_node {
                Some(index) => bone_indices.contains(&index),
                None => bone_names.contains(&track.target_name),
            },
        );
        if !targets_bone {
            return vec![];
        }

        let root_bones = scene.root_bones();
        if root_bones.len() <= 1 {
            return vec![];
        }

        let names: Vec<&str> = root_bones.iter().map(|bone| bone.display_name()).collect();
        vec![Finding::warning(format!(
            "Skeleton has {} root bones",
            root_bones.len()
        ))
        .with_detail(names.join(", "))]
    }
}
