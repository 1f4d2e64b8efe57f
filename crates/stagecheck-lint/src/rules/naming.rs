//! Naming checks: character-set violations and duplicate identifiers.

use std::collections::HashSet;

use crate::report::{Finding, Severity};
use crate::rules::ValidationRule;
use stagecheck_scene::{NodeKind, SceneSnapshot};

/// Warns about names containing non-ASCII characters or spaces.
///
/// Both checks run independently over every node name, every material name
/// of every mesh, and every texture name and inferred filename per material
/// slot. A name failing both checks yields two findings; nothing is
/// deduplicated.
pub struct CharsetRule;

impl CharsetRule {
    fn check_name(findings: &mut Vec<Finding>, role: &str, value: &str) {
        if value.chars().any(|c| !c.is_ascii()) {
            findings.push(
                Finding::warning(format!("{} name contains non-ASCII characters", role))
                    .with_detail(format!("\"{}\"", value)),
            );
        }
        if value.contains(' ') {
            findings.push(
                Finding::warning(format!("{} name contains spaces", role))
                    .with_detail(format!("\"{}\"", value)),
            );
        }
    }
}

impl ValidationRule for CharsetRule {
    fn id(&self) -> &'static str {
        "naming/charset"
    }

    fn description(&self) -> &'static str {
        "Flags node, material and texture names containing spaces or non-ASCII characters"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, scene: &SceneSnapshot) -> Vec<Finding> {
        let mut findings = Vec::new();

        scene.for_each_node(|node| {
            Self::check_name(&mut findings, "Node", &node.name);
        });

        scene.for_each_node(|node| {
            let NodeKind::Mesh(ref geometry) = node.kind else {
                return;
            };
            for &material_index in &geometry.materials {
                let Some(material) = scene.materials.get(material_index) else {
                    continue;
                };
                Self::check_name(&mut findings, "Material", &material.name);

                for (slot, texture_index) in material.texture_slots() {
                    let Some(texture) = scene.textures.get(texture_index) else {
                        continue;
                    };
                    let role = format!("{} texture", capitalize(slot));
                    Self::check_name(&mut findings, &role, &texture.name);
                    if let Some(file_name) = texture.file_name() {
                        let file_role = format!("{} texture file", capitalize(slot));
                        Self::check_name(&mut findings, &file_role, file_name);
                    }
                }
            }
        });

        findings
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Warns once per kind (node, material, mesh) when the raw declared name
/// lists contain repeats.
///
/// Works on the declaration-order lists rather than the live scene graph,
/// because importer default-naming masks duplicates. Unnamed entries get a
/// positional fallback name before the scan.
pub struct DuplicateNamesRule;

impl DuplicateNamesRule {
    fn duplicates(kind: &str, names: &[Option<String>]) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for (index, name) in names.iter().enumerate() {
            let name = name
                .clone()
                .unwrap_or_else(|| format!("{}_{}", kind, index));
            if !seen.insert(name.clone()) && !duplicates.contains(&name) {
                duplicates.push(name);
            }
        }
        duplicates
    }

    fn check_kind(findings: &mut Vec<Finding>, kind: &str, names: &[Option<String>]) {
        let duplicates = Self::duplicates(kind, names);
        if duplicates.is_empty() {
            return;
        }
        findings.push(
            Finding::warning(format!("Duplicate {} names found", kind.to_lowercase()))
                .with_detail(duplicates.join(", ")),
        );
    }
}

impl ValidationRule for DuplicateNamesRule {
    fn id(&self) -> &'static str {
        "naming/duplicates"
    }

    fn description(&self) -> &'static str {
        "Flags duplicate names in the declared node, material and mesh lists"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, scene: &SceneSnapshot) -> Vec<Finding> {
        let mut findings = Vec::new();
        Self::check_kind(&mut findings, "Node", &scene.raw_names.nodes);
        Self::check_kind(&mut findings, "Material", &scene.raw_names.materials);
        Self::check_kind(&mut findings, "Mesh", &scene.raw_names.meshes);
        findings
    }
}
