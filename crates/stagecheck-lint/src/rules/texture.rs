//! Texture checks: oversized dimensions and inefficient source formats.

use crate::report::{Finding, Severity};
use crate::rules::ValidationRule;
use stagecheck_scene::{NodeKind, SceneSnapshot};

/// Widest texture edge accepted without a finding.
const MAX_TEXTURE_EDGE: u32 = 2000;

/// Source extensions that convert better after recompression.
const INEFFICIENT_FORMATS: &[&str] = &["jpg", "jpeg", "png"];

/// Checks every distinct texture referenced by a mesh material for
/// oversized dimensions and uncompressed source formats.
///
/// Textures are deduplicated by reference: a texture shared across several
/// materials is checked once, at its first reference.
pub struct TextureRule;

impl ValidationRule for TextureRule {
    fn id(&self) -> &'static str {
        "texture/size-and-format"
    }

    fn description(&self) -> &'static str {
        "Flags textures above 2000x2000 pixels and JPEG/PNG sources that convert poorly"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, scene: &SceneSnapshot) -> Vec<Finding> {
        let mut findings = Vec::new();

        // Distinct referenced textures, in first-reference order.
        let mut referenced = Vec::new();
        scene.for_each_node(|node| {
            if let NodeKind::Mesh(ref geometry) = node.kind {
                for &material_index in &geometry.materials {
                    let Some(material) = scene.materials.get(material_index) else {
                        continue;
                    };
                    for (_, texture_index) in material.texture_slots() {
                        if !referenced.contains(&texture_index) {
                            referenced.push(texture_index);
                        }
                    }
                }
            }
        });

        for texture_index in referenced {
            let Some(texture) = scene.textures.get(texture_index) else {
                continue;
            };

            if texture.width > MAX_TEXTURE_EDGE || texture.height > MAX_TEXTURE_EDGE {
                findings.push(
                    Finding::warning(format!(
                        "Texture \"{}\" is very large",
                        texture.display_name()
                    ))
                    .with_detail(format!(
                        "{}x{} pixels, recommended maximum is {}x{}",
                        texture.width, texture.height, MAX_TEXTURE_EDGE, MAX_TEXTURE_EDGE
                    )),
                );
            }

            if let Some(extension) = texture.extension() {
                if INEFFICIENT_FORMATS.contains(&extension.as_str()) {
                    findings.push(
                        Finding::warning(format!(
                            "Texture \"{}\" could use a more efficient format",
                            texture.display_name()
                        ))
                        .with_detail(format!(
                            "source \"{}\" is .{}, consider a GPU-compressed format",
                            texture.file_name().unwrap_or_default(),
                            extension
                        )),
                    );
                }
            }
        }

        findings
    }
}
