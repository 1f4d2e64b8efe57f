//! glTF/GLB import adapter.
//!
//! Wraps the `gltf` crate and flattens its document into a
//! [`SceneSnapshot`]. External buffer and image references are substituted
//! from a caller-supplied [`ResourceBundle`] by filename; `data:` URIs are
//! decoded inline; GLB binary chunks come from the container itself.

use std::collections::HashSet;

use base64::Engine as _;

use crate::animation::{AnimationClip, Track, TrackProperty};
use crate::resources::ResourceBundle;
use crate::snapshot::{
    Material, MeshGeometry, NodeKind, RawNames, SceneNode, SceneSnapshot, Texture,
};

/// Errors raised while turning raw bytes into a scene snapshot.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// The container could not be parsed.
    #[error("failed to parse glTF: {0}")]
    Parse(#[from] gltf::Error),

    /// An external reference had no matching companion resource.
    #[error("missing companion resource \"{0}\"")]
    MissingResource(String),

    /// A `data:` URI could not be decoded.
    #[error("malformed data URI for {0}")]
    MalformedDataUri(String),

    /// A buffer references the GLB binary chunk, but the container has none.
    #[error("binary chunk referenced but not present")]
    MissingBinaryChunk,

    /// A resolved resource is shorter than the declared buffer length.
    #[error("resource \"{0}\" is shorter than its declared length")]
    ResourceTooShort(String),
}

/// Imports a glTF or GLB asset from raw bytes into an immutable snapshot.
///
/// `resources` supplies externally referenced buffers and images, keyed by
/// filename. Resolution is deterministic: the same filename always yields
/// the same bytes.
pub fn import_slice(
    bytes: &[u8],
    resources: &ResourceBundle,
) -> Result<SceneSnapshot, ImportError> {
    let gltf::Gltf { document, blob } = gltf::Gltf::from_slice(bytes)?;

    let buffers = resolve_buffers(&document, blob, resources)?;
    let textures = resolve_textures(&document, &buffers, resources)?;
    let materials = collect_materials(&document);
    let animations = collect_animations(&document, &buffers);
    let raw_names = collect_raw_names(&document);

    let joints: HashSet<usize> = document
        .skins()
        .flat_map(|skin| skin.joints())
        .map(|node| node.index())
        .collect();

    let scene = document.default_scene().or_else(|| document.scenes().next());
    let roots = scene
        .map(|scene| scene.nodes().map(|node| build_node(node, &joints)).collect())
        .unwrap_or_default();

    Ok(SceneSnapshot {
        roots,
        materials,
        textures,
        animations,
        raw_names,
    })
}

fn resolve_buffers(
    document: &gltf::Document,
    mut blob: Option<Vec<u8>>,
    resources: &ResourceBundle,
) -> Result<Vec<Vec<u8>>, ImportError> {
    let mut buffers = Vec::new();
    for buffer in document.buffers() {
        let data = match buffer.source() {
            gltf::buffer::Source::Bin => blob.take().ok_or(ImportError::MissingBinaryChunk)?,
            gltf::buffer::Source::Uri(uri) => resolve_uri(uri, resources)?,
        };
        if data.len() < buffer.length() {
            let label = match buffer.source() {
                gltf::buffer::Source::Bin => "binary chunk".to_string(),
                gltf::buffer::Source::Uri(uri) => uri.to_string(),
            };
            return Err(ImportError::ResourceTooShort(label));
        }
        buffers.push(data);
    }
    Ok(buffers)
}

fn resolve_uri(uri: &str, resources: &ResourceBundle) -> Result<Vec<u8>, ImportError> {
    if let Some(payload) = uri.strip_prefix("data:") {
        let encoded = payload
            .split_once(',')
            .filter(|(meta, _)| meta.ends_with(";base64"))
            .map(|(_, data)| data)
            .ok_or_else(|| ImportError::MalformedDataUri(uri.to_string()))?;
        return base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .map_err(|_| ImportError::MalformedDataUri(uri.to_string()));
    }
    resources
        .resolve(uri)
        .map(<[u8]>::to_vec)
        .ok_or_else(|| ImportError::MissingResource(uri.to_string()))
}

fn resolve_textures(
    document: &gltf::Document,
    buffers: &[Vec<u8>],
    resources: &ResourceBundle,
) -> Result<Vec<Texture>, ImportError> {
    let mut textures = Vec::new();
    for texture in document.textures() {
        let image = texture.source();
        let name = texture
            .name()
            .or_else(|| image.name())
            .unwrap_or_default()
            .to_string();

        let (bytes, source) = match image.source() {
            gltf::image::Source::View { view, .. } => {
                let buffer = buffers
                    .get(view.buffer().index())
                    .map(Vec::as_slice)
                    .unwrap_or_default();
                let end = (view.offset() + view.length()).min(buffer.len());
                (buffer.get(view.offset()..end).map(<[u8]>::to_vec), None)
            }
            gltf::image::Source::Uri { uri, .. } if uri.starts_with("data:") => {
                (Some(resolve_uri(uri, resources)?), None)
            }
            gltf::image::Source::Uri { uri, .. } => {
                (Some(resolve_uri(uri, resources)?), Some(uri.to_string()))
            }
        };

        let (width, height) = bytes
            .as_deref()
            .and_then(probe_dimensions)
            .unwrap_or((0, 0));

        textures.push(Texture {
            name,
            width,
            height,
            source,
        });
    }
    Ok(textures)
}

/// Reads pixel dimensions from an encoded image without a full decode.
fn probe_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    image::ImageReader::new(std::io::Cursor::new(bytes))
        .with_guessed_format()
        .ok()?
        .into_dimensions()
        .ok()
}

fn collect_materials(document: &gltf::Document) -> Vec<Material> {
    document
        .materials()
        .map(|material| {
            let pbr = material.pbr_metallic_roughness();
            Material {
                name: material.name().unwrap_or_default().to_string(),
                base_color_texture: pbr.base_color_texture().map(|t| t.texture().index()),
                normal_texture: material.normal_texture().map(|t| t.texture().index()),
                metallic_roughness_texture: pbr
                    .metallic_roughness_texture()
                    .map(|t| t.texture().index()),
                occlusion_texture: material.occlusion_texture().map(|t| t.texture().index()),
                emissive_texture: material.emissive_texture().map(|t| t.texture().index()),
            }
        })
        .collect()
}

fn collect_animations(document: &gltf::Document, buffers: &[Vec<u8>]) -> Vec<AnimationClip> {
    document
        .animations()
        .map(|animation| {
            let tracks = animation
                .channels()
                .map(|channel| {
                    let target = channel.target();
                    let node = target.node();
                    let property = match target.property() {
                        gltf::animation::Property::Translation => TrackProperty::Translation,
                        gltf::animation::Property::Rotation => TrackProperty::Rotation,
                        gltf::animation::Property::Scale => TrackProperty::Scale,
                        gltf::animation::Property::MorphTargetWeights => {
                            TrackProperty::MorphWeights
                        }
                    };

                    let reader =
                        channel.reader(|buffer| buffers.get(buffer.index()).map(Vec::as_slice));
                    let values = match reader.read_outputs() {
                        Some(gltf::animation::util::ReadOutputs::Translations(it)) => {
                            it.flatten().collect()
                        }
                        Some(gltf::animation::util::ReadOutputs::Scales(it)) => {
                            it.flatten().collect()
                        }
                        Some(gltf::animation::util::ReadOutputs::Rotations(rotations)) => {
                            rotations.into_f32().flatten().collect()
                        }
                        Some(gltf::animation::util::ReadOutputs::MorphTargetWeights(weights)) => {
                            weights.into_f32().collect()
                        }
                        None => Vec::new(),
                    };

                    Track {
                        target_name: node.name().unwrap_or_default().to_string(),
                        target_node: Some(node.index()),
                        property,
                        values,
                    }
                })
                .collect();

            AnimationClip {
                name: animation.name().unwrap_or_default().to_string(),
                tracks,
            }
        })
        .collect()
}

fn collect_raw_names(document: &gltf::Document) -> RawNames {
    RawNames {
        nodes: document
            .nodes()
            .map(|n| n.name().map(str::to_owned))
            .collect(),
        materials: document
            .materials()
            .map(|m| m.name().map(str::to_owned))
            .collect(),
        meshes: document
            .meshes()
            .map(|m| m.name().map(str::to_owned))
            .collect(),
    }
}

fn build_node(node: gltf::Node, joints: &HashSet<usize>) -> SceneNode {
    let (translation, rotation, scale) = node.transform().decomposed();

    let kind = if let Some(mesh) = node.mesh() {
        let mut triangle_count = 0u64;
        let mut materials = Vec::new();
        for primitive in mesh.primitives() {
            let vertex_count = primitive
                .indices()
                .map(|accessor| accessor.count())
                .or_else(|| {
                    primitive
                        .get(&gltf::Semantic::Positions)
                        .map(|accessor| accessor.count())
                })
                .unwrap_or(0);
            triangle_count += (vertex_count / 3) as u64;

            if let Some(index) = primitive.material().index() {
                if !materials.contains(&index) {
                    materials.push(index);
                }
            }
        }
        NodeKind::Mesh(MeshGeometry {
            triangle_count,
            materials,
        })
    } else if joints.contains(&node.index()) {
        NodeKind::Bone
    } else {
        NodeKind::Group
    };

    SceneNode {
        index: node.index(),
        name: node.name().unwrap_or_default().to_string(),
        translation,
        rotation,
        scale,
        kind,
        children: node
            .children()
            .map(|child| build_node(child, joints))
            .collect(),
    }
}
