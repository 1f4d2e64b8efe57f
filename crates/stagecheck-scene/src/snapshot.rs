//! Immutable scene snapshot consumed by the validation rules.

use crate::animation::AnimationClip;

/// What a scene node is, and the data that comes with that role.
///
/// Mesh-bearing nodes carry their geometry summary; skin joints are bones;
/// everything else is a plain transform group. A joint that also carries a
/// mesh is classified as a mesh.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Plain transform node with no geometry and no skeletal role.
    Group,
    /// Node with attached geometry.
    Mesh(MeshGeometry),
    /// Skeletal joint, targetable by animation tracks.
    Bone,
}

/// Geometry summary for a mesh node.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshGeometry {
    /// Total triangles across the mesh's primitives. Indexed primitives
    /// count index triples; non-indexed primitives count position triples.
    pub triangle_count: u64,
    /// Indices into [`SceneSnapshot::materials`] used by the primitives,
    /// in primitive order, deduplicated.
    pub materials: Vec<usize>,
}

/// One node of the imported scene hierarchy.
///
/// The hierarchy is a tree: every node has exactly one parent apart from the
/// scene roots, and a traversal visits each node exactly once.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    /// Declaration index of the node in the source document.
    pub index: usize,
    /// Node name as declared. May be empty and is not required to be unique.
    pub name: String,
    /// Local translation.
    pub translation: [f32; 3],
    /// Local rotation quaternion (x, y, z, w).
    pub rotation: [f32; 4],
    /// Local per-axis scale. Non-uniform and possibly negative.
    pub scale: [f32; 3],
    /// Role of this node.
    pub kind: NodeKind,
    /// Child nodes, in declaration order.
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    /// Name for diagnostics, falling back to `"Unnamed"` for empty names.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "Unnamed"
        } else {
            &self.name
        }
    }

    /// Returns true if this node carries geometry.
    pub fn is_mesh(&self) -> bool {
        matches!(self.kind, NodeKind::Mesh(_))
    }

    /// Returns true if this node is a skeletal joint.
    pub fn is_bone(&self) -> bool {
        matches!(self.kind, NodeKind::Bone)
    }

    /// Maximum depth of this node's descendant subtree, with the node
    /// itself at depth 0.
    pub fn subtree_depth(&self) -> u32 {
        self.children
            .iter()
            .map(|c| 1 + c.subtree_depth())
            .max()
            .unwrap_or(0)
    }
}

/// A material and its optional texture slots.
///
/// Slot values index into [`SceneSnapshot::textures`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Material {
    /// Material name as declared. May be empty.
    pub name: String,
    pub base_color_texture: Option<usize>,
    pub normal_texture: Option<usize>,
    pub metallic_roughness_texture: Option<usize>,
    pub occlusion_texture: Option<usize>,
    pub emissive_texture: Option<usize>,
}

impl Material {
    /// Name for diagnostics, falling back to `"Unnamed"` for empty names.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "Unnamed"
        } else {
            &self.name
        }
    }

    /// All assigned texture slots as `(slot label, texture index)` pairs.
    pub fn texture_slots(&self) -> Vec<(&'static str, usize)> {
        let mut slots = Vec::new();
        if let Some(i) = self.base_color_texture {
            slots.push(("base color", i));
        }
        if let Some(i) = self.normal_texture {
            slots.push(("normal", i));
        }
        if let Some(i) = self.metallic_roughness_texture {
            slots.push(("metallic-roughness", i));
        }
        if let Some(i) = self.occlusion_texture {
            slots.push(("occlusion", i));
        }
        if let Some(i) = self.emissive_texture {
            slots.push(("emissive", i));
        }
        slots
    }
}

/// A texture referenced by material slots.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Texture {
    /// Texture (or backing image) name as declared. May be empty.
    pub name: String,
    /// Pixel width. 0 when the payload could not be probed.
    pub width: u32,
    /// Pixel height. 0 when the payload could not be probed.
    pub height: u32,
    /// Source URI of the backing image, when it has one. Buffer-view backed
    /// images have no URI.
    pub source: Option<String>,
}

impl Texture {
    /// Name for diagnostics, falling back to `"Unnamed texture"`.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "Unnamed texture"
        } else {
            &self.name
        }
    }

    /// Filename inferred from the source URI: final path segment with any
    /// query string or fragment stripped.
    pub fn file_name(&self) -> Option<&str> {
        let uri = self.source.as_deref()?;
        let uri = uri.split(['?', '#']).next().unwrap_or(uri);
        uri.rsplit('/').next().filter(|s| !s.is_empty())
    }

    /// Lowercased extension of the inferred filename.
    pub fn extension(&self) -> Option<String> {
        let name = self.file_name()?;
        let (stem, ext) = name.rsplit_once('.')?;
        if stem.is_empty() {
            return None;
        }
        Some(ext.to_lowercase())
    }
}

/// Raw declaration-order name lists from the source document.
///
/// The live node tree applies default naming that can mask duplicates, so
/// duplicate detection works on these lists instead.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawNames {
    pub nodes: Vec<Option<String>>,
    pub materials: Vec<Option<String>>,
    pub meshes: Vec<Option<String>>,
}

/// Everything one validation run looks at. Built once per import, read-only
/// afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneSnapshot {
    /// Root nodes of the scene hierarchy.
    pub roots: Vec<SceneNode>,
    /// Material table, indexed by declaration order.
    pub materials: Vec<Material>,
    /// Texture table, indexed by declaration order.
    pub textures: Vec<Texture>,
    /// Animation clips.
    pub animations: Vec<AnimationClip>,
    /// Raw declared name lists.
    pub raw_names: RawNames,
}

impl SceneSnapshot {
    /// Visits every node in the hierarchy exactly once, depth-first,
    /// children in declaration order.
    pub fn for_each_node(&self, mut f: impl FnMut(&SceneNode)) {
        fn walk(node: &SceneNode, f: &mut impl FnMut(&SceneNode)) {
            f(node);
            for child in &node.children {
                walk(child, f);
            }
        }
        for root in &self.roots {
            walk(root, &mut f);
        }
    }

    /// Total triangle count over all mesh nodes.
    pub fn polygon_count(&self) -> u64 {
        let mut total = 0;
        self.for_each_node(|node| {
            if let NodeKind::Mesh(ref geometry) = node.kind {
                total += geometry.triangle_count;
            }
        });
        total
    }

    /// Number of mesh-bearing nodes.
    pub fn mesh_count(&self) -> u64 {
        let mut count = 0;
        self.for_each_node(|node| {
            if node.is_mesh() {
                count += 1;
            }
        });
        count
    }

    /// Bone nodes that have no bone ancestor, in traversal order.
    pub fn root_bones(&self) -> Vec<&SceneNode> {
        fn walk<'a>(node: &'a SceneNode, under_bone: bool, out: &mut Vec<&'a SceneNode>) {
            let is_bone = node.is_bone();
            if is_bone && !under_bone {
                out.push(node);
            }
            for child in &node.children {
                walk(child, under_bone || is_bone, out);
            }
        }
        let mut out = Vec::new();
        for root in &self.roots {
            walk(root, false, &mut out);
        }
        out
    }
}
