//! Scene model for stagecheck.
//!
//! Imports a glTF/GLB asset into an immutable [`SceneSnapshot`]: a tree of
//! transform nodes (group, mesh or bone), the material and texture tables,
//! the animation clips, and the raw declaration-order name lists. Validation
//! rules only ever read the snapshot; nothing here is mutated after import.
//!
//! # Example
//!
//! ```no_run
//! use stagecheck_scene::{import_slice, ResourceBundle};
//!
//! let bytes = std::fs::read("model.glb").unwrap();
//! let snapshot = import_slice(&bytes, &ResourceBundle::new()).unwrap();
//! println!("{} triangles across {} meshes", snapshot.polygon_count(), snapshot.mesh_count());
//! ```

pub mod animation;
pub mod import;
pub mod resources;
pub mod snapshot;

pub use animation::{AnimationClip, Track, TrackProperty};
pub use import::{import_slice, ImportError};
pub use resources::ResourceBundle;
pub use snapshot::{Material, MeshGeometry, NodeKind, RawNames, SceneNode, SceneSnapshot, Texture};
