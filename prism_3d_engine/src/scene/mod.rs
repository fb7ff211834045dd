//! Scene data model and scene file loader
//!
//! A scene is a flat, ordered list of nodes (mesh handle + transform +
//! material) plus a camera, a sky color, one directional light and any
//! number of point lights. There is no parenting.

mod aabb;
mod transform;
mod light;
mod material;
mod scene_node;
mod scene;
mod scene_loader;

pub use aabb::AABB;
pub use transform::Transform;
pub use light::{DirLight, PointLight};
pub use material::{Material, DEFAULT_SHININESS};
pub use scene_node::{SceneNode, ResolvedTextures};
pub use scene::{Scene, DEFAULT_SKY_COLOR};
pub use scene_loader::{
    SceneLoader, SceneDescription, CameraRecord, NodeRecord, PrimitiveKind, FORMAT_MARKER,
};
