//! Resource module — textures and meshes
//!
//! - `bmp`: BMP decoding into GPU-ready pixel rows
//! - `TextureCache`: path-keyed lazy texture loader with generated fallbacks
//! - `Mesh`: cube / sphere / custom geometry with lazily uploaded GPU buffers

pub mod bmp;
pub mod texture_cache;
pub mod mesh;

pub use bmp::BmpImage;
pub use texture_cache::{
    Texture, TextureCache, TextureKey, TextureSource, synthetic_key, DEFAULT_SEARCH_PATHS,
};
pub use mesh::{Mesh, MeshKey, MeshKind, Vertex, FLOATS_PER_VERTEX, LEGACY_SPHERE_RADIUS, MAX_SPHERE_SLICES};
