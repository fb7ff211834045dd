/// Renderer configuration

use std::path::PathBuf;
use glam::Vec3;
use crate::resource::DEFAULT_SEARCH_PATHS;

/// Size of the point light array declared by the stock fragment shader
pub const POINT_LIGHTS_MAX: usize = 8;

/// Renderer configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Viewport width in pixels
    pub width: u32,
    /// Viewport height in pixels
    pub height: u32,
    /// Point light slots uploaded every frame; must match the shader's array size
    pub max_point_lights: usize,
    /// Directories probed, in order, for texture paths
    pub texture_search_paths: Vec<PathBuf>,
    /// Flat color for nodes without a diffuse texture
    pub default_diffuse_color: Vec3,
    /// Flat color for nodes without a specular texture
    pub default_specular_color: Vec3,
    /// Sphere tessellation (vertical, horizontal) for scenes built from files
    pub sphere_slices: (u32, u32),
    /// Application name
    pub app_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            max_point_lights: POINT_LIGHTS_MAX,
            texture_search_paths: DEFAULT_SEARCH_PATHS.iter().map(PathBuf::from).collect(),
            default_diffuse_color: Vec3::ONE,
            default_specular_color: Vec3::splat(0.5),
            sphere_slices: (32, 32),
            app_name: "Prism3D Application".to_string(),
        }
    }
}
