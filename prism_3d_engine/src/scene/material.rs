/// Per-node surface parameters

/// Specular exponent used when a scene does not give one
pub const DEFAULT_SHININESS: f32 = 32.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Specular exponent
    pub shininess: f32,
    /// Select the animated UV-noise shader path
    pub distort: bool,
    /// Diffuse texture path; empty means a generated flat color
    pub diffuse_texture: String,
    /// Specular texture path; empty means a generated flat color
    pub specular_texture: String,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            shininess: DEFAULT_SHININESS,
            distort: false,
            diffuse_texture: String::new(),
            specular_texture: String::new(),
        }
    }
}

impl Material {
    pub fn with_textures(diffuse: impl Into<String>, specular: impl Into<String>) -> Self {
        Self {
            diffuse_texture: diffuse.into(),
            specular_texture: specular.into(),
            ..Default::default()
        }
    }
}
