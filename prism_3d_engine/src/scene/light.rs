/// Light sources: one directional light and a list of point lights per scene

use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirLight {
    /// Direction the light travels (not normalized)
    pub direction: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
}

impl Default for DirLight {
    fn default() -> Self {
        Self {
            direction: Vec3::new(-0.2, -1.0, -0.3),
            ambient: Vec3::splat(0.2),
            diffuse: Vec3::splat(0.5),
            specular: Vec3::splat(0.5),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    /// Attenuation `1 / (constant + linear * d + quadratic * d²)`
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
}

impl PointLight {
    /// Slot filler for unused shader array entries: contributes nothing
    pub const OFF: PointLight = PointLight {
        position: Vec3::ZERO,
        constant: 1.0,
        linear: 0.0,
        quadratic: 0.0,
        ambient: Vec3::ZERO,
        diffuse: Vec3::ZERO,
        specular: Vec3::ZERO,
    };

    /// White light at `position` with a ~50 unit range
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            constant: 1.0,
            linear: 0.09,
            quadratic: 0.032,
            ambient: Vec3::splat(0.05),
            diffuse: Vec3::splat(0.8),
            specular: Vec3::ONE,
        }
    }

    /// Attenuation factor at distance `d`
    pub fn attenuation(&self, d: f32) -> f32 {
        1.0 / (self.constant + self.linear * d + self.quadratic * d * d)
    }
}

impl Default for PointLight {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}
