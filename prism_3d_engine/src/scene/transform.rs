/// Node transform: translation, Euler rotation (degrees, X then Y then Z)
/// and non-uniform scale.

use glam::{Mat4, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Euler angles in degrees
    pub rotation: Vec3,
    /// Every component must be nonzero
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn new(position: Vec3, rotation: Vec3, scale: Vec3) -> Self {
        Self { position, rotation, scale }
    }

    pub fn from_position(position: Vec3) -> Self {
        Self { position, ..Default::default() }
    }

    /// `T * Rx * Ry * Rz * S`
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * Mat4::from_rotation_x(self.rotation.x.to_radians())
            * Mat4::from_rotation_y(self.rotation.y.to_radians())
            * Mat4::from_rotation_z(self.rotation.z.to_radians())
            * Mat4::from_scale(self.scale)
    }

    /// Inverse-transpose of `matrix()`, for transforming normals
    pub fn normal_matrix(&self) -> Mat4 {
        self.matrix().inverse().transpose()
    }

    /// A zero scale component collapses the bounding box and the normal matrix
    pub fn has_valid_scale(&self) -> bool {
        self.scale.x != 0.0 && self.scale.y != 0.0 && self.scale.z != 0.0
    }
}

#[cfg(test)]
#[path = "transform_tests.rs"]
mod tests;
