/// Camera — yaw/pitch fly camera.
///
/// Orientation is stored as yaw and pitch in degrees; the front vector is
/// derived on demand, so it is always unit length. Yaw 0 / pitch 0 looks
/// down -Z and a positive yaw turns right (+X). There is no roll.

use glam::{Mat4, Vec3};
use crate::engine_warn;

/// Near clip plane distance
pub const NEAR_PLANE: f32 = 0.1;
/// Far clip plane distance
pub const FAR_PLANE: f32 = 100.0;
/// Pitch is clamped to [-PITCH_LIMIT, PITCH_LIMIT] degrees
pub const PITCH_LIMIT: f32 = 89.0;
/// Default vertical field of view in degrees
pub const DEFAULT_FOV: f32 = 45.0;
/// World up axis
pub const WORLD_UP: Vec3 = Vec3::Y;

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vec3,
    yaw: f32,
    pitch: f32,
    fov: f32,
    width: u32,
    height: u32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, 800, 600)
    }
}

impl Camera {
    /// Camera at `position` looking down -Z with the default FOV
    pub fn new(position: Vec3, width: u32, height: u32) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
            fov: DEFAULT_FOV,
            width,
            height,
        }
    }

    // ===== GETTERS =====

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Yaw in degrees
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Pitch in degrees, always within [-89, 89]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Vertical field of view in degrees
    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn viewport(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Width over height (1.0 for a degenerate viewport)
    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }

    /// Unit view direction
    pub fn front(&self) -> Vec3 {
        let (yaw_sin, yaw_cos) = self.yaw.to_radians().sin_cos();
        let (pitch_sin, pitch_cos) = self.pitch.to_radians().sin_cos();
        Vec3::new(yaw_sin * pitch_cos, pitch_sin, -yaw_cos * pitch_cos).normalize()
    }

    /// Unit right vector, `normalize(front × world_up)`
    pub fn right(&self) -> Vec3 {
        self.front().cross(WORLD_UP).normalize()
    }

    /// Camera-space up, `normalize(right × front)`
    pub fn up(&self) -> Vec3 {
        let front = self.front();
        front.cross(WORLD_UP).normalize().cross(front).normalize()
    }

    // ===== SETTERS =====

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn set_fov(&mut self, fov: f32) {
        self.fov = fov;
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// Absolute orientation in degrees (scene file camera record: rotX, rotY, rotZ)
    pub fn set_rotation(&mut self, pitch: f32, yaw: f32, roll: f32) {
        self.yaw = yaw;
        self.pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        if roll != 0.0 {
            engine_warn!("prism3d::Camera", "Roll is not supported, ignoring roll = {}", roll);
        }
    }

    // ===== MOVEMENT =====

    /// Move along the camera axes: `dx` right, `dy` up, `dz` forward
    pub fn move_relative(&mut self, dx: f32, dy: f32, dz: f32) {
        let front = self.front();
        let right = front.cross(WORLD_UP).normalize();
        let up = right.cross(front).normalize();
        self.position += front * dz + right * dx + up * dy;
    }

    /// Turn by degree deltas
    ///
    /// Yaw accumulates unbounded. A positive `d_pitch` looks down (mouse
    /// convention) and the result is clamped to [-89, 89]. Roll is
    /// rejected: a nonzero `d_roll` is logged and ignored.
    pub fn rotate_relative(&mut self, d_yaw: f32, d_pitch: f32, d_roll: f32) {
        self.yaw += d_yaw;
        self.pitch = (self.pitch - d_pitch).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        if d_roll != 0.0 {
            engine_warn!("prism3d::Camera", "Roll is not supported, ignoring d_roll = {}", d_roll);
        }
    }

    // ===== MATRICES =====

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front(), WORLD_UP)
    }

    /// OpenGL-style perspective projection (depth in [-1, 1])
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov.to_radians(), self.aspect_ratio(), NEAR_PLANE, FAR_PLANE)
    }

    /// `projection * view`
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
