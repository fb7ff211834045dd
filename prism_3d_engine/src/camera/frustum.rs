/// Frustum — six clipping planes for visibility culling.
///
/// Planes are extracted from `projection * view` with the Gribb & Hartmann
/// method. They are kept unnormalized: the box test only looks at the sign
/// of `dot(normal, p) + distance`, which positive scaling does not change.
/// Use `Plane::normalized()` when a metric distance is needed.

use glam::{Mat4, Vec3};
use crate::scene::AABB;
use super::Camera;

/// Frustum plane indices
pub const PLANE_LEFT: usize = 0;
pub const PLANE_RIGHT: usize = 1;
pub const PLANE_BOTTOM: usize = 2;
pub const PLANE_TOP: usize = 3;
pub const PLANE_NEAR: usize = 4;
pub const PLANE_FAR: usize = 5;

/// Plane `dot(normal, p) + distance = 0`, normal pointing inside
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub distance: f32,
}

impl Plane {
    /// Row 3 of `m` plus (`positive`) or minus one of rows 0..=2
    pub fn from_matrix(m: &Mat4, axis: usize, positive: bool) -> Self {
        let c = m.to_cols_array_2d();
        let s = if positive { 1.0 } else { -1.0 };
        Self {
            normal: Vec3::new(
                c[0][3] + s * c[0][axis],
                c[1][3] + s * c[1][axis],
                c[2][3] + s * c[2][axis],
            ),
            distance: c[3][3] + s * c[3][axis],
        }
    }

    /// Same plane with a unit normal
    pub fn normalized(&self) -> Self {
        let len = self.normal.length();
        if len > 0.0 {
            Self { normal: self.normal / len, distance: self.distance / len }
        } else {
            *self
        }
    }

    /// Signed value of the plane equation at `point`
    pub fn evaluate(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.distance
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Frustum {
    /// left, right, bottom, top, near, far
    pub planes: [Plane; 6],
}

impl Frustum {
    /// Extract the six planes of a combined `projection * view` matrix
    pub fn from_view_projection(vp: &Mat4) -> Self {
        Self {
            planes: [
                Plane::from_matrix(vp, 0, true),
                Plane::from_matrix(vp, 0, false),
                Plane::from_matrix(vp, 1, true),
                Plane::from_matrix(vp, 1, false),
                Plane::from_matrix(vp, 2, true),
                Plane::from_matrix(vp, 2, false),
            ],
        }
    }

    /// Frustum of the camera at its current aspect ratio
    pub fn from_camera(camera: &Camera) -> Self {
        Self::from_view_projection(&camera.view_projection_matrix())
    }

    /// Conservative box test (positive vertex).
    ///
    /// For each plane, take the box corner furthest along the normal; if that
    /// corner is outside, the box is fully outside. May report boxes near the
    /// frustum corners as visible, never rejects a visible box.
    pub fn is_box_in_frustum(&self, min: Vec3, max: Vec3) -> bool {
        self.planes.iter().all(|plane| {
            let p = Vec3::new(
                if plane.normal.x >= 0.0 { max.x } else { min.x },
                if plane.normal.y >= 0.0 { max.y } else { min.y },
                if plane.normal.z >= 0.0 { max.z } else { min.z },
            );
            plane.evaluate(p) >= 0.0
        })
    }

    pub fn intersects_aabb(&self, aabb: &AABB) -> bool {
        self.is_box_in_frustum(aabb.min, aabb.max)
    }
}

#[cfg(test)]
#[path = "frustum_tests.rs"]
mod tests;
