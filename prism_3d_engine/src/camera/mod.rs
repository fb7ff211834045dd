//! Camera module — fly camera and view frustum.
//!
//! The camera is owned by the scene and mutated by input handling between
//! frames; the renderer reads it once per frame and derives a frustum.

mod camera;
mod frustum;

pub use camera::{Camera, NEAR_PLANE, FAR_PLANE, PITCH_LIMIT, DEFAULT_FOV, WORLD_UP};
pub use frustum::{
    Frustum, Plane,
    PLANE_LEFT, PLANE_RIGHT, PLANE_BOTTOM, PLANE_TOP, PLANE_NEAR, PLANE_FAR,
};
