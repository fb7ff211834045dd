use glam::{Vec3, Vec4Swizzles};
use serial_test::serial;
use crate::log::LogSeverity;
use crate::prism3d::Engine;
use crate::test_utils::CapturingLogger;
use super::*;

fn assert_vec3_near(a: Vec3, b: Vec3) {
    assert!((a - b).length() < 1e-4, "{:?} != {:?}", a, b);
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_camera_new_looks_down_negative_z() {
    let camera = Camera::new(Vec3::new(0.0, 0.0, 5.0), 800, 600);
    assert_eq!(camera.position(), Vec3::new(0.0, 0.0, 5.0));
    assert_eq!(camera.fov(), DEFAULT_FOV);
    assert_vec3_near(camera.front(), Vec3::NEG_Z);
    assert_vec3_near(camera.right(), Vec3::X);
    assert_vec3_near(camera.up(), Vec3::Y);
}

#[test]
fn test_aspect_ratio() {
    let mut camera = Camera::new(Vec3::ZERO, 1920, 1080);
    assert!((camera.aspect_ratio() - 16.0 / 9.0).abs() < 1e-6);

    camera.set_viewport(640, 0);
    assert_eq!(camera.aspect_ratio(), 1.0);
}

// ============================================================================
// rotate_relative
// ============================================================================

#[test]
fn test_positive_yaw_turns_right() {
    let mut camera = Camera::default();
    camera.rotate_relative(90.0, 0.0, 0.0);
    assert_vec3_near(camera.front(), Vec3::X);
}

#[test]
fn test_positive_pitch_delta_looks_down() {
    let mut camera = Camera::default();
    camera.rotate_relative(0.0, 30.0, 0.0);
    assert_eq!(camera.pitch(), -30.0);
    assert!(camera.front().y < 0.0);
}

#[test]
fn test_pitch_is_clamped() {
    let mut camera = Camera::default();
    for _ in 0..100 {
        camera.rotate_relative(0.0, -50.0, 0.0);
    }
    assert_eq!(camera.pitch(), PITCH_LIMIT);

    for _ in 0..100 {
        camera.rotate_relative(0.0, 50.0, 0.0);
    }
    assert_eq!(camera.pitch(), -PITCH_LIMIT);
}

#[test]
fn test_front_stays_unit_length() {
    let mut camera = Camera::default();
    let mut seed = 12345u32;
    for _ in 0..1000 {
        seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12345);
        let d_yaw = (seed >> 16) as f32 % 720.0 - 360.0;
        seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12345);
        let d_pitch = (seed >> 16) as f32 % 360.0 - 180.0;
        camera.rotate_relative(d_yaw, d_pitch, 0.0);

        assert!((camera.front().length() - 1.0).abs() < 1e-5);
        assert!(camera.pitch() >= -PITCH_LIMIT && camera.pitch() <= PITCH_LIMIT);
    }
}

#[test]
#[serial]
fn test_roll_is_rejected_with_warning() {
    let logger = CapturingLogger::new();
    Engine::set_logger(logger.clone());

    let mut camera = Camera::default();
    let before = camera.clone();
    camera.rotate_relative(0.0, 0.0, 15.0);

    Engine::reset_logger();
    assert_eq!(camera, before);
    assert_eq!(logger.matching(LogSeverity::Warn, "d_roll = 15").len(), 1);
}

#[test]
fn test_set_rotation_clamps_pitch() {
    let mut camera = Camera::default();
    camera.set_rotation(120.0, 45.0, 0.0);
    assert_eq!(camera.pitch(), PITCH_LIMIT);
    assert_eq!(camera.yaw(), 45.0);
}

// ============================================================================
// move_relative
// ============================================================================

#[test]
fn test_move_relative_along_camera_axes() {
    let mut camera = Camera::default();
    camera.move_relative(0.0, 0.0, 2.0);
    assert_vec3_near(camera.position(), Vec3::new(0.0, 0.0, -2.0));

    camera.move_relative(1.0, 0.0, 0.0);
    assert_vec3_near(camera.position(), Vec3::new(1.0, 0.0, -2.0));

    camera.move_relative(0.0, 3.0, 0.0);
    assert_vec3_near(camera.position(), Vec3::new(1.0, 3.0, -2.0));
}

#[test]
fn test_move_forward_follows_yaw() {
    let mut camera = Camera::default();
    camera.rotate_relative(90.0, 0.0, 0.0);
    camera.move_relative(0.0, 0.0, 1.0);
    assert_vec3_near(camera.position(), Vec3::X);
}

// ============================================================================
// Matrices
// ============================================================================

#[test]
fn test_view_matrix_maps_eye_to_origin() {
    let camera = Camera::new(Vec3::new(1.0, 2.0, 3.0), 800, 600);
    let view = camera.view_matrix();
    assert_vec3_near(view.transform_point3(camera.position()), Vec3::ZERO);

    let ahead = camera.position() + camera.front() * 4.0;
    assert_vec3_near(view.transform_point3(ahead), Vec3::new(0.0, 0.0, -4.0));
}

#[test]
fn test_projection_maps_near_and_far_to_gl_depth() {
    let camera = Camera::new(Vec3::ZERO, 800, 600);
    let proj = camera.projection_matrix();

    let near = proj * glam::Vec4::new(0.0, 0.0, -NEAR_PLANE, 1.0);
    let far = proj * glam::Vec4::new(0.0, 0.0, -FAR_PLANE, 1.0);
    assert!((near.z / near.w + 1.0).abs() < 1e-4);
    assert!((far.z / far.w - 1.0).abs() < 1e-4);
}

#[test]
fn test_view_projection_is_projection_times_view() {
    let camera = Camera::new(Vec3::new(0.0, 0.0, 5.0), 1024, 768);
    let expected = camera.projection_matrix() * camera.view_matrix();
    assert_eq!(camera.view_projection_matrix(), expected);

    let clip = expected * Vec3::ZERO.extend(1.0);
    assert_vec3_near(clip.xyz() / clip.w * Vec3::new(1.0, 1.0, 0.0), Vec3::ZERO);
}
