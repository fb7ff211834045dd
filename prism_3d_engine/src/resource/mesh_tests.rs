use glam::Vec3;
use crate::error::Error;
use crate::graphics_device::mock_graphics_device::{MockGraphicsDevice, MockProgram};
use crate::graphics_device::{GraphicsDevice, UniformValue};
use crate::resource::{synthetic_key, TextureCache};
use super::*;

fn device_with_program() -> MockGraphicsDevice {
    let mut device = MockGraphicsDevice::new();
    device.use_program(&MockProgram::new("builtin")).unwrap();
    device
}

// ============================================================================
// Cube
// ============================================================================

#[test]
fn test_cube_counts_and_bounds() {
    let cube = Mesh::cube();
    assert_eq!(cube.kind(), MeshKind::Cube);
    assert_eq!(cube.vertex_count(), 24);
    assert_eq!(cube.index_count(), 36);
    assert_eq!(cube.triangle_count(), 12);
    assert_eq!(cube.aabb().min, Vec3::splat(-0.5));
    assert_eq!(cube.aabb().max, Vec3::splat(0.5));
}

#[test]
fn test_cube_triangles_face_outward() {
    let cube = Mesh::cube();
    let v = cube.vertices();
    for tri in cube.indices().chunks(3) {
        let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| Vec3::from(v[i as usize].position));
        let face_normal = (b - a).cross(c - a);
        let vertex_normal = Vec3::from(v[tri[0] as usize].normal);
        assert!(face_normal.dot(vertex_normal) > 0.0, "triangle {:?} faces inward", tri);
    }
}

#[test]
fn test_cube_faces_share_normals_and_uvs_stay_in_range() {
    let cube = Mesh::cube();
    for face in cube.vertices().chunks(4) {
        assert!(face.iter().all(|v| v.normal == face[0].normal));
        assert!((Vec3::from(face[0].normal).length() - 1.0).abs() < 1e-6);
        for v in face {
            assert!((0.0..=1.0).contains(&v.uv[0]) && (0.0..=1.0).contains(&v.uv[1]));
        }
    }
}

// ============================================================================
// Sphere
// ============================================================================

#[test]
fn test_sphere_vertex_and_index_counts() {
    for (v, h) in [(1, 1), (2, 3), (8, 16), (32, 32), (5, 40)] {
        let sphere = Mesh::sphere(v, h);
        assert_eq!(sphere.vertex_count(), ((v + 1) * (h + 1)) as usize);
        assert_eq!(sphere.index_count(), (v * h * 6) as usize);
        assert_eq!(sphere.kind(), MeshKind::Sphere { v_slices: v, h_slices: h });
    }
}

#[test]
fn test_sphere_zero_slices_are_raised() {
    let sphere = Mesh::sphere(0, 0);
    assert_eq!(sphere.kind(), MeshKind::Sphere { v_slices: 1, h_slices: 1 });
    assert!(sphere.vertices().iter().all(|v| v.position.iter().all(|c| c.is_finite())));
}

#[test]
fn test_sphere_huge_slice_counts_are_clamped() {
    let sphere = Mesh::sphere(u32::MAX, 2);
    assert_eq!(sphere.kind(), MeshKind::Sphere { v_slices: MAX_SPHERE_SLICES, h_slices: 2 });
    assert_eq!(sphere.vertex_count(), (MAX_SPHERE_SLICES as usize + 1) * 3);
    assert_eq!(sphere.index_count(), MAX_SPHERE_SLICES as usize * 2 * 6);
    assert!(sphere.indices().iter().all(|&i| (i as usize) < sphere.vertex_count()));
}

#[test]
fn test_sphere_is_unit_radius_by_default() {
    let sphere = Mesh::sphere(16, 16);
    for v in sphere.vertices() {
        assert!((Vec3::from(v.position).length() - 1.0).abs() < 1e-5);
        assert!((Vec3::from(v.normal).length() - 1.0).abs() < 1e-5);
        assert!((0.0..=1.0).contains(&v.uv[0]) && (0.0..=1.0).contains(&v.uv[1]));
    }
    assert!((sphere.aabb().max.y - 1.0).abs() < 1e-5);
    assert!((sphere.aabb().min.y + 1.0).abs() < 1e-5);
}

#[test]
fn test_legacy_sphere_radius() {
    let sphere = Mesh::sphere_with_radius(8, 8, LEGACY_SPHERE_RADIUS);
    for v in sphere.vertices() {
        assert!((Vec3::from(v.position).length() - LEGACY_SPHERE_RADIUS).abs() < 1e-5);
        // Normals are not scaled
        assert!((Vec3::from(v.normal).length() - 1.0).abs() < 1e-5);
    }
}

#[test]
fn test_sphere_quad_winding() {
    let h = 4;
    let sphere = Mesh::sphere(3, h);
    let cols = h + 1;
    assert_eq!(&sphere.indices()[..6], &[0, 1, cols, cols, 1, cols + 1]);
    assert!(sphere.indices().iter().all(|&i| (i as usize) < sphere.vertex_count()));
}

// ============================================================================
// Custom
// ============================================================================

#[test]
fn test_custom_mesh() {
    let floats = [
        0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0,
        2.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 0.0,
        0.0, 3.0, -1.0, 0.0, 0.0, 1.0, 0.0, 1.0,
    ];
    let mesh = Mesh::custom(&floats, vec![0, 1, 2]).unwrap();
    assert_eq!(mesh.kind(), MeshKind::Custom);
    assert_eq!(mesh.vertex_count(), 3);
    assert_eq!(mesh.vertices()[1].uv, [1.0, 0.0]);
    assert_eq!(mesh.aabb().min, Vec3::new(0.0, 0.0, -1.0));
    assert_eq!(mesh.aabb().max, Vec3::new(2.0, 3.0, 0.0));
}

#[test]
fn test_custom_mesh_rejects_bad_stride() {
    let floats = [0.0f32; 12];
    assert!(matches!(Mesh::custom(&floats, vec![0, 0, 0]), Err(Error::InvalidResource(_))));
}

#[test]
fn test_custom_mesh_rejects_bad_indices() {
    let floats = [0.0f32; 16];
    assert!(Mesh::custom(&floats, vec![0, 1, 2]).is_err());
    assert!(Mesh::custom(&floats, vec![0, 1]).is_err());
    assert!(Mesh::custom(&[], vec![]).is_err());
}

// ============================================================================
// Upload and draw
// ============================================================================

#[test]
fn test_upload_is_lazy_and_once() {
    let mut device = device_with_program();
    let cache = TextureCache::new();
    let mut cube = Mesh::cube();
    assert!(!cube.is_uploaded());

    cube.draw(&mut device, &cache).unwrap();
    cube.draw(&mut device, &cache).unwrap();
    assert!(cube.is_uploaded());
    assert_eq!(device.created_meshes, 1);

    cube.release_gpu();
    cube.draw(&mut device, &cache).unwrap();
    assert_eq!(device.created_meshes, 2);
}

#[test]
fn test_draw_without_textures() {
    let mut device = device_with_program();
    let cache = TextureCache::new();
    let mut cube = Mesh::cube();
    cube.draw(&mut device, &cache).unwrap();

    assert_eq!(device.count_commands("bind_texture"), 0);
    assert_eq!(device.uniform("useTexture"), Some(UniformValue::Bool(false)));
    assert_eq!(device.uniform("useSpecularTexture"), Some(UniformValue::Bool(false)));
    assert_eq!(device.draws[0].index_count, 36);
    assert_eq!(device.commands.last().unwrap(), "bind_mesh(none)");
}

#[test]
fn test_draw_binds_and_unbinds_both_units() {
    let mut device = device_with_program();
    let mut cache = TextureCache::new();
    let mut cube = Mesh::cube();
    cube.diffuse = Some(cache.resolve(&mut device, "", Vec3::ONE).unwrap());
    cube.specular = Some(cache.resolve(&mut device, "", Vec3::splat(0.5)).unwrap());

    cube.draw(&mut device, &cache).unwrap();

    let draw = &device.draws[0];
    assert_eq!(draw.textures[0].as_deref(), Some(synthetic_key(Vec3::ONE).as_str()));
    assert_eq!(draw.textures[1].as_deref(), Some(synthetic_key(Vec3::splat(0.5)).as_str()));
    assert_eq!(draw.use_texture, Some(true));
    assert_eq!(draw.use_specular_texture, Some(true));
    assert_eq!(device.uniform("material.diffuse"), Some(UniformValue::Int(0)));
    assert_eq!(device.uniform("material.specular"), Some(UniformValue::Int(1)));

    let n = device.commands.len();
    assert_eq!(
        &device.commands[n - 4..],
        &["draw_indexed(36)", "bind_texture(0, none)", "bind_texture(1, none)", "bind_mesh(none)"]
    );
}

#[test]
fn test_draw_with_evicted_texture_is_untextured() {
    let mut device = device_with_program();
    let mut cache = TextureCache::new();
    let mut cube = Mesh::cube();
    cube.diffuse = Some(cache.resolve(&mut device, "", Vec3::ONE).unwrap());
    cache.clear();

    cube.draw(&mut device, &cache).unwrap();
    assert_eq!(device.draws[0].use_texture, Some(false));
    assert_eq!(device.draws[0].textures[0], None);
}
