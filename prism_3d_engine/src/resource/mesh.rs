//! Mesh geometry: cube, UV sphere or custom vertex/index data.
//!
//! Vertices are interleaved `position(3) normal(3) uv(2)` floats. The local
//! bounding box is computed once at construction; geometry is immutable
//! afterwards. GPU buffers are created on first draw.
//!
//! The two texture slots are non-owning handles into the `TextureCache`,
//! assigned by the renderer before each draw.

use std::fmt;
use std::sync::Arc;
use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use slotmap::new_key_type;
use crate::error::{Error, Result};
use crate::graphics_device::{GraphicsDevice, GpuMesh, UniformValue, VertexLayout};
use crate::resource::{TextureCache, TextureKey};
use crate::scene::AABB;
use crate::engine_trace;

/// Floats per interleaved vertex
pub const FLOATS_PER_VERTEX: usize = 8;

/// Sphere radius produced by older scene content (positions divided by π)
pub const LEGACY_SPHERE_RADIUS: f32 = 1.0 / std::f32::consts::PI;

/// Upper bound on sphere slice counts; keeps vertex indices within `u32`
pub const MAX_SPHERE_SLICES: u32 = 1024;

/// Texture unit of the diffuse map
const DIFFUSE_UNIT: u32 = 0;
/// Texture unit of the specular map
const SPECULAR_UNIT: u32 = 1;

new_key_type! {
    /// Stable handle to a mesh in a scene's mesh pool
    pub struct MeshKey;
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    pub fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self { position, normal, uv }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshKind {
    Cube,
    Sphere { v_slices: u32, h_slices: u32 },
    Custom,
}

pub struct Mesh {
    kind: MeshKind,
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    aabb: AABB,
    /// Diffuse map bound to unit 0
    pub diffuse: Option<TextureKey>,
    /// Specular map bound to unit 1
    pub specular: Option<TextureKey>,
    gpu: Option<Arc<dyn GpuMesh>>,
}

// ============================================================================
// CONSTRUCTION
// ============================================================================

impl Mesh {
    fn from_parts(kind: MeshKind, vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        let aabb = AABB::from_points(vertices.iter().map(|v| Vec3::from(v.position)))
            .unwrap_or(AABB::new(Vec3::ZERO, Vec3::ZERO));
        Self {
            kind,
            vertices,
            indices,
            aabb,
            diffuse: None,
            specular: None,
            gpu: None,
        }
    }

    /// Unit cube centered on the origin: 24 vertices (4 per face, per-face
    /// normals) and 36 indices, UVs laid out as a cross
    pub fn cube() -> Self {
        #[rustfmt::skip]
        const FACES: [([f32; 3], [[f32; 3]; 4], [[f32; 2]; 4]); 6] = [
            // front (+Z)
            ([0.0, 0.0, 1.0],
             [[-0.5, -0.5, 0.5], [-0.5, 0.5, 0.5], [0.5, 0.5, 0.5], [0.5, -0.5, 0.5]],
             [[0.25, 0.5], [0.25, 0.75], [0.5, 0.75], [0.5, 0.5]]),
            // back (-Z)
            ([0.0, 0.0, -1.0],
             [[-0.5, -0.5, -0.5], [-0.5, 0.5, -0.5], [0.5, 0.5, -0.5], [0.5, -0.5, -0.5]],
             [[0.75, 0.5], [0.75, 0.75], [1.0, 0.75], [1.0, 0.5]]),
            // left (-X)
            ([-1.0, 0.0, 0.0],
             [[-0.5, -0.5, -0.5], [-0.5, 0.5, -0.5], [-0.5, 0.5, 0.5], [-0.5, -0.5, 0.5]],
             [[0.0, 0.5], [0.0, 0.75], [0.25, 0.75], [0.25, 0.5]]),
            // right (+X)
            ([1.0, 0.0, 0.0],
             [[0.5, -0.5, 0.5], [0.5, 0.5, 0.5], [0.5, 0.5, -0.5], [0.5, -0.5, -0.5]],
             [[0.5, 0.5], [0.5, 0.75], [0.75, 0.75], [0.75, 0.5]]),
            // top (+Y)
            ([0.0, 1.0, 0.0],
             [[-0.5, 0.5, 0.5], [-0.5, 0.5, -0.5], [0.5, 0.5, -0.5], [0.5, 0.5, 0.5]],
             [[0.25, 0.75], [0.25, 1.0], [0.5, 1.0], [0.5, 0.75]]),
            // bottom (-Y)
            ([0.0, -1.0, 0.0],
             [[-0.5, -0.5, 0.5], [-0.5, -0.5, -0.5], [0.5, -0.5, -0.5], [0.5, -0.5, 0.5]],
             [[0.25, 0.25], [0.25, 0.5], [0.5, 0.5], [0.5, 0.25]]),
        ];
        // Counter-clockwise seen from outside
        #[rustfmt::skip]
        const INDICES: [u32; 36] = [
            2, 1, 0, 0, 3, 2,
            4, 5, 6, 6, 7, 4,
            10, 9, 8, 8, 11, 10,
            14, 13, 12, 12, 15, 14,
            18, 17, 16, 16, 19, 18,
            20, 21, 22, 22, 23, 20,
        ];

        let vertices = FACES
            .iter()
            .flat_map(|(normal, positions, uvs)| {
                positions.iter().zip(uvs).map(move |(p, uv)| Vertex::new(*p, *normal, *uv))
            })
            .collect();
        Self::from_parts(MeshKind::Cube, vertices, INDICES.to_vec())
    }

    /// Unit-radius UV sphere
    pub fn sphere(v_slices: u32, h_slices: u32) -> Self {
        Self::sphere_with_radius(v_slices, h_slices, 1.0)
    }

    /// UV sphere with `(v+1)(h+1)` vertices and `v*h*6` indices
    ///
    /// Latitude θ = π·v/V runs from the +Y pole, longitude φ = 2π·h/H.
    /// Poles and the seam repeat vertices so UVs stay continuous; the pole
    /// triangles are degenerate. Slice counts are clamped to
    /// `1..=MAX_SPHERE_SLICES`.
    pub fn sphere_with_radius(v_slices: u32, h_slices: u32, radius: f32) -> Self {
        let v_slices = v_slices.clamp(1, MAX_SPHERE_SLICES);
        let h_slices = h_slices.clamp(1, MAX_SPHERE_SLICES);
        let columns = h_slices + 1;

        let mut vertices = Vec::with_capacity((v_slices as usize + 1) * columns as usize);
        for v in 0..=v_slices {
            let theta = std::f32::consts::PI * v as f32 / v_slices as f32;
            for h in 0..=h_slices {
                let phi = std::f32::consts::TAU * h as f32 / h_slices as f32;
                let unit = Vec3::new(theta.sin() * phi.cos(), theta.cos(), theta.sin() * phi.sin());
                vertices.push(Vertex::new(
                    (unit * radius).to_array(),
                    unit.to_array(),
                    [phi / std::f32::consts::TAU, theta / std::f32::consts::PI],
                ));
            }
        }

        let mut indices = Vec::with_capacity(v_slices as usize * h_slices as usize * 6);
        for v in 0..v_slices {
            for h in 0..h_slices {
                let v0 = v * columns + h;
                let v1 = v0 + 1;
                let v2 = v0 + columns;
                let v3 = v2 + 1;
                indices.extend_from_slice(&[v0, v1, v2, v2, v1, v3]);
            }
        }

        Self::from_parts(MeshKind::Sphere { v_slices, h_slices }, vertices, indices)
    }

    /// Mesh from interleaved floats (stride `FLOATS_PER_VERTEX`) and indices
    pub fn custom(vertices: &[f32], indices: Vec<u32>) -> Result<Self> {
        let typed: &[Vertex] = bytemuck::try_cast_slice(vertices).map_err(|_| {
            Error::InvalidResource(format!(
                "custom mesh has {} floats, expected a multiple of {}",
                vertices.len(), FLOATS_PER_VERTEX
            ))
        })?;
        Self::from_vertices(typed.to_vec(), indices)
    }

    /// Mesh from typed vertices and indices
    pub fn from_vertices(vertices: Vec<Vertex>, indices: Vec<u32>) -> Result<Self> {
        if indices.len() % 3 != 0 {
            return Err(Error::InvalidResource(format!(
                "index count {} is not a multiple of 3", indices.len()
            )));
        }
        if let Some(bad) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
            return Err(Error::InvalidResource(format!(
                "index {} out of range for {} vertices", bad, vertices.len()
            )));
        }
        if vertices.is_empty() {
            return Err(Error::InvalidResource("custom mesh has no vertices".to_string()));
        }
        Ok(Self::from_parts(MeshKind::Custom, vertices, indices))
    }
}

// ============================================================================
// ACCESSORS
// ============================================================================

impl Mesh {
    pub fn kind(&self) -> MeshKind {
        self.kind
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Local-space bounding box
    pub fn aabb(&self) -> &AABB {
        &self.aabb
    }

    /// Whether GPU buffers exist
    pub fn is_uploaded(&self) -> bool {
        self.gpu.is_some()
    }

    /// Drop the GPU buffers; they are recreated on the next draw
    pub fn release_gpu(&mut self) {
        self.gpu = None;
    }
}

// ============================================================================
// GPU
// ============================================================================

impl Mesh {
    /// Create GPU buffers if they do not exist yet
    pub fn upload(&mut self, device: &mut dyn GraphicsDevice) -> Result<Arc<dyn GpuMesh>> {
        if let Some(gpu) = &self.gpu {
            return Ok(Arc::clone(gpu));
        }
        let gpu = device.create_mesh(
            bytemuck::cast_slice(&self.vertices),
            &self.indices,
            &VertexLayout::position_normal_uv(),
        )?;
        engine_trace!(
            "prism3d::Mesh",
            "Uploaded {:?} mesh ({} vertices, {} indices)",
            self.kind, self.vertices.len(), self.indices.len()
        );
        self.gpu = Some(Arc::clone(&gpu));
        Ok(gpu)
    }

    /// Issue the indexed draw with the current texture slots
    ///
    /// The program must already be bound. A slot whose handle is empty or
    /// no longer in `textures` is drawn untextured (`useTexture` /
    /// `useSpecularTexture` false).
    pub fn draw(&mut self, device: &mut dyn GraphicsDevice, textures: &TextureCache) -> Result<()> {
        let gpu = self.upload(device)?;
        let diffuse = self.diffuse.and_then(|k| textures.get(k)).map(|t| t.gpu());
        let specular = self.specular.and_then(|k| textures.get(k)).map(|t| t.gpu());

        device.bind_mesh(Some(&gpu))?;

        device.set_uniform("useTexture", UniformValue::Bool(diffuse.is_some()))?;
        if let Some(texture) = diffuse {
            device.set_uniform("material.diffuse", UniformValue::Int(DIFFUSE_UNIT as i32))?;
            device.bind_texture(DIFFUSE_UNIT, Some(texture))?;
        }
        device.set_uniform("useSpecularTexture", UniformValue::Bool(specular.is_some()))?;
        if let Some(texture) = specular {
            device.set_uniform("material.specular", UniformValue::Int(SPECULAR_UNIT as i32))?;
            device.bind_texture(SPECULAR_UNIT, Some(texture))?;
        }

        device.draw_indexed(self.indices.len() as u32)?;

        if diffuse.is_some() {
            device.bind_texture(DIFFUSE_UNIT, None)?;
        }
        if specular.is_some() {
            device.bind_texture(SPECULAR_UNIT, None)?;
        }
        device.bind_mesh(None)
    }
}

impl fmt::Debug for Mesh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mesh")
            .field("kind", &self.kind)
            .field("vertices", &self.vertices.len())
            .field("indices", &self.indices.len())
            .field("aabb", &self.aabb)
            .field("diffuse", &self.diffuse)
            .field("specular", &self.specular)
            .field("uploaded", &self.gpu.is_some())
            .finish()
    }
}

#[cfg(test)]
#[path = "mesh_tests.rs"]
mod tests;
