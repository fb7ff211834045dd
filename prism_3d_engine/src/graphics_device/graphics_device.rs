/// GraphicsDevice trait - the GPU function table used by the renderer

use std::fmt;
use std::sync::Arc;
use bitflags::bitflags;
use glam::{Mat4, Vec3};

use crate::error::Result;
use crate::graphics_device::{GpuTexture, GpuMesh, ShaderProgram, TextureDesc, VertexLayout};

bitflags! {
    /// Buffers to clear at the start of a frame
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ClearFlags: u32 {
        /// Color buffer
        const COLOR = 1 << 0;
        /// Depth buffer
        const DEPTH = 1 << 1;
    }
}

/// A value bound to a named shader uniform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Bool(bool),
    Int(i32),
    Float(f32),
    Vec3(Vec3),
    Mat4(Mat4),
}

impl UniformValue {
    /// The contained Vec3, if this is a Vec3 uniform
    pub fn as_vec3(&self) -> Option<Vec3> {
        match self {
            UniformValue::Vec3(v) => Some(*v),
            _ => None,
        }
    }

    /// The contained f32, if this is a Float uniform
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            UniformValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// The contained i32, if this is an Int uniform
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            UniformValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// The contained bool, if this is a Bool uniform
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            UniformValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// The contained Mat4, if this is a Mat4 uniform
    pub fn as_mat4(&self) -> Option<Mat4> {
        match self {
            UniformValue::Mat4(m) => Some(*m),
            _ => None,
        }
    }
}

/// Strings reported by the driver after initialization
#[derive(Debug, Clone, Default)]
pub struct DeviceInfo {
    pub vendor: String,
    pub renderer: String,
    pub version: String,
    pub shading_language_version: String,
}

impl fmt::Display for DeviceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} / {} / {} / GLSL {}",
            self.vendor, self.renderer, self.version, self.shading_language_version
        )
    }
}

// ============================================================================
// GraphicsDevice trait
// ============================================================================

/// Main graphics device trait
///
/// Immediate-mode interface mirroring what the per-frame pipeline needs:
/// clear, bind a program, set uniforms, bind textures and a mesh, draw.
/// Implemented by backend-specific devices; window and context creation
/// happen before a device is handed to the renderer.
pub trait GraphicsDevice: Send + Sync {
    /// Load the function table and report driver information
    ///
    /// Called exactly once by `Renderer::init`. Failure is fatal.
    fn initialize(&mut self) -> Result<DeviceInfo>;

    /// Set the viewport rectangle (origin at 0,0)
    fn set_viewport(&mut self, width: u32, height: u32) -> Result<()>;

    /// Enable or disable depth testing
    fn set_depth_test(&mut self, enabled: bool) -> Result<()>;

    /// Clear the selected buffers; `color` is used for the color buffer
    fn clear(&mut self, color: Vec3, flags: ClearFlags) -> Result<()>;

    /// Make `program` the target of subsequent `set_uniform` calls
    fn use_program(&mut self, program: &Arc<dyn ShaderProgram>) -> Result<()>;

    /// Set a uniform on the active program
    ///
    /// Unknown names are ignored by the backend, like `glUniform*` with
    /// location -1.
    fn set_uniform(&mut self, name: &str, value: UniformValue) -> Result<()>;

    /// Upload a 2D texture
    fn create_texture(&mut self, desc: &TextureDesc) -> Result<Arc<dyn GpuTexture>>;

    /// Bind a texture to a texture unit, or unbind with `None`
    fn bind_texture(&mut self, unit: u32, texture: Option<&Arc<dyn GpuTexture>>) -> Result<()>;

    /// Upload interleaved vertex data and a u32 index list
    fn create_mesh(
        &mut self,
        vertices: &[u8],
        indices: &[u32],
        layout: &VertexLayout,
    ) -> Result<Arc<dyn GpuMesh>>;

    /// Bind a mesh (vertex array), or unbind with `None`
    fn bind_mesh(&mut self, mesh: Option<&Arc<dyn GpuMesh>>) -> Result<()>;

    /// Draw `index_count` indices of the bound mesh as a triangle list
    fn draw_indexed(&mut self, index_count: u32) -> Result<()>;
}
