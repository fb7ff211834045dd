/// Mock graphics device for unit tests (no GPU required)
///
/// Records every call as a command string, remembers the last value of each
/// uniform and snapshots the bound state at each draw, so renderer and
/// resource tests can assert on what would have reached the GPU.

use std::sync::Arc;
use glam::{Mat4, Vec3};
use rustc_hash::FxHashMap;

use crate::graphics_device::{
    GraphicsDevice, GpuTexture, GpuMesh, ShaderProgram, DeviceInfo,
    ClearFlags, UniformValue, TextureDesc, TextureFormat, VertexLayout,
};
use crate::error::{Error, Result};
use crate::engine_bail;

// ============================================================================
// Mock Texture
// ============================================================================

#[derive(Debug)]
pub struct MockTexture {
    pub label: String,
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
    pub data: Vec<u8>,
}

impl GpuTexture for MockTexture {
    fn label(&self) -> &str {
        &self.label
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn format(&self) -> TextureFormat {
        self.format
    }
}

// ============================================================================
// Mock Mesh
// ============================================================================

#[derive(Debug)]
pub struct MockMesh {
    pub id: usize,
    pub vertex_count: u32,
    pub index_count: u32,
}

impl GpuMesh for MockMesh {
    fn index_count(&self) -> u32 {
        self.index_count
    }

    fn vertex_count(&self) -> u32 {
        self.vertex_count
    }
}

// ============================================================================
// Mock Shader Program
// ============================================================================

#[derive(Debug)]
pub struct MockProgram {
    pub name: String,
}

impl MockProgram {
    pub fn new(name: &str) -> Arc<dyn ShaderProgram> {
        Arc::new(Self { name: name.to_string() })
    }
}

impl ShaderProgram for MockProgram {
    fn name(&self) -> &str {
        &self.name
    }
}

// ============================================================================
// Mock Graphics Device
// ============================================================================

/// Bound state captured when `draw_indexed` is called
#[derive(Debug, Clone)]
pub struct DrawRecord {
    pub index_count: u32,
    pub model: Option<Mat4>,
    /// Labels of the textures bound on units 0 and 1
    pub textures: [Option<String>; 2],
    pub use_texture: Option<bool>,
    pub use_specular_texture: Option<bool>,
}

#[derive(Default)]
pub struct MockGraphicsDevice {
    /// Every call in order, e.g. "clear", "bind_texture(0, bricks.bmp)"
    pub commands: Vec<String>,
    /// Last value set for each uniform name
    pub uniforms: FxHashMap<String, UniformValue>,
    /// Labels of created textures, in creation order
    pub created_textures: Vec<String>,
    /// Number of meshes uploaded
    pub created_meshes: usize,
    pub draws: Vec<DrawRecord>,
    pub viewport: Option<(u32, u32)>,
    pub last_clear_color: Option<Vec3>,
    pub initialize_calls: usize,

    /// Make `initialize` fail
    pub fail_initialize: bool,
    /// Make `create_texture` fail
    pub fail_texture_creation: bool,

    bound_textures: [Option<String>; 2],
    program_bound: bool,
}

impl MockGraphicsDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle in the form the renderer expects
    pub fn shared() -> Arc<std::sync::Mutex<MockGraphicsDevice>> {
        Arc::new(std::sync::Mutex::new(Self::new()))
    }

    pub fn uniform(&self, name: &str) -> Option<UniformValue> {
        self.uniforms.get(name).copied()
    }

    pub fn count_commands(&self, prefix: &str) -> usize {
        self.commands.iter().filter(|c| c.starts_with(prefix)).count()
    }

    /// Forget recorded calls and uniforms (created resources are kept)
    pub fn clear_log(&mut self) {
        self.commands.clear();
        self.uniforms.clear();
        self.draws.clear();
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    fn initialize(&mut self) -> Result<DeviceInfo> {
        self.initialize_calls += 1;
        self.commands.push("initialize".to_string());
        if self.fail_initialize {
            return Err(Error::InitializationFailed("mock: no context".to_string()));
        }
        Ok(DeviceInfo {
            vendor: "Prism3D".to_string(),
            renderer: "Mock".to_string(),
            version: "3.3".to_string(),
            shading_language_version: "3.30".to_string(),
        })
    }

    fn set_viewport(&mut self, width: u32, height: u32) -> Result<()> {
        self.viewport = Some((width, height));
        self.commands.push(format!("set_viewport({}, {})", width, height));
        Ok(())
    }

    fn set_depth_test(&mut self, enabled: bool) -> Result<()> {
        self.commands.push(format!("set_depth_test({})", enabled));
        Ok(())
    }

    fn clear(&mut self, color: Vec3, _flags: ClearFlags) -> Result<()> {
        self.last_clear_color = Some(color);
        self.commands.push("clear".to_string());
        Ok(())
    }

    fn use_program(&mut self, program: &Arc<dyn ShaderProgram>) -> Result<()> {
        self.program_bound = true;
        self.commands.push(format!("use_program({})", program.name()));
        Ok(())
    }

    fn set_uniform(&mut self, name: &str, value: UniformValue) -> Result<()> {
        if !self.program_bound {
            engine_bail!("prism3d::MockGraphicsDevice", "set_uniform('{}') without a program", name);
        }
        self.uniforms.insert(name.to_string(), value);
        Ok(())
    }

    fn create_texture(&mut self, desc: &TextureDesc) -> Result<Arc<dyn GpuTexture>> {
        if self.fail_texture_creation {
            engine_bail!("prism3d::MockGraphicsDevice", "create_texture('{}') refused", desc.label);
        }
        desc.validate()?;
        self.created_textures.push(desc.label.clone());
        self.commands.push(format!("create_texture({})", desc.label));
        Ok(Arc::new(MockTexture {
            label: desc.label.clone(),
            width: desc.width,
            height: desc.height,
            format: desc.format,
            data: desc.data.clone(),
        }))
    }

    fn bind_texture(&mut self, unit: u32, texture: Option<&Arc<dyn GpuTexture>>) -> Result<()> {
        let label = texture.map(|t| t.label().to_string());
        self.commands.push(format!(
            "bind_texture({}, {})",
            unit,
            label.as_deref().unwrap_or("none")
        ));
        if let Some(slot) = self.bound_textures.get_mut(unit as usize) {
            *slot = label;
        }
        Ok(())
    }

    fn create_mesh(
        &mut self,
        vertices: &[u8],
        indices: &[u32],
        layout: &VertexLayout,
    ) -> Result<Arc<dyn GpuMesh>> {
        let stride = layout.stride_bytes();
        if stride == 0 || vertices.len() % stride != 0 {
            engine_bail!(
                "prism3d::MockGraphicsDevice",
                "vertex data ({} bytes) is not a multiple of the stride ({})",
                vertices.len(), stride
            );
        }
        self.created_meshes += 1;
        self.commands.push("create_mesh".to_string());
        Ok(Arc::new(MockMesh {
            id: self.created_meshes,
            vertex_count: (vertices.len() / stride) as u32,
            index_count: indices.len() as u32,
        }))
    }

    fn bind_mesh(&mut self, mesh: Option<&Arc<dyn GpuMesh>>) -> Result<()> {
        match mesh {
            Some(m) => self.commands.push(format!("bind_mesh({})", m.index_count())),
            None => self.commands.push("bind_mesh(none)".to_string()),
        }
        Ok(())
    }

    fn draw_indexed(&mut self, index_count: u32) -> Result<()> {
        self.commands.push(format!("draw_indexed({})", index_count));
        let record = DrawRecord {
            index_count,
            model: self.uniform("model").and_then(|u| u.as_mat4()),
            textures: self.bound_textures.clone(),
            use_texture: self.uniform("useTexture").and_then(|u| u.as_bool()),
            use_specular_texture: self.uniform("useSpecularTexture").and_then(|u| u.as_bool()),
        };
        self.draws.push(record);
        Ok(())
    }
}

#[cfg(test)]
#[path = "mock_graphics_device_tests.rs"]
mod tests;
