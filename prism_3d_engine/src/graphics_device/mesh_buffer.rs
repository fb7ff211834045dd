/// GPU mesh trait (vertex array + buffers) and vertex layout

/// One vertex attribute inside an interleaved float vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Shader attribute location
    pub location: u32,
    /// Number of f32 components
    pub components: u32,
    /// Offset in floats from the start of the vertex
    pub offset: u32,
}

/// Interleaved f32 vertex layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexLayout {
    /// Vertex size in floats
    pub stride: u32,
    pub attributes: Vec<VertexAttribute>,
}

impl VertexLayout {
    /// position(3) + normal(3) + uv(2), stride 8 floats
    pub fn position_normal_uv() -> Self {
        Self {
            stride: 8,
            attributes: vec![
                VertexAttribute { location: 0, components: 3, offset: 0 },
                VertexAttribute { location: 1, components: 3, offset: 3 },
                VertexAttribute { location: 2, components: 2, offset: 6 },
            ],
        }
    }

    /// Vertex size in bytes
    pub fn stride_bytes(&self) -> usize {
        self.stride as usize * std::mem::size_of::<f32>()
    }
}

/// GPU-resident mesh (vertex array object with its buffers)
pub trait GpuMesh: Send + Sync {
    /// Number of indices uploaded
    fn index_count(&self) -> u32;
    /// Number of vertices uploaded
    fn vertex_count(&self) -> u32;
}
