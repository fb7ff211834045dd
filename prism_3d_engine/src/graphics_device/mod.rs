/// Graphics device module - the boundary between the rendering core and the GPU
///
/// The core never talks to OpenGL (or any other API) directly. A backend
/// implements `GraphicsDevice`; tests use the recording mock.

// Module declarations
pub mod graphics_device;
pub mod texture;
pub mod mesh_buffer;
pub mod shader;

// Re-export everything from graphics_device.rs
pub use graphics_device::*;

// Re-export from other modules
pub use texture::*;
pub use mesh_buffer::*;
pub use shader::*;

// Mock graphics device for tests (no GPU required)
#[cfg(test)]
pub mod mock_graphics_device;
