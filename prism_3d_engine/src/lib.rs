/*!
# Prism3D Engine

Rendering core of a small real-time 3D engine.

The crate renders a flat scene of meshes lit by one directional light and a
bounded set of point lights. Every frame is drawn synchronously: camera and
light uniforms are uploaded, each node is tested against the view frustum
and the visible ones are drawn in insertion order.

## Architecture

- **GraphicsDevice**: the GPU function table, implemented by a backend
- **Camera / Frustum**: yaw-pitch fly camera and plane extraction for culling
- **TextureCache**: lazy, path-keyed textures with generated flat-color fallbacks
- **Mesh**: cube, sphere and custom geometry with a local bounding box
- **Scene / SceneLoader**: the node list and its text file format
- **Renderer**: owns the texture cache and runs the per-frame pipeline

Window and context creation, input dispatch and shader compilation belong
to the application; it hands the renderer a ready device and program.
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod camera;
pub mod graphics_device;
pub mod resource;
pub mod scene;
pub mod renderer;

#[cfg(test)]
mod test_utils;

// Main prism3d namespace module
pub mod prism3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging facade
    pub use crate::engine::Engine;

    // Per-frame renderer
    pub use crate::renderer::{Renderer, Config, FrameStats, RendererState};

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Camera sub-module
    pub mod camera {
        pub use crate::camera::*;
    }

    // GPU boundary sub-module
    pub mod device {
        pub use crate::graphics_device::*;
    }

    // Render sub-module
    pub mod render {
        pub use crate::renderer::*;
    }

    // Resource sub-module
    pub mod resource {
        pub use crate::resource::*;
    }

    // Scene sub-module
    pub mod scene {
        pub use crate::scene::*;
    }
}

// Re-export math library at crate root
pub use glam;
