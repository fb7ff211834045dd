/// Renderer module - configuration, per-frame pipeline and frame timing

pub mod config;
pub mod frame_timer;
pub mod renderer;

pub use config::*;
pub use frame_timer::*;
pub use renderer::*;
