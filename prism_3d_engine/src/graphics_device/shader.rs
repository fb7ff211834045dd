/// Shader program handle
///
/// Compilation and linking happen outside the rendering core; the renderer
/// only binds a ready program and sets uniforms on it by name.
pub trait ShaderProgram: Send + Sync {
    /// Human-readable name (file pair or "builtin")
    fn name(&self) -> &str;
}
