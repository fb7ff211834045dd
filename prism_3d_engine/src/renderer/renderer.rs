/// Renderer - owns the texture cache and runs the per-frame draw pipeline
///
/// One `draw` call renders one frame of a `Scene`: clear, upload the camera
/// and light uniforms, cull every node against the view frustum and draw
/// the survivors in insertion order. Nothing is sorted or batched.

use std::path::Path;
use std::sync::{Arc, Mutex};
use glam::Vec3;

use crate::camera::Frustum;
use crate::error::{Error, Result};
use crate::graphics_device::{ClearFlags, DeviceInfo, GraphicsDevice, ShaderProgram, UniformValue};
use crate::resource::{TextureCache, TextureKey};
use crate::scene::{PointLight, Scene, SceneLoader, SceneNode};
use crate::renderer::{Config, FrameTimer};
use crate::{engine_err, engine_error, engine_fatal, engine_info, engine_trace, engine_warn};

/// Renderer lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RendererState {
    /// Created, device not initialized yet
    Uninitialized,
    /// Ready to draw
    Initialized,
    /// Inside `draw`
    Drawing,
}

/// Per-frame statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Nodes in the scene this frame
    pub nodes_total: u32,
    /// Nodes rejected by the frustum test
    pub nodes_culled: u32,
    /// Number of draw calls this frame
    pub draw_calls: u32,
    /// Number of triangles drawn this frame
    pub triangles: u32,
}

pub struct Renderer {
    device: Arc<Mutex<dyn GraphicsDevice>>,
    program: Arc<dyn ShaderProgram>,
    config: Config,
    textures: TextureCache,
    timer: FrameTimer,
    state: RendererState,
    device_info: Option<DeviceInfo>,
}

impl Renderer {
    /// Create a renderer around a device and a linked shader program
    ///
    /// No GPU call is made until `init`.
    pub fn new(device: Arc<Mutex<dyn GraphicsDevice>>, program: Arc<dyn ShaderProgram>, config: Config) -> Self {
        let textures = TextureCache::with_search_paths(config.texture_search_paths.iter().cloned());
        Self {
            device,
            program,
            config,
            textures,
            timer: FrameTimer::new(),
            state: RendererState::Uninitialized,
            device_info: None,
        }
    }

    // ===== LIFECYCLE =====

    /// Initialize the device, set the viewport and enable depth testing
    ///
    /// Must be called exactly once, before the first `draw`. Any failure
    /// here is fatal and returned as `Error::InitializationFailed`.
    pub fn init(&mut self) -> Result<()> {
        if self.state != RendererState::Uninitialized {
            return Err(Error::InvalidState("renderer is already initialized".to_string()));
        }

        let info = {
            let mut device = lock_device(&self.device)?;
            let result = device.initialize().and_then(|info| {
                device.set_viewport(self.config.width, self.config.height)?;
                device.set_depth_test(true)?;
                Ok(info)
            });
            match result {
                Ok(info) => info,
                Err(err) => {
                    engine_fatal!("prism3d::Renderer", "Failed to initialize graphics device: {}", err);
                    return Err(match err {
                        Error::InitializationFailed(msg) => Error::InitializationFailed(msg),
                        other => Error::InitializationFailed(other.to_string()),
                    });
                }
            }
        };

        engine_info!("prism3d::Renderer", "GPU vendor: {}", info.vendor);
        engine_info!("prism3d::Renderer", "Renderer: {}", info.renderer);
        engine_info!("prism3d::Renderer", "Version: {}", info.version);
        engine_info!("prism3d::Renderer", "Shading language version: {}", info.shading_language_version);
        engine_info!(
            "prism3d::Renderer",
            "{} ready ({}x{}, program '{}')",
            self.config.app_name, self.config.width, self.config.height, self.program.name()
        );

        self.device_info = Some(info);
        self.state = RendererState::Initialized;
        Ok(())
    }

    pub fn state(&self) -> RendererState {
        self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Driver strings reported by `init`
    pub fn device_info(&self) -> Option<&DeviceInfo> {
        self.device_info.as_ref()
    }

    pub fn texture_cache(&self) -> &TextureCache {
        &self.textures
    }

    pub fn texture_cache_mut(&mut self) -> &mut TextureCache {
        &mut self.textures
    }

    pub fn frame_timer(&self) -> &FrameTimer {
        &self.timer
    }

    /// Viewport size in pixels
    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Change the viewport size
    ///
    /// The device viewport is updated immediately once initialized; call
    /// `attach` afterwards to update the scene camera's aspect ratio.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        self.config.width = width;
        self.config.height = height;
        if self.state != RendererState::Uninitialized {
            lock_device(&self.device)?.set_viewport(width, height)?;
        }
        engine_trace!("prism3d::Renderer", "Resized to {}x{}", width, height);
        Ok(())
    }

    // ===== SCENES =====

    /// Match the scene camera's viewport to the renderer size
    pub fn attach(&self, scene: &mut Scene) {
        scene.camera_mut().set_viewport(self.config.width, self.config.height);
    }

    /// Load a scene file and build it with the configured sphere tessellation
    pub fn load_scene<P: AsRef<Path>>(&self, path: P) -> Result<Scene> {
        let desc = SceneLoader::load(path)?;
        let mut scene = Scene::from_description(&desc, self.config.sphere_slices);
        self.attach(&mut scene);
        Ok(scene)
    }

    // ===== FRAME =====

    /// Render one frame of `scene`
    ///
    /// `ticks_ms` is the application clock in milliseconds; it drives the
    /// `u_time` uniform and the FPS counter. Texture failures degrade the
    /// affected node to untextured drawing; device failures are returned.
    pub fn draw(&mut self, scene: &mut Scene, ticks_ms: u64) -> Result<FrameStats> {
        match self.state {
            RendererState::Initialized => {}
            RendererState::Uninitialized => {
                return Err(Error::InvalidState("draw called before init".to_string()));
            }
            RendererState::Drawing => {
                return Err(Error::InvalidState("draw called while a frame is in progress".to_string()));
            }
        }

        self.state = RendererState::Drawing;
        let result = self.draw_frame(scene, ticks_ms);
        self.state = RendererState::Initialized;

        self.timer.tick(ticks_ms);
        result
    }

    fn draw_frame(&mut self, scene: &mut Scene, ticks_ms: u64) -> Result<FrameStats> {
        let mut guard = lock_device(&self.device)?;
        let device: &mut dyn GraphicsDevice = &mut *guard;

        device.clear(scene.sky_color, ClearFlags::COLOR | ClearFlags::DEPTH)?;
        device.use_program(&self.program)?;

        let camera = &scene.camera;
        device.set_uniform("view", UniformValue::Mat4(camera.view_matrix()))?;
        device.set_uniform("projection", UniformValue::Mat4(camera.projection_matrix()))?;
        device.set_uniform("u_time", UniformValue::Float((ticks_ms as f64 / 1000.0) as f32))?;
        device.set_uniform("u_camera_position", UniformValue::Vec3(camera.position()))?;

        let sun = &scene.dir_light;
        device.set_uniform("dirLight.direction", UniformValue::Vec3(sun.direction))?;
        device.set_uniform("dirLight.ambient", UniformValue::Vec3(sun.ambient))?;
        device.set_uniform("dirLight.diffuse", UniformValue::Vec3(sun.diffuse))?;
        device.set_uniform("dirLight.specular", UniformValue::Vec3(sun.specular))?;

        upload_point_lights(device, &scene.point_lights, self.config.max_point_lights)?;

        let frustum = Frustum::from_camera(camera);
        let mut stats = FrameStats {
            nodes_total: scene.nodes.len() as u32,
            ..Default::default()
        };

        for node in scene.nodes.iter_mut() {
            let Some(mesh) = scene.meshes.get_mut(node.mesh) else {
                engine_warn!("prism3d::Renderer", "Skipping node with stale mesh handle {:?}", node.mesh);
                continue;
            };

            let model = node.transform.matrix();
            if !frustum.intersects_aabb(&mesh.aabb().transformed(&model)) {
                stats.nodes_culled += 1;
                continue;
            }

            device.set_uniform("model", UniformValue::Mat4(model))?;
            device.set_uniform("normalMatrix", UniformValue::Mat4(node.transform.normal_matrix()))?;
            device.set_uniform("distort", UniformValue::Bool(node.material.distort))?;
            device.set_uniform("material.shininess", UniformValue::Float(node.material.shininess))?;

            let (diffuse, specular) = resolve_node_textures(&mut self.textures, device, &self.config, node);
            mesh.diffuse = diffuse;
            mesh.specular = specular;
            mesh.draw(device, &self.textures)?;

            stats.draw_calls += 1;
            stats.triangles += mesh.triangle_count() as u32;
        }

        engine_trace!(
            "prism3d::Renderer",
            "Frame at {} ms: {} nodes, {} culled, {} draw calls",
            ticks_ms, stats.nodes_total, stats.nodes_culled, stats.draw_calls
        );
        Ok(stats)
    }
}

fn lock_device(
    device: &Arc<Mutex<dyn GraphicsDevice>>,
) -> Result<std::sync::MutexGuard<'_, dyn GraphicsDevice + 'static>> {
    device
        .lock()
        .map_err(|_| engine_err!("prism3d::Renderer", "Graphics device lock poisoned"))
}

/// Upload `max` point light slots; slots past the scene's lights are switched off
fn upload_point_lights(device: &mut dyn GraphicsDevice, lights: &[PointLight], max: usize) -> Result<()> {
    let count = lights.len().min(max);
    if lights.len() > max {
        engine_trace!("prism3d::Renderer", "{} point lights, only the first {} are uploaded", lights.len(), max);
    }

    for i in 0..max {
        let light = lights.get(i).unwrap_or(&PointLight::OFF);
        let slot = format!("pointLights[{}]", i);
        device.set_uniform(&format!("{}.position", slot), UniformValue::Vec3(light.position))?;
        device.set_uniform(&format!("{}.constant", slot), UniformValue::Float(light.constant))?;
        device.set_uniform(&format!("{}.linear", slot), UniformValue::Float(light.linear))?;
        device.set_uniform(&format!("{}.quadratic", slot), UniformValue::Float(light.quadratic))?;
        device.set_uniform(&format!("{}.ambient", slot), UniformValue::Vec3(light.ambient))?;
        device.set_uniform(&format!("{}.diffuse", slot), UniformValue::Vec3(light.diffuse))?;
        device.set_uniform(&format!("{}.specular", slot), UniformValue::Vec3(light.specular))?;
    }
    device.set_uniform("pointLightsCount", UniformValue::Int(count as i32))
}

/// Diffuse and specular handles for a visible node, resolving on first use
fn resolve_node_textures(
    cache: &mut TextureCache,
    device: &mut dyn GraphicsDevice,
    config: &Config,
    node: &mut SceneNode,
) -> (Option<TextureKey>, Option<TextureKey>) {
    let (material, resolved) = node.textures_mut();
    let diffuse = resolve_slot(
        cache, device, &mut resolved.diffuse, &material.diffuse_texture, config.default_diffuse_color,
    );
    let specular = resolve_slot(
        cache, device, &mut resolved.specular, &material.specular_texture, config.default_specular_color,
    );
    (diffuse, specular)
}

fn resolve_slot(
    cache: &mut TextureCache,
    device: &mut dyn GraphicsDevice,
    slot: &mut Option<TextureKey>,
    path: &str,
    default_color: Vec3,
) -> Option<TextureKey> {
    // Handles evicted from the cache since the last frame are resolved again
    if let Some(handle) = slot.filter(|h| cache.contains(*h)) {
        return Some(handle);
    }
    match cache.resolve(device, path, default_color) {
        Ok(handle) => {
            *slot = Some(handle);
            Some(handle)
        }
        Err(err) => {
            engine_error!("prism3d::Renderer", "Texture '{}' unavailable, drawing untextured: {}", path, err);
            *slot = None;
            None
        }
    }
}

#[cfg(test)]
#[path = "renderer_tests.rs"]
mod tests;
