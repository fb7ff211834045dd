/// Texture cache — one GPU texture per distinct key string.
///
/// Keys are file paths as written in the scene, or synthetic
/// `gen_color_R_G_B` keys for generated 1x1 textures. Textures live in a
/// SlotMap; callers hold `TextureKey` handles, which stop resolving (rather
/// than dangle) once a texture is evicted.
///
/// Resolution order for a non-empty key:
/// 1. already cached: no I/O
/// 2. each search path in order (`key`, `./textures/key`, `../textures/key`)
/// 3. fallback: a generated flat color, remembered under the failed key too,
///    so the failing file is not probed again

use std::path::{Path, PathBuf};
use std::sync::Arc;
use glam::Vec3;
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use crate::error::Result;
use crate::graphics_device::{GraphicsDevice, GpuTexture, TextureDesc, TextureFormat};
use crate::resource::bmp;
use crate::{engine_debug, engine_error, engine_trace};

/// Directories searched, in order, for a texture path
pub const DEFAULT_SEARCH_PATHS: [&str; 3] = ["", "./textures", "../textures"];

new_key_type! {
    /// Stable handle to a cached texture
    pub struct TextureKey;
}

/// Synthetic cache key of a generated flat-color texture
pub fn synthetic_key(color: Vec3) -> String {
    format!("gen_color_{:.6}_{:.6}_{:.6}", color.x, color.y, color.z)
}

/// Where a cached texture came from
#[derive(Debug, Clone, PartialEq)]
pub enum TextureSource {
    /// Loaded from this file
    File(PathBuf),
    /// Generated 1x1 texture of this color
    Color(Vec3),
}

pub struct Texture {
    key: String,
    source: TextureSource,
    gpu: Arc<dyn GpuTexture>,
}

impl Texture {
    /// Cache key this texture is stored under
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn source(&self) -> &TextureSource {
        &self.source
    }

    pub fn gpu(&self) -> &Arc<dyn GpuTexture> {
        &self.gpu
    }

    pub fn width(&self) -> u32 {
        self.gpu.width()
    }

    pub fn height(&self) -> u32 {
        self.gpu.height()
    }

    pub fn is_generated(&self) -> bool {
        matches!(self.source, TextureSource::Color(_))
    }
}

pub struct TextureCache {
    textures: SlotMap<TextureKey, Texture>,
    /// Key string to handle, including aliases of failed keys
    by_key: FxHashMap<String, TextureKey>,
    search_paths: Vec<PathBuf>,
}

impl Default for TextureCache {
    fn default() -> Self {
        Self::new()
    }
}

impl TextureCache {
    /// Empty cache with the default search paths
    pub fn new() -> Self {
        Self::with_search_paths(DEFAULT_SEARCH_PATHS.iter().map(PathBuf::from))
    }

    /// Empty cache probing `paths` in order (an empty path means the key as-is)
    pub fn with_search_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            textures: SlotMap::with_key(),
            by_key: FxHashMap::default(),
            search_paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    // ===== RESOLUTION =====

    /// Handle for `key`, loading or generating the texture on first use
    ///
    /// An empty key, or one that cannot be loaded from any search path,
    /// yields a 1x1 texture of `default_color`. Only a device failure is
    /// returned as an error.
    pub fn resolve(
        &mut self,
        device: &mut dyn GraphicsDevice,
        key: &str,
        default_color: Vec3,
    ) -> Result<TextureKey> {
        if key.is_empty() {
            return self.generated(device, default_color);
        }
        if let Some(handle) = self.lookup(key) {
            return Ok(handle);
        }

        let mut last_error = None;
        for dir in &self.search_paths {
            let path = dir.join(key);
            match bmp::load(&path) {
                Ok(image) => {
                    let desc = TextureDesc::new(key, image.width, image.height, image.format, image.pixels);
                    let gpu = device.create_texture(&desc)?;
                    engine_debug!(
                        "prism3d::TextureCache",
                        "Loaded texture {} ({}x{}, {:?})",
                        path.display(), image.width, image.height, image.format
                    );
                    return Ok(self.insert(key, TextureSource::File(path), gpu));
                }
                Err(err) => {
                    engine_trace!("prism3d::TextureCache", "Texture probe failed: {}", err);
                    last_error = Some(err);
                }
            }
        }

        engine_error!(
            "prism3d::TextureCache",
            "Failed to load texture '{}', using generated color {}: {}",
            key,
            default_color,
            last_error.map(|e| e.to_string()).unwrap_or_else(|| "no search paths".to_string())
        );
        let handle = self.generated(device, default_color)?;
        self.by_key.insert(key.to_string(), handle);
        Ok(handle)
    }

    /// Handle of the 1x1 texture of `color`, generating it if needed
    pub fn generated(&mut self, device: &mut dyn GraphicsDevice, color: Vec3) -> Result<TextureKey> {
        let key = synthetic_key(color);
        if let Some(handle) = self.lookup(&key) {
            return Ok(handle);
        }

        let desc = TextureDesc::new(key.as_str(), 1, 1, TextureFormat::Rgb8, color_bytes(color).to_vec());
        let gpu = device.create_texture(&desc)?;
        engine_debug!("prism3d::TextureCache", "Generated color texture {}", key);
        Ok(self.insert(&key, TextureSource::Color(color), gpu))
    }

    /// Load `path` directly, bypassing the search paths
    pub fn load_file(&mut self, device: &mut dyn GraphicsDevice, path: &Path) -> Result<TextureKey> {
        let key = path.to_string_lossy().into_owned();
        if let Some(handle) = self.lookup(&key) {
            return Ok(handle);
        }
        let image = bmp::load(path)?;
        let desc = TextureDesc::new(key.as_str(), image.width, image.height, image.format, image.pixels);
        let gpu = device.create_texture(&desc)?;
        Ok(self.insert(&key, TextureSource::File(path.to_path_buf()), gpu))
    }

    fn insert(&mut self, key: &str, source: TextureSource, gpu: Arc<dyn GpuTexture>) -> TextureKey {
        let handle = self.textures.insert(Texture {
            key: key.to_string(),
            source,
            gpu,
        });
        self.by_key.insert(key.to_string(), handle);
        handle
    }

    // ===== ACCESS =====

    pub fn get(&self, handle: TextureKey) -> Option<&Texture> {
        self.textures.get(handle)
    }

    /// Live handle cached under `key` (no I/O)
    pub fn lookup(&self, key: &str) -> Option<TextureKey> {
        self.by_key
            .get(key)
            .copied()
            .filter(|handle| self.textures.contains_key(*handle))
    }

    pub fn contains(&self, handle: TextureKey) -> bool {
        self.textures.contains_key(handle)
    }

    /// Number of distinct textures (aliases not counted)
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TextureKey, &Texture)> {
        self.textures.iter()
    }

    // ===== EVICTION =====

    /// Drop the texture cached under `key`
    ///
    /// Evicting an alias only forgets the alias (the next resolution of that
    /// key probes the files again). Evicting a texture's own key releases
    /// it and every alias pointing at it. Returns false if `key` is unknown.
    pub fn evict(&mut self, key: &str) -> bool {
        let Some(handle) = self.by_key.remove(key) else {
            return false;
        };
        let owns = self.textures.get(handle).is_some_and(|t| t.key == key);
        if owns {
            self.textures.remove(handle);
            self.by_key.retain(|_, h| *h != handle);
            engine_debug!("prism3d::TextureCache", "Evicted texture {}", key);
        }
        true
    }

    /// Release every texture
    pub fn clear(&mut self) {
        self.textures.clear();
        self.by_key.clear();
    }
}

/// 1x1 RGB pixel of a [0, 1] color
fn color_bytes(color: Vec3) -> [u8; 3] {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0) as u8;
    [channel(color.x), channel(color.y), channel(color.z)]
}

impl std::fmt::Debug for TextureCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextureCache")
            .field("textures", &self.textures.len())
            .field("keys", &self.by_key.len())
            .field("search_paths", &self.search_paths)
            .finish()
    }
}

#[cfg(test)]
#[path = "texture_cache_tests.rs"]
mod tests;
