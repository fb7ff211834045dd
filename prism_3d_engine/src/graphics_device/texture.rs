/// GPU texture trait and texture descriptor

use std::fmt;
use crate::error::{Error, Result};

/// Pixel layout of uploaded texture data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFormat {
    /// 3 bytes per pixel, R G B
    Rgb8,
    /// 4 bytes per pixel, R G B A
    Rgba8,
}

impl TextureFormat {
    /// Size of one pixel in bytes
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            TextureFormat::Rgb8 => 3,
            TextureFormat::Rgba8 => 4,
        }
    }
}

/// Texture sampling filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFilter {
    Nearest,
    Linear,
    NearestMipmapLinear,
}

/// Texture coordinate wrapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureWrap {
    Repeat,
    ClampToEdge,
}

// ===== TEXTURE DESC =====

/// Descriptor for creating a texture
///
/// Rows are ordered bottom-to-top (OpenGL upload order).
#[derive(Clone)]
pub struct TextureDesc {
    /// Debug label (the cache key)
    pub label: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Pixel format
    pub format: TextureFormat,
    /// Tightly packed pixel bytes
    pub data: Vec<u8>,
    /// Minification filter
    pub min_filter: TextureFilter,
    /// Magnification filter
    pub mag_filter: TextureFilter,
    /// Wrapping on both axes
    pub wrap: TextureWrap,
    /// Build the mip chain after upload
    pub generate_mipmaps: bool,
}

impl TextureDesc {
    /// Descriptor with the engine's default sampling
    /// (nearest-mipmap-linear / nearest, repeat, mipmapped)
    pub fn new(label: impl Into<String>, width: u32, height: u32, format: TextureFormat, data: Vec<u8>) -> Self {
        Self {
            label: label.into(),
            width,
            height,
            format,
            data,
            min_filter: TextureFilter::NearestMipmapLinear,
            mag_filter: TextureFilter::Nearest,
            wrap: TextureWrap::Repeat,
            generate_mipmaps: true,
        }
    }

    /// Check that the pixel buffer matches the declared size
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidResource(format!(
                "texture '{}' has zero size ({}x{})",
                self.label, self.width, self.height
            )));
        }
        let expected = self.width as usize * self.height as usize * self.format.bytes_per_pixel();
        if self.data.len() != expected {
            return Err(Error::InvalidResource(format!(
                "texture '{}' expects {} bytes, got {}",
                self.label, expected, self.data.len()
            )));
        }
        Ok(())
    }
}

impl fmt::Debug for TextureDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextureDesc")
            .field("label", &self.label)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("format", &self.format)
            .field("bytes", &self.data.len())
            .finish()
    }
}

// ===== TEXTURE TRAIT =====

/// GPU-resident 2D texture
///
/// Dropping the last reference releases the GPU object.
pub trait GpuTexture: Send + Sync {
    /// Debug label given at creation
    fn label(&self) -> &str;
    /// Width in pixels
    fn width(&self) -> u32;
    /// Height in pixels
    fn height(&self) -> u32;
    /// Pixel format
    fn format(&self) -> TextureFormat;
}
