/// BMP decoding
///
/// Only uncompressed 24-bit and 32-bit bitmaps are accepted (32-bit files
/// may also use BI_BITFIELDS masks). The header is checked here; pixel
/// decoding (row padding, BGR order, top-down files) is done by the `image`
/// crate. Output rows run bottom-to-top, the order OpenGL expects.
///
/// `image` reads 32-bit BI_RGB pixels as opaque; their stored alpha byte is
/// copied back from the pixel array so BGRA sources keep their alpha.

use std::path::Path;
use image::ImageFormat;
use crate::error::{Error, Result};
use crate::graphics_device::TextureFormat;

const FILE_HEADER_SIZE: usize = 14;
const CORE_HEADER_SIZE: u32 = 12;
const BI_RGB: u32 = 0;
const BI_BITFIELDS: u32 = 3;
/// Offset of the pixel array offset in the file header
const DATA_OFFSET_FIELD: usize = 10;

/// Header fields the decoder needs after validation
#[derive(Debug, Clone, Copy)]
struct Header {
    bits_per_pixel: u16,
    compression: u32,
    top_down: bool,
}

/// Decoded bitmap, tightly packed, rows bottom-to-top
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BmpImage {
    pub width: u32,
    pub height: u32,
    /// Rgb8 for 24-bit sources, Rgba8 for 32-bit sources
    pub format: TextureFormat,
    pub pixels: Vec<u8>,
}

impl BmpImage {
    /// Pixel at (x, y) with y = 0 the bottom row
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let bpp = self.format.bytes_per_pixel();
        let offset = (y as usize * self.width as usize + x as usize) * bpp;
        self.pixels.get(offset..offset + bpp)
    }
}

/// Read and decode a BMP file
pub fn load<P: AsRef<Path>>(path: P) -> Result<BmpImage> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| {
        Error::TextureLoad(format!("{}: {}", path.display(), e))
    })?;
    decode(&bytes).map_err(|e| match e {
        Error::TextureLoad(msg) => Error::TextureLoad(format!("{}: {}", path.display(), msg)),
        other => other,
    })
}

/// Decode BMP bytes
pub fn decode(bytes: &[u8]) -> Result<BmpImage> {
    let header = check_header(bytes)?;

    let decoded = image::load_from_memory_with_format(bytes, ImageFormat::Bmp)
        .map_err(|e| Error::TextureLoad(format!("decode failed: {}", e)))?;

    let (width, height) = (decoded.width(), decoded.height());
    if width == 0 || height == 0 {
        return Err(Error::TextureLoad(format!("empty image ({}x{})", width, height)));
    }

    let (format, pixels) = if header.bits_per_pixel == 24 {
        let mut rgb = decoded.into_rgb8();
        image::imageops::flip_vertical_in_place(&mut rgb);
        (TextureFormat::Rgb8, rgb.into_raw())
    } else {
        let mut rgba = decoded.into_rgba8();
        image::imageops::flip_vertical_in_place(&mut rgba);
        let mut pixels = rgba.into_raw();
        if header.compression == BI_RGB {
            restore_alpha(bytes, &header, width, height, &mut pixels)?;
        }
        (TextureFormat::Rgba8, pixels)
    };

    Ok(BmpImage { width, height, format, pixels })
}

/// Validate signature, bit depth and compression
fn check_header(bytes: &[u8]) -> Result<Header> {
    if bytes.len() < 2 || &bytes[0..2] != b"BM" {
        return Err(Error::TextureLoad("invalid signature (expected 'BM')".to_string()));
    }
    let header_size = read_u32(bytes, FILE_HEADER_SIZE)?;

    let (bits_per_pixel, compression, top_down) = if header_size == CORE_HEADER_SIZE {
        (read_u16(bytes, FILE_HEADER_SIZE + 10)?, BI_RGB, false)
    } else {
        // A negative height marks a top-down pixel array
        let height = read_u32(bytes, FILE_HEADER_SIZE + 8)? as i32;
        (read_u16(bytes, FILE_HEADER_SIZE + 14)?, read_u32(bytes, FILE_HEADER_SIZE + 16)?, height < 0)
    };

    match (bits_per_pixel, compression) {
        (24, BI_RGB) | (32, BI_RGB) | (32, BI_BITFIELDS) => Ok(Header { bits_per_pixel, compression, top_down }),
        (24, _) | (32, _) => Err(Error::TextureLoad(format!(
            "compressed bitmaps are not supported (compression {})", compression
        ))),
        _ => Err(Error::TextureLoad(format!(
            "unsupported bit depth {} (only 24 and 32 are supported)", bits_per_pixel
        ))),
    }
}

/// Copy the 4th byte of each 32-bit BI_RGB pixel into the decoded alpha channel
///
/// `pixels` is RGBA with rows bottom-to-top. 32-bit rows carry no padding.
fn restore_alpha(bytes: &[u8], header: &Header, width: u32, height: u32, pixels: &mut [u8]) -> Result<()> {
    let data_offset = read_u32(bytes, DATA_OFFSET_FIELD)? as usize;
    let row_len = width as usize * 4;

    for (y, row) in pixels.chunks_exact_mut(row_len).enumerate() {
        let file_row = if header.top_down { height as usize - 1 - y } else { y };
        let start = data_offset + file_row * row_len;
        let source = bytes
            .get(start..start + row_len)
            .ok_or_else(|| Error::TextureLoad("truncated pixel data".to_string()))?;
        for (dst, src) in row.chunks_exact_mut(4).zip(source.chunks_exact(4)) {
            dst[3] = src[3];
        }
    }
    Ok(())
}

fn read_u16(bytes: &[u8], offset: usize) -> Result<u16> {
    bytes
        .get(offset..offset + 2)
        .map(|b| u16::from_le_bytes([b[0], b[1]]))
        .ok_or_else(|| Error::TextureLoad("truncated header".to_string()))
}

fn read_u32(bytes: &[u8], offset: usize) -> Result<u32> {
    bytes
        .get(offset..offset + 4)
        .map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .ok_or_else(|| Error::TextureLoad("truncated header".to_string()))
}

#[cfg(test)]
#[path = "bmp_tests.rs"]
mod tests;
