//! Shared helpers for unit tests (compiled only under `cfg(test)`)

use std::sync::{Arc, Mutex};
use crate::log::{Logger, LogEntry, LogSeverity};

/// Logger that keeps every entry in memory
///
/// Tests installing it must be `#[serial]`: the logger is process-wide and
/// other tests running in parallel may log into it too, so assertions
/// should look for specific messages rather than count all entries.
#[derive(Clone, Default)]
pub struct CapturingLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl CapturingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages logged at `severity` whose text contains `needle`
    pub fn matching(&self, severity: LogSeverity, needle: &str) -> Vec<LogEntry> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.severity == severity && e.message.contains(needle))
            .cloned()
            .collect()
    }

    pub fn all(&self) -> Vec<LogEntry> {
        self.entries.lock().unwrap().clone()
    }
}

impl Logger for CapturingLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

/// Encode an uncompressed bottom-up BMP (24 or 32 bits per pixel)
///
/// `pixels` holds RGB or RGBA bytes in top-to-bottom row order, the way
/// an image editor shows them.
pub fn encode_bmp(width: u32, height: u32, bits_per_pixel: u16, pixels: &[u8]) -> Vec<u8> {
    let bytes_per_pixel = bits_per_pixel as usize / 8;
    let row_size = (width as usize * bytes_per_pixel + 3) & !3;
    let data_size = row_size * height as usize;
    let data_offset = 14 + 40;

    let mut out = Vec::with_capacity(data_offset + data_size);
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&((data_offset + data_size) as u32).to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&(data_offset as u32).to_le_bytes());

    out.extend_from_slice(&40u32.to_le_bytes());
    out.extend_from_slice(&(width as i32).to_le_bytes());
    out.extend_from_slice(&(height as i32).to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&bits_per_pixel.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&(data_size as u32).to_le_bytes());
    out.extend_from_slice(&2835i32.to_le_bytes());
    out.extend_from_slice(&2835i32.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());

    // File rows run bottom-to-top
    for y in (0..height as usize).rev() {
        let row_start = out.len();
        for x in 0..width as usize {
            let p = &pixels[(y * width as usize + x) * bytes_per_pixel..][..bytes_per_pixel];
            out.extend_from_slice(&[p[2], p[1], p[0]]);
            if bytes_per_pixel == 4 {
                out.push(p[3]);
            }
        }
        while out.len() - row_start < row_size {
            out.push(0);
        }
    }
    out
}

/// Fresh empty directory under the system temp dir, unique per test name
pub fn temp_dir(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("prism3d_{}_{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}
