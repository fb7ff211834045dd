//! Error types for the Prism3D engine
//!
//! This module defines the error types used throughout the engine,
//! including device initialization, resource loading and scene parsing.
//!
//! Only fatal conditions travel as `Err`. Recoverable resource failures
//! (a missing texture, a malformed scene record) are logged where they
//! happen and replaced by a safe default.

use std::fmt;

/// Result type for Prism3D engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Prism3D engine errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Backend-specific error (OpenGL, Vulkan, mock device, etc.)
    BackendError(String),

    /// Initialization failed (no GPU context, function table not loaded)
    InitializationFailed(String),

    /// Invalid resource (bad mesh data, stale handle, missing shader program)
    InvalidResource(String),

    /// Operation not allowed in the current renderer state
    InvalidState(String),

    /// Texture source could not be decoded
    TextureLoad(String),

    /// Scene description is not in the expected format
    SceneFormat(String),

    /// File system error
    Io(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InvalidState(msg) => write!(f, "Invalid state: {}", msg),
            Error::TextureLoad(msg) => write!(f, "Texture load failed: {}", msg),
            Error::SceneFormat(msg) => write!(f, "Scene format error: {}", msg),
            Error::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl Error {
    /// Whether this error must abort startup (as opposed to a per-resource failure)
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::InitializationFailed(_))
    }
}

// ===== ERROR MACROS =====

/// Log an ERROR (with file:line) and build an `Error::BackendError` from it
///
/// # Example
///
/// ```ignore
/// let err = engine_err!("prism3d::Renderer", "Failed to create texture: {}", reason);
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::prism3d::Error::BackendError(message)
    }};
}

/// Log an ERROR and return early with `Err(Error::BackendError(..))`
///
/// # Example
///
/// ```ignore
/// engine_bail!("prism3d::Renderer", "Device lock poisoned");
/// ```
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
