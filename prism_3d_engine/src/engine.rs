/// Prism3D Engine - process-wide logging facade
///
/// The rendering core keeps no global state of its own: the texture cache,
/// scene and device are owned by the caller. The one process-wide service
/// is the logger, reached through the `engine_*!` macros.

use std::sync::{OnceLock, RwLock};
use std::time::SystemTime;
use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};

// ===== INTERNAL STATE =====

/// Global logger (initialized with DefaultLogger)
static LOGGER: OnceLock<RwLock<LoggerState>> = OnceLock::new();

/// Installed logger plus its severity threshold
struct LoggerState {
    logger: Box<dyn Logger>,
    min_severity: LogSeverity,
}

impl LoggerState {
    fn new() -> Self {
        Self {
            logger: Box::new(DefaultLogger),
            min_severity: LogSeverity::Debug,
        }
    }
}

fn logger_state() -> &'static RwLock<LoggerState> {
    LOGGER.get_or_init(|| RwLock::new(LoggerState::new()))
}

// ===== PUBLIC API =====

/// Engine facade for process-wide services
///
/// # Example
///
/// ```no_run
/// use prism_3d_engine::prism3d::{Engine, log::{Logger, LogEntry, LogSeverity}};
///
/// struct FileLogger;
/// impl Logger for FileLogger {
///     fn log(&self, entry: &LogEntry) {
///         // Write to file...
///     }
/// }
///
/// Engine::set_logger(FileLogger);
/// Engine::set_min_severity(LogSeverity::Info);
/// ```
pub struct Engine;

impl Engine {
    /// Replace the active logger
    pub fn set_logger<L: Logger + 'static>(logger: L) {
        if let Ok(mut state) = logger_state().write() {
            state.logger = Box::new(logger);
        }
    }

    /// Reset logger to DefaultLogger and the threshold to Debug
    pub fn reset_logger() {
        if let Ok(mut state) = logger_state().write() {
            *state = LoggerState::new();
        }
    }

    /// Drop every entry below `severity`
    pub fn set_min_severity(severity: LogSeverity) {
        if let Ok(mut state) = logger_state().write() {
            state.min_severity = severity;
        }
    }

    /// Current severity threshold
    pub fn min_severity() -> LogSeverity {
        logger_state()
            .read()
            .map(|state| state.min_severity)
            .unwrap_or(LogSeverity::Debug)
    }

    /// Internal logging method (for simple logs without file:line)
    ///
    /// Used by engine_trace!, engine_debug!, engine_info!, engine_warn!.
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        Self::dispatch(severity, source, message, None, None);
    }

    /// Internal logging method with file:line information
    ///
    /// Used by engine_error! and engine_fatal!.
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        Self::dispatch(severity, source, message, Some(file), Some(line));
    }

    fn dispatch(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: Option<&'static str>,
        line: Option<u32>,
    ) {
        if let Ok(state) = logger_state().read() {
            if severity < state.min_severity {
                return;
            }
            state.logger.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file,
                line,
            });
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
