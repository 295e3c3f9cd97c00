//! Structured console logging for SolEnrich
//!
//! This module provides a small, ergonomic logging API with:
//! - Standard log levels (Error/Warning/Info/Debug)
//! - Per-subsystem tags for colored, aligned output
//! - A single minimum-level threshold set at startup
//!
//! ## Usage
//!
//! ```rust
//! use solenrich::logger::{self, LogTag};
//!
//! logger::warning(LogTag::Cache, "Remote store unreachable, serving misses");
//! logger::info(LogTag::System, "Started");
//! logger::log(LogTag::Parallel, "BATCH_COMPLETE", "3/3 tasks succeeded");
//! ```

mod config;
mod core;
mod format;
mod levels;
mod tags;

pub use config::set_min_level;
pub use levels::LogLevel;
pub use tags::LogTag;

/// Initialize the logger with a minimum level
///
/// Call once at startup before services begin logging. Anything noisier than
/// `min_level` is dropped; errors are always shown.
pub fn init(min_level: LogLevel) {
    set_min_level(min_level);
}

/// Log at ERROR level (always shown)
pub fn error(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Error, LogLevel::Error.as_str(), message);
}

/// Log at WARNING level (degraded but recovered behaviour)
pub fn warning(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Warning, LogLevel::Warning.as_str(), message);
}

/// Log at INFO level (standard operations)
pub fn info(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Info, LogLevel::Info.as_str(), message);
}

/// Log at DEBUG level (only shown when the threshold is Debug)
pub fn debug(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Debug, LogLevel::Debug.as_str(), message);
}

/// Event-style log line with a custom type column, at INFO level
///
/// ```rust
/// use solenrich::logger::{self, LogTag};
/// logger::log(LogTag::Cache, "BACKEND", "Using in-memory cache");
/// ```
pub fn log(tag: LogTag, log_type: &str, message: &str) {
    core::log_internal(tag, LogLevel::Info, log_type, message);
}
