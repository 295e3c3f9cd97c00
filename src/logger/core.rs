//! Core logging implementation with automatic filtering
//!
//! Checks whether a message passes the configured threshold, then hands it
//! to the format module for output.
use super::config::get_logger_config;
use super::levels::LogLevel;
use super::tags::LogTag;

/// Filtering rules:
/// 1. Errors are always shown
/// 2. Everything else must be at or below the minimum level threshold
pub fn passes_threshold(level: LogLevel, min_level: LogLevel) -> bool {
    level == LogLevel::Error || level <= min_level
}

/// Check if a log message should be displayed under the current config
pub fn should_log(level: LogLevel) -> bool {
    passes_threshold(level, get_logger_config().min_level)
}

/// Internal logging function with automatic filtering
pub fn log_internal(tag: LogTag, level: LogLevel, log_type: &str, message: &str) {
    if !should_log(level) {
        return;
    }

    super::format::format_and_log(tag, level, log_type, message);
}
