//! Runtime logger configuration
//!
//! Holds the minimum level threshold. Set once at startup through
//! `logger::init`, readable from anywhere without locking contention.
use super::levels::LogLevel;
use once_cell::sync::Lazy;
use parking_lot::RwLock;

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Messages above this level are dropped
    pub min_level: LogLevel,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
        }
    }
}

static LOGGER_CONFIG: Lazy<RwLock<LoggerConfig>> =
    Lazy::new(|| RwLock::new(LoggerConfig::default()));

/// Get a snapshot of the current logger configuration
pub fn get_logger_config() -> LoggerConfig {
    LOGGER_CONFIG.read().clone()
}

/// Update only the minimum level
pub fn set_min_level(level: LogLevel) {
    LOGGER_CONFIG.write().min_level = level;
}
