//! Configuration schemas - all config structures defined once with defaults
//!
//! Each struct is defined using the config_struct! macro which provides
//! embedded defaults and serde support.
use crate::config_struct;
use std::time::Duration;

/// Prefix that marks a credential copied verbatim from an example `.env`
pub const PLACEHOLDER_PREFIX: &str = "your_";

// ============================================================================
// CACHE CONFIGURATION
// ============================================================================

config_struct! {
    /// Remote cache store credentials
    ///
    /// Both values empty (or placeholders) selects the in-memory backend.
    pub struct CacheSettings {
        /// REST endpoint of the shared key-value store
        url: String = String::new(),
        /// Bearer token for the REST endpoint
        token: String = String::new(),
        /// Per-request timeout against the remote store
        request_timeout_secs: u64 = 5,
    }
}

impl CacheSettings {
    /// True when both credentials are present and neither is a placeholder
    pub fn is_remote_configured(&self) -> bool {
        is_real_credential(&self.url) && is_real_credential(&self.token)
    }
}

fn is_real_credential(value: &str) -> bool {
    !value.is_empty() && !value.starts_with(PLACEHOLDER_PREFIX)
}

// ============================================================================
// PARALLEL FETCH CONFIGURATION
// ============================================================================

config_struct! {
    /// Fan-out defaults
    pub struct ParallelSettings {
        /// Timeout applied to each task when the caller does not pick one
        default_timeout_ms: u64 = 10_000,
    }
}

impl ParallelSettings {
    pub fn default_timeout(&self) -> Duration {
        Duration::from_millis(self.default_timeout_ms)
    }
}

// ============================================================================
// LOGGING CONFIGURATION
// ============================================================================

config_struct! {
    pub struct LoggingSettings {
        /// error | warning | info | debug
        level: String = "info".to_string(),
    }
}

// ============================================================================
// ROOT
// ============================================================================

config_struct! {
    /// Root configuration
    pub struct Config {
        cache: CacheSettings = CacheSettings::default(),
        parallel: ParallelSettings = ParallelSettings::default(),
        logging: LoggingSettings = LoggingSettings::default(),
    }
}
