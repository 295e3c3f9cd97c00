//! Configuration utilities - loading from disk and the environment
//!
//! Precedence, lowest to highest:
//! 1. Defaults embedded in the schemas
//! 2. `data/config.toml` (optional)
//! 3. Environment variables, including those from a `.env` file
use super::schemas::Config;
use crate::errors::ConfigError;
use crate::logger::{self, LogTag};
use std::path::Path;

/// Default configuration file path
pub const CONFIG_FILE_PATH: &str = "data/config.toml";

/// Remote cache endpoint (Upstash REST URL)
pub const ENV_CACHE_URL: &str = "UPSTASH_REDIS_REST_URL";
/// Remote cache bearer token
pub const ENV_CACHE_TOKEN: &str = "UPSTASH_REDIS_REST_TOKEN";
/// Default per-task fan-out timeout in milliseconds
pub const ENV_PARALLEL_TIMEOUT_MS: &str = "SOLENRICH_PARALLEL_TIMEOUT_MS";
/// Minimum log level
pub const ENV_LOG_LEVEL: &str = "SOLENRICH_LOG_LEVEL";

/// Load configuration from the default path plus environment overrides
///
/// A `.env` file in the working directory is loaded first if present.
pub fn load_config() -> Result<Config, ConfigError> {
    // Missing .env is normal in production
    let _ = dotenv::dotenv();

    let mut config = load_config_from_path(CONFIG_FILE_PATH)?;
    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    Ok(config)
}

/// Load configuration from a specific TOML file
///
/// If the file doesn't exist, default values are used.
pub fn load_config_from_path(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let display = path.display().to_string();

    if !path.exists() {
        logger::debug(
            LogTag::Config,
            &format!("Config file '{}' not found, using default values", display),
        );
        return Ok(Config::default());
    }

    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: display.clone(),
        source,
    })?;

    toml::from_str::<Config>(&contents).map_err(|source| ConfigError::Parse {
        path: display,
        source,
    })
}

/// Apply environment overrides using `lookup` to resolve variables
///
/// Empty variables are ignored so an unset-but-exported value does not wipe
/// a credential from the config file.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(url) = non_empty(ENV_CACHE_URL) {
        config.cache.url = url.trim().to_string();
    }
    if let Some(token) = non_empty(ENV_CACHE_TOKEN) {
        config.cache.token = token.trim().to_string();
    }
    if let Some(raw) = non_empty(ENV_PARALLEL_TIMEOUT_MS) {
        config.parallel.default_timeout_ms =
            raw.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: ENV_PARALLEL_TIMEOUT_MS.to_string(),
                value: raw.clone(),
            })?;
    }
    if let Some(level) = non_empty(ENV_LOG_LEVEL) {
        config.logging.level = level.trim().to_string();
    }

    Ok(())
}
