//! Configuration for the cache and the parallel fetcher
//!
//! Structures are declared with `config_struct!` in `schemas`; loading and
//! environment overrides live in `utils`.

pub mod macros;
pub mod schemas;
pub mod utils;

pub use schemas::{CacheSettings, Config, LoggingSettings, ParallelSettings, PLACEHOLDER_PREFIX};
pub use utils::{
    apply_env_overrides, load_config, load_config_from_path, CONFIG_FILE_PATH, ENV_CACHE_TOKEN,
    ENV_CACHE_URL, ENV_LOG_LEVEL, ENV_PARALLEL_TIMEOUT_MS,
};
