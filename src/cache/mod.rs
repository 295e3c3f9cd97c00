//! Best-effort key-value cache for upstream API responses
//!
//! `Cache` picks its backend once at construction: the remote REST store when
//! real credentials are configured, the in-memory store otherwise (or when the
//! remote client cannot be built). Every operation is total from the caller's
//! point of view. Failures are logged and degrade to a miss or a no-op, so a
//! cache outage never becomes an application outage.
//!
//! ```rust,no_run
//! use solenrich::cache::{cache_key, Cache, CacheTtl};
//! use solenrich::config::CacheSettings;
//!
//! # async fn demo() {
//! let cache = Cache::new(&CacheSettings::default());
//! let key = cache_key("birdeye", "price", "So11111111111111111111111111111111111111112");
//!
//! cache.set(&key, &142.7_f64, CacheTtl::TOKEN_PRICE).await;
//! let price: Option<f64> = cache.get(&key).await;
//! # }
//! ```

pub mod backend;
pub mod clock;
pub mod config;
pub mod keys;
pub mod memory;
pub mod remote;
pub mod types;

pub use backend::CacheBackend;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::CacheTtl;
pub use keys::{cache_key, KEY_PREFIX};
pub use memory::MemoryBackend;
pub use remote::RemoteBackend;
pub use types::{BackendKind, CacheEntry, CacheStats};

use crate::config::CacheSettings;
use crate::logger::{self, LogTag};
use keys::namespaced;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use types::StatsCounters;

/// Shared cache handle
///
/// Cloning is cheap and every clone talks to the same backend, so build one
/// at startup and pass it to each collaborator.
#[derive(Clone)]
pub struct Cache {
    backend: Arc<dyn CacheBackend>,
    stats: Arc<StatsCounters>,
}

impl Cache {
    /// Select and build the backend from settings; never fails
    pub fn new(settings: &CacheSettings) -> Self {
        if !settings.is_remote_configured() {
            logger::log(
                LogTag::Cache,
                "BACKEND",
                "Using in-memory cache (no remote store configured)",
            );
            return Self::in_memory();
        }

        let timeout = Duration::from_secs(settings.request_timeout_secs.max(1));
        match RemoteBackend::new(&settings.url, &settings.token, timeout) {
            Ok(remote) => {
                logger::log(
                    LogTag::Cache,
                    "BACKEND",
                    &format!("Using remote cache at {}", remote.host()),
                );
                Self::with_backend(Arc::new(remote))
            }
            Err(e) => {
                logger::warning(
                    LogTag::Cache,
                    &format!("Failed to init remote cache, falling back to in-memory: {}", e),
                );
                Self::in_memory()
            }
        }
    }

    pub fn in_memory() -> Self {
        Self::with_backend(Arc::new(MemoryBackend::new()))
    }

    /// Bind an explicit backend
    pub fn with_backend(backend: Arc<dyn CacheBackend>) -> Self {
        Self {
            backend,
            stats: Arc::new(StatsCounters::default()),
        }
    }

    pub fn backend_kind(&self) -> BackendKind {
        self.backend.kind()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot()
    }

    /// Look up `key` and decode it as `T`
    ///
    /// Returns `None` on a miss, an expired entry, a backend failure, or a
    /// stored payload that does not decode as `T`.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.backend.get(&namespaced(key)).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                self.stats.miss();
                return None;
            }
            Err(e) => {
                self.stats.error();
                logger::warning(LogTag::Cache, &format!("get({}) failed: {}", key, e));
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => {
                self.stats.hit();
                Some(value)
            }
            Err(e) => {
                self.stats.error();
                logger::warning(
                    LogTag::Cache,
                    &format!("get({}) returned undecodable payload: {}", key, e),
                );
                None
            }
        }
    }

    /// Store `value` under `key` for `ttl_seconds`
    ///
    /// A zero TTL stores nothing: the remote store rejects it and an entry
    /// that expires on write is never observable.
    pub async fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T, ttl_seconds: u64) {
        if ttl_seconds == 0 {
            logger::debug(LogTag::Cache, &format!("set({}) skipped: zero ttl", key));
            return;
        }

        let serialized = match serde_json::to_string(value) {
            Ok(serialized) => serialized,
            Err(e) => {
                self.stats.error();
                logger::warning(LogTag::Cache, &format!("set({}) failed to serialize: {}", key, e));
                return;
            }
        };

        match self.backend.set(&namespaced(key), serialized, ttl_seconds).await {
            Ok(()) => self.stats.write(),
            Err(e) => {
                self.stats.error();
                logger::warning(LogTag::Cache, &format!("set({}) failed: {}", key, e));
            }
        }
    }

    /// Remove `key`; missing keys are not an error
    pub async fn delete(&self, key: &str) {
        match self.backend.delete(&namespaced(key)).await {
            Ok(()) => self.stats.delete(),
            Err(e) => {
                self.stats.error();
                logger::warning(LogTag::Cache, &format!("delete({}) failed: {}", key, e));
            }
        }
    }

    /// Cache-aside lookup
    ///
    /// Returns the cached value if present, otherwise awaits `fetch`, stores a
    /// successful result for `ttl_seconds` and returns it. A fetch error is
    /// returned untouched and nothing is cached.
    pub async fn get_or_fetch<T, E, F, Fut>(
        &self,
        key: &str,
        ttl_seconds: u64,
        fetch: F,
    ) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(hit) = self.get::<T>(key).await {
            return Ok(hit);
        }

        let value = fetch().await?;
        self.set(key, &value, ttl_seconds).await;
        Ok(value)
    }
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache")
            .field("backend", &self.backend.kind())
            .field("stats", &self.stats.snapshot())
            .finish()
    }
}
