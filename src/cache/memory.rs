// In-process fallback store for the cache

use super::backend::CacheBackend;
use super::clock::{Clock, SystemClock};
use super::types::{BackendKind, CacheEntry};
use crate::errors::CacheError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Minimum clock time between two expiry sweeps triggered by writes
pub const SWEEP_INTERVAL_SECS: i64 = 60;

/// In-memory key-value store with lazy TTL expiry
///
/// Expired entries are evicted when a read notices them. Writes also sweep
/// the whole map once `SWEEP_INTERVAL_SECS` have passed since the last sweep,
/// so keys that are written once and never read again are still reclaimed.
/// The map lock is never held across an await.
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, CacheEntry>>,
    last_sweep: Mutex<DateTime<Utc>>,
    clock: Arc<dyn Clock>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            last_sweep: Mutex::new(clock.now()),
            clock,
        }
    }

    /// Number of stored entries, expired ones included until evicted
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every expired entry, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut entries = self.entries.lock();
        self.sweep(&mut entries, now)
    }

    /// Lock order is always `entries` then `last_sweep`
    fn sweep(&self, entries: &mut HashMap<String, CacheEntry>, now: DateTime<Utc>) -> usize {
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        *self.last_sweep.lock() = now;
        before - entries.len()
    }

    fn sweep_due(&self, now: DateTime<Utc>) -> bool {
        let last = *self.last_sweep.lock();
        now.signed_duration_since(last).num_seconds() >= SWEEP_INTERVAL_SECS
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheBackend for MemoryBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Memory
    }

    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let now = self.clock.now();
        let mut entries = self.entries.lock();

        let expired = match entries.get(key) {
            Some(entry) => entry.is_expired(now),
            None => return Ok(None),
        };

        if expired {
            entries.remove(key);
            return Ok(None);
        }

        Ok(entries.get(key).map(|entry| entry.serialized_value.clone()))
    }

    async fn set(&self, key: &str, value: String, ttl_seconds: u64) -> Result<(), CacheError> {
        let now = self.clock.now();
        let entry = CacheEntry::new(key.to_string(), value, ttl_seconds, now);

        let mut entries = self.entries.lock();
        if self.sweep_due(now) {
            self.sweep(&mut entries, now);
        }
        entries.insert(key.to_string(), entry);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::clock::ManualClock;
    use chrono::Utc;
    use std::time::Duration;

    fn backend_with_clock() -> (MemoryBackend, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        (MemoryBackend::with_clock(clock.clone()), clock)
    }

    #[tokio::test]
    async fn test_set_overwrites_previous_entry() {
        let backend = MemoryBackend::new();
        backend.set("k", "1".into(), 60).await.unwrap();
        backend.set("k", "2".into(), 60).await.unwrap();

        assert_eq!(backend.get("k").await.unwrap(), Some("2".to_string()));
        assert_eq!(backend.len(), 1);
    }

    #[tokio::test]
    async fn test_expired_read_evicts_entry() {
        let (backend, clock) = backend_with_clock();
        backend.set("k", "1".into(), 1).await.unwrap();

        clock.advance(Duration::from_millis(1500));

        assert_eq!(backend.get("k").await.unwrap(), None);
        assert!(backend.is_empty());
    }

    #[tokio::test]
    async fn test_overwrite_resets_expiry() {
        let (backend, clock) = backend_with_clock();
        backend.set("k", "1".into(), 1).await.unwrap();
        clock.advance(Duration::from_millis(900));
        backend.set("k", "2".into(), 1).await.unwrap();
        clock.advance(Duration::from_millis(900));

        assert_eq!(backend.get("k").await.unwrap(), Some("2".to_string()));
    }

    #[tokio::test]
    async fn test_purge_expired_keeps_live_entries() {
        let (backend, clock) = backend_with_clock();
        backend.set("short", "1".into(), 1).await.unwrap();
        backend.set("long", "2".into(), 600).await.unwrap();

        clock.advance(Duration::from_secs(5));

        assert_eq!(backend.purge_expired(), 1);
        assert_eq!(backend.len(), 1);
        assert_eq!(backend.get("long").await.unwrap(), Some("2".to_string()));
    }

    #[tokio::test]
    async fn test_writes_reclaim_expired_keys_never_read_again() {
        let (backend, clock) = backend_with_clock();
        for i in 0..10_000 {
            backend
                .set(&format!("helius:tx:{}", i), "{}".into(), 1)
                .await
                .unwrap();
        }
        assert_eq!(backend.len(), 10_000);

        clock.advance(Duration::from_secs(3600));
        for i in 0..100 {
            backend
                .set(&format!("birdeye:price:{}", i), "1.0".into(), 60)
                .await
                .unwrap();
        }

        assert_eq!(backend.len(), 100);
    }

    #[tokio::test]
    async fn test_no_sweep_before_interval_elapses() {
        let (backend, clock) = backend_with_clock();
        backend.set("short", "1".into(), 1).await.unwrap();

        clock.advance(Duration::from_secs(5));
        backend.set("other", "2".into(), 600).await.unwrap();
        assert_eq!(backend.len(), 2);

        clock.advance(Duration::from_secs(SWEEP_INTERVAL_SECS as u64));
        backend.set("third", "3".into(), 600).await.unwrap();
        assert_eq!(backend.len(), 2);
        assert_eq!(backend.get("short").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_missing_key_is_ok() {
        let backend = MemoryBackend::new();
        assert!(backend.delete("never-set").await.is_ok());
    }
}
