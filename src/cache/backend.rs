use super::types::BackendKind;
use crate::errors::CacheError;
use async_trait::async_trait;

/// Storage contract shared by the remote and in-memory stores
///
/// Keys arrive already namespaced and values already serialized; a backend
/// only moves text. Errors are returned here and swallowed by `Cache`.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    fn kind(&self) -> BackendKind;

    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    async fn set(&self, key: &str, value: String, ttl_seconds: u64) -> Result<(), CacheError>;

    async fn delete(&self, key: &str) -> Result<(), CacheError>;
}
