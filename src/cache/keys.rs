//! Cache key construction
//!
//! Collaborators build logical keys as `<provider>:<resource>:<identifier>`.
//! The cache prefixes every logical key with `KEY_PREFIX` before it reaches a
//! backend, so entries never collide with other tenants of a shared store.

/// Namespace applied beneath every logical key
pub const KEY_PREFIX: &str = "solenrich:";

/// Build a logical key, e.g. `cache_key("birdeye", "price", mint)`
pub fn cache_key(provider: &str, resource: &str, identifier: &str) -> String {
    format!("{}:{}:{}", provider, resource, identifier)
}

pub(crate) fn namespaced(key: &str) -> String {
    format!("{}{}", KEY_PREFIX, key)
}
