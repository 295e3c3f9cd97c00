//! SolEnrich core utilities
//!
//! Two leaf primitives shared by the upstream data-provider clients:
//!
//! - [`cache::Cache`]: best-effort key-value cache over a remote REST store or
//!   an in-process fallback, selected once at construction.
//! - [`parallel::parallel_fetch`]: failure-isolated fan-out of named async
//!   lookups, each bounded by its own timeout.

pub mod cache;
pub mod config;
pub mod errors;
pub mod logger;
pub mod parallel;

pub use cache::{cache_key, Cache, CacheTtl};
pub use parallel::{
    parallel_fetch, parallel_fetch_configured, parallel_fetch_default, ParallelTask,
};
