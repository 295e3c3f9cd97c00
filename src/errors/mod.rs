//! Error types for the cache, the parallel orchestrator and configuration
//!
//! None of these reach callers of `Cache` or `parallel_fetch`; they exist so
//! recovered failures can be logged with a precise cause.
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Remote store returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Remote store error: {0}")]
    Remote(String),

    #[error("Unexpected response from remote store: {0}")]
    UnexpectedResponse(String),

    #[error("Invalid endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },
}

/// Why a fan-out task produced no value
#[derive(Error, Debug)]
pub enum TaskFailure {
    #[error("{0}")]
    Failed(anyhow::Error),

    #[error("Timed out after {}ms", .0.as_millis())]
    TimedOut(Duration),

    #[error("Task panicked: {0}")]
    Panicked(String),
}

impl TaskFailure {
    pub fn is_timeout(&self) -> bool {
        matches!(self, TaskFailure::TimedOut(_))
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value for {var}: '{value}'")]
    InvalidEnv { var: String, value: String },
}
