//! Remote shared store over the Upstash Redis REST protocol
//!
//! Every command is a `POST` to the endpoint root carrying a JSON array body
//! and a bearer token:
//!
//! - `["GET", key]` -> `{"result": "<text>" | null}`
//! - `["SET", key, value, "EX", ttl]` -> `{"result": "OK"}`
//! - `["DEL", key]` -> `{"result": <count>}`
//!
//! A `{"error": "..."}` body or a non-2xx status is a backend error.
use super::backend::CacheBackend;
use super::types::BackendKind;
use crate::errors::CacheError;
use crate::logger::{self, LogTag};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use url::Url;

/// Longest response body kept in an error message
const MAX_ERROR_BODY: usize = 200;

#[derive(Debug, Deserialize)]
struct RestReply {
    #[serde(default)]
    result: Value,
    #[serde(default)]
    error: Option<String>,
}

pub struct RemoteBackend {
    client: Client,
    endpoint: Url,
    token: String,
}

impl RemoteBackend {
    /// Validate the endpoint and build the HTTP client
    ///
    /// No request is made here; an unreachable store surfaces later as
    /// per-operation errors.
    pub fn new(url: &str, token: &str, request_timeout: Duration) -> Result<Self, CacheError> {
        let endpoint = Url::parse(url).map_err(|e| CacheError::InvalidEndpoint {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(CacheError::InvalidEndpoint {
                url: url.to_string(),
                reason: format!("unsupported scheme '{}'", endpoint.scheme()),
            });
        }

        let client = Client::builder().timeout(request_timeout).build()?;

        Ok(Self {
            client,
            endpoint,
            token: token.to_string(),
        })
    }

    /// Host of the configured endpoint, for log lines that must not leak the token
    pub fn host(&self) -> &str {
        self.endpoint.host_str().unwrap_or("unknown")
    }

    async fn command(&self, args: Value) -> Result<Value, CacheError> {
        logger::debug(LogTag::Cache, &trace_line(&args, self.host()));

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.token)
            .json(&args)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        // Upstash reports command errors as {"error": ..} alongside a 4xx
        let reply = serde_json::from_str::<RestReply>(&body);
        if let Ok(RestReply {
            error: Some(message),
            ..
        }) = &reply
        {
            return Err(CacheError::Remote(message.clone()));
        }

        if !status.is_success() {
            return Err(CacheError::Status {
                status: status.as_u16(),
                body: truncate(&body),
            });
        }

        reply
            .map(|r| r.result)
            .map_err(|_| CacheError::UnexpectedResponse(truncate(&body)))
    }
}

#[async_trait]
impl CacheBackend for RemoteBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Remote
    }

    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        match self.command(json!(["GET", key])).await? {
            Value::Null => Ok(None),
            Value::String(text) => Ok(Some(text)),
            // Already-structured value; hand back its JSON text
            other => Ok(Some(other.to_string())),
        }
    }

    async fn set(&self, key: &str, value: String, ttl_seconds: u64) -> Result<(), CacheError> {
        match self
            .command(json!(["SET", key, value, "EX", ttl_seconds]))
            .await?
        {
            Value::String(ack) if ack == "OK" => Ok(()),
            other => Err(CacheError::UnexpectedResponse(other.to_string())),
        }
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.command(json!(["DEL", key])).await.map(|_| ())
    }
}

/// Command name and key only; stored payloads stay out of the log
fn trace_line(args: &Value, host: &str) -> String {
    let words: Vec<&str> = args
        .as_array()
        .map(|items| items.iter().take(2).filter_map(Value::as_str).collect())
        .unwrap_or_default();
    format!("{} -> {}", words.join(" "), host)
}

fn truncate(body: &str) -> String {
    if body.len() <= MAX_ERROR_BODY {
        return body.to_string();
    }
    let mut end = MAX_ERROR_BODY;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    const TOKEN: &str = "AXk0test";

    fn backend_for(server: &mockito::ServerGuard) -> RemoteBackend {
        RemoteBackend::new(&server.url(), TOKEN, Duration::from_secs(2)).unwrap()
    }

    #[test]
    fn test_trace_line_omits_payload() {
        let line = trace_line(
            &json!(["SET", "solenrich:birdeye:price:So1", "{\"price\":142.7}", "EX", 60]),
            "eu1-fond-cat.upstash.io",
        );
        assert_eq!(line, "SET solenrich:birdeye:price:So1 -> eu1-fond-cat.upstash.io");
    }

    #[test]
    fn test_rejects_unparseable_endpoint() {
        let err = RemoteBackend::new("not a url", TOKEN, Duration::from_secs(1)).err();
        assert!(matches!(err, Some(CacheError::InvalidEndpoint { .. })));
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let err = RemoteBackend::new("redis://localhost:6379", TOKEN, Duration::from_secs(1)).err();
        assert!(matches!(err, Some(CacheError::InvalidEndpoint { .. })));
    }

    #[tokio::test]
    async fn test_set_sends_ttl_and_bearer_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .match_header("authorization", "Bearer AXk0test")
            .match_body(Matcher::Json(json!(["SET", "solenrich:k", "{\"a\":1}", "EX", 60])))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"result":"OK"}"#)
            .create_async()
            .await;

        let backend = backend_for(&server);
        backend
            .set("solenrich:k", "{\"a\":1}".to_string(), 60)
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_null_is_none() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .match_body(Matcher::Json(json!(["GET", "solenrich:missing"])))
            .with_status(200)
            .with_body(r#"{"result":null}"#)
            .create_async()
            .await;

        let backend = backend_for(&server);
        assert_eq!(backend.get("solenrich:missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_get_structured_result_becomes_text() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(200)
            .with_body(r#"{"result":{"value":1.5}}"#)
            .create_async()
            .await;

        let backend = backend_for(&server);
        let raw = backend.get("solenrich:k").await.unwrap().unwrap();
        let parsed: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed, json!({"value": 1.5}));
    }

    #[tokio::test]
    async fn test_error_body_is_remote_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(400)
            .with_body(r#"{"error":"ERR invalid expire time in 'set' command"}"#)
            .create_async()
            .await;

        let backend = backend_for(&server);
        let err = backend.set("solenrich:k", "1".into(), 0).await.unwrap_err();
        assert!(matches!(err, CacheError::Remote(msg) if msg.contains("invalid expire")));
    }

    #[tokio::test]
    async fn test_unauthorized_is_status_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(401)
            .with_body("Unauthorized")
            .create_async()
            .await;

        let backend = backend_for(&server);
        let err = backend.delete("solenrich:k").await.unwrap_err();
        assert!(matches!(err, CacheError::Status { status: 401, .. }));
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let body = "é".repeat(MAX_ERROR_BODY);
        let out = truncate(&body);
        assert!(out.ends_with("..."));
        assert!(out.len() <= MAX_ERROR_BODY + 3);
    }
}
