//! Shared HTTP client construction for the provider clients

use anyhow::{Context, Result};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::PawcastError;

const USER_AGENT: &str = concat!("pawcast/", env!("CARGO_PKG_VERSION"));

/// Build a client with a request timeout and exponential-backoff retries on transient failures.
pub fn build_client(timeout_seconds: u32, max_retries: u32) -> Result<ClientWithMiddleware> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_seconds.into()))
        .user_agent(USER_AGENT)
        .build()
        .with_context(|| "Failed to create HTTP client")?;

    let retry_policy = ExponentialBackoff::builder().build_with_max_retries(max_retries);

    Ok(ClientBuilder::new(client)
        .with(RetryTransientMiddleware::new_with_policy(retry_policy))
        .build())
}

/// Raw provider response. Non-2xx bodies are kept so callers can decode
/// provider-specific error payloads.
#[derive(Debug)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Fetch `url`. Only transport failures are errors here.
pub async fn get_text(
    client: &ClientWithMiddleware,
    url: &str,
) -> std::result::Result<HttpReply, PawcastError> {
    let start = Instant::now();
    let response = client.get(url).send().await.map_err(|e| {
        warn!("HTTP request failed: {e}");
        PawcastError::api(format!("Request failed: {e}"))
    })?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| PawcastError::api(format!("Failed to read response body: {e}")))?;

    debug!(
        "HTTP {} in {:.3}s ({} bytes)",
        status,
        start.elapsed().as_secs_f64(),
        body.len()
    );

    Ok(HttpReply {
        status: status.as_u16(),
        body,
    })
}

/// Decode a JSON body, reporting the payload type on failure.
pub fn decode<T: DeserializeOwned>(body: &str, what: &str) -> std::result::Result<T, PawcastError> {
    serde_json::from_str(body)
        .map_err(|e| PawcastError::api(format!("Failed to parse {what} response: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        value: u32,
    }

    #[test]
    fn test_build_client() {
        assert!(build_client(10, 3).is_ok());
    }

    #[test]
    fn test_reply_status() {
        let ok = HttpReply {
            status: 204,
            body: String::new(),
        };
        let failed = HttpReply {
            status: 401,
            body: "{}".to_string(),
        };
        assert!(ok.is_success());
        assert!(!failed.is_success());
    }

    #[test]
    fn test_decode() {
        let payload: Payload = decode(r#"{"value": 4}"#, "test").unwrap();
        assert_eq!(payload.value, 4);

        let err = decode::<Payload>("not json", "test").unwrap_err();
        assert!(err.to_string().contains("Failed to parse test response"));
    }
}
