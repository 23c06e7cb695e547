//! Content service client
//!
//! `ContentSource` is the seam between pages and the network; the HTTP
//! implementation posts GraphQL bodies to the configured endpoint.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

use super::graphql::GraphQlRequest;
use super::ContentError;
use crate::config::ContentConfig;

/// Executes GraphQL requests and returns the raw JSON response body
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn execute(&self, request: &GraphQlRequest) -> Result<Value, ContentError>;

    /// Human-readable location used in logs
    fn describe(&self) -> &str;
}

/// `ContentSource` backed by an HTTP GraphQL endpoint
pub struct HttpContentClient {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpContentClient {
    pub fn new(config: &ContentConfig) -> Result<Self, ContentError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
        })
    }
}

#[async_trait]
impl ContentSource for HttpContentClient {
    async fn execute(&self, request: &GraphQlRequest) -> Result<Value, ContentError> {
        let response = self.http.post(&self.endpoint).json(request).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        // GraphQL servers often report failures with a non-2xx status and a
        // regular `{errors}` body, so the body is tried first.
        match serde_json::from_slice::<Value>(&body) {
            Ok(value) => Ok(value),
            Err(_) if !status.is_success() => Err(ContentError::Status(status.as_u16())),
            Err(e) => Err(ContentError::Decode(e)),
        }
    }

    fn describe(&self) -> &str {
        &self.endpoint
    }
}
