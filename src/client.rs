//! HTTP client for the gateway
//!
//! Thin reqwest wrapper used by the chat session for its two calls. A
//! non-2xx gateway reply is an error: the chat view distinguishes
//! success from failure only by the status of the gateway call itself,
//! never by fields inside a relayed body.

use crate::error::{ParlayError, Result};
use serde_json::{json, Value};

/// Client for the gateway's `/api/prompt` and `/api/instructions`
/// endpoints.
///
/// No request timeout is configured; the transport default applies.
pub struct GatewayClient {
    client: reqwest::Client,
    api_base: String,
}

impl GatewayClient {
    /// Create a client for the given gateway base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if HTTP client initialization fails.
    pub fn new(api_base: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("parlay/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ParlayError::Chat(format!("Failed to create HTTP client: {}", e)))?;

        let api_base = api_base.into().trim_end_matches('/').to_string();

        Ok(Self { client, api_base })
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Submit a prompt and return the gateway's decoded JSON reply.
    pub async fn post_prompt(&self, prompt: &str) -> Result<Value> {
        self.post("/api/prompt", json!({ "prompt": prompt })).await
    }

    /// Submit instructions and return the gateway's decoded JSON reply.
    pub async fn post_instructions(&self, instructions: &str) -> Result<Value> {
        self.post("/api/instructions", json!({ "instructions": instructions }))
            .await
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value> {
        let url = format!("{}{}", self.api_base, path);
        tracing::debug!(url = %url, "Sending request to gateway");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ParlayError::Chat(format!("Request to {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ParlayError::Chat(format!("Gateway returned status {}", status)).into());
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ParlayError::Chat(format!("Failed to parse gateway reply: {}", e)).into())
    }
}
