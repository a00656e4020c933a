//! Same-origin gateway
//!
//! The gateway exposes `/api/prompt` and `/api/instructions` and relays
//! each JSON body verbatim to the configured backend. The backend's JSON
//! reply is returned unchanged with status 200 regardless of the status
//! the backend chose; only a failed forward (unreachable backend, body
//! that is not JSON, unreadable request) produces the generic 500 error.
//! No retries and no timeout are applied on top of the transport.

use crate::error::{ParlayError, Result};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

/// Error body returned when forwarding fails
pub const PROXY_ERROR_MESSAGE: &str = "Failed to proxy request to Python backend";

/// Shared state for the gateway handlers
///
/// The backend base URL is injected once at construction; handlers never
/// consult the environment.
#[derive(Clone)]
pub struct GatewayState {
    client: reqwest::Client,
    backend_base: String,
}

impl GatewayState {
    /// Create gateway state for the given backend base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if HTTP client initialization fails.
    pub fn new(backend_base: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("parlay/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ParlayError::Gateway(format!("Failed to create HTTP client: {}", e)))?;

        let backend_base = backend_base.into().trim_end_matches('/').to_string();

        Ok(Self {
            client,
            backend_base,
        })
    }

    pub fn backend_base(&self) -> &str {
        &self.backend_base
    }
}

/// Build the gateway router.
pub fn router(state: GatewayState) -> Router {
    Router::new()
        .route("/api/prompt", post(proxy_prompt))
        .route("/api/instructions", post(proxy_instructions))
        .route("/healthz", get(healthz))
        .with_state(state)
}

async fn healthz() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

async fn proxy_prompt(
    State(state): State<GatewayState>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> (StatusCode, Json<Value>) {
    relay(&state, "/prompt", body).await
}

async fn proxy_instructions(
    State(state): State<GatewayState>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> (StatusCode, Json<Value>) {
    relay(&state, "/instructions", body).await
}

async fn relay(
    state: &GatewayState,
    path: &str,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> (StatusCode, Json<Value>) {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => {
            tracing::error!("Proxy error: invalid request body: {}", rejection);
            return proxy_error();
        }
    };

    tracing::debug!(body = %body, "Forwarding request to backend{}", path);

    let url = format!("{}{}", state.backend_base, path);

    // The backend's status code is deliberately not inspected; its JSON
    // body is relayed as-is.
    let response = match state.client.post(&url).json(&body).send().await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!("Proxy error: {}", e);
            return proxy_error();
        }
    };

    match response.json::<Value>().await {
        Ok(data) => (StatusCode::OK, Json(data)),
        Err(e) => {
            tracing::error!("Proxy error: {}", e);
            proxy_error()
        }
    }
}

fn proxy_error() -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"error": PROXY_ERROR_MESSAGE})),
    )
}
