//! Gateway command handler
//!
//! Binds the configured address and serves the gateway router until the
//! process is stopped.

use crate::config::Config;
use crate::error::{ParlayError, Result};
use crate::gateway::{router, GatewayState};

/// Run the gateway.
///
/// # Arguments
///
/// * `config` - Global configuration (consumed)
/// * `bind` - Optional override for the listen address
/// * `backend_url` - Optional override for the backend base URL
pub async fn run_serve(
    config: Config,
    bind: Option<String>,
    backend_url: Option<String>,
) -> Result<()> {
    let bind = bind.unwrap_or_else(|| config.gateway.bind.clone());
    let backend_base = backend_url.unwrap_or_else(|| config.backend.base_url.clone());

    let state = GatewayState::new(backend_base.as_str())?;
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .map_err(|e| ParlayError::Gateway(format!("Failed to bind {}: {}", bind, e)))?;

    tracing::info!(
        "Gateway listening on {} (backend at {})",
        listener.local_addr()?,
        backend_base
    );

    axum::serve(listener, app).await?;
    Ok(())
}
