use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;
use tempfile::TempDir;

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}

/// Start a gateway on an ephemeral port, forwarding to `backend_base`.
#[allow(dead_code)]
pub async fn spawn_gateway(backend_base: &str) -> SocketAddr {
    let state = parlay::gateway::GatewayState::new(backend_base).expect("gateway state");
    let app = parlay::gateway::router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("gateway serve");
    });
    addr
}
