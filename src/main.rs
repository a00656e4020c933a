//! Parlay - terminal chat client and gateway proxy
//!
//! Main entry point for the `parlay` binary.

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use parlay::cli::{Cli, Commands};
use parlay::commands;
use parlay::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    init_tracing();

    // Parse command line arguments
    let cli = Cli::parse_args();

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Chat { api_base } => {
            tracing::info!("Starting interactive chat session");
            if let Some(base) = &api_base {
                tracing::debug!("Using gateway override: {}", base);
            }

            commands::chat::run_chat(config, api_base).await?;
            Ok(())
        }
        Commands::Serve { bind, backend_url } => {
            tracing::info!("Starting gateway");
            if let Some(bind) = &bind {
                tracing::debug!("Using bind override: {}", bind);
            }
            if let Some(url) = &backend_url {
                tracing::debug!("Using backend override: {}", url);
            }

            commands::serve::run_serve(config, bind, backend_url).await?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("parlay=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
