//! Command-line interface definition for Parlay
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for the interactive chat session and the gateway.

use clap::{Parser, Subcommand};

/// Parlay - terminal chat client and gateway proxy for AI backends
#[derive(Parser, Debug, Clone)]
#[command(name = "parlay")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Parlay
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start an interactive chat session against the gateway
    Chat {
        /// Override the gateway base URL from config
        #[arg(long)]
        api_base: Option<String>,
    },

    /// Run the gateway that relays requests to the AI backend
    Serve {
        /// Override the listen address from config
        #[arg(long)]
        bind: Option<String>,

        /// Override the backend base URL from config
        #[arg(long)]
        backend_url: Option<String>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            verbose: false,
            command: Commands::Chat { api_base: None },
        }
    }
}
