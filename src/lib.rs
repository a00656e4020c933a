//! Parlay - terminal chat client and gateway proxy for AI backends
//!
//! This library provides the components behind the `parlay` binary: the
//! gateway that relays prompts to a configured backend, the client and
//! session state machine used by the interactive chat, and the reply
//! normalization and rendering layers.
//!
//! # Architecture
//!
//! - `gateway`: same-origin HTTP relay to the backend
//! - `client`: reqwest wrapper for the gateway endpoints
//! - `session`: Idle/Busy chat state machine owning the transcript
//! - `normalizer`: total extraction of display content and tools
//! - `message`: transcript message model
//! - `render`: markdown to ANSI terminal output
//! - `config`: configuration management and validation
//! - `error`: error types and result alias
//! - `cli`: command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use parlay::cli::Cli;
//! use parlay::config::Config;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/config.yaml", &Cli::default())?;
//!     config.validate()?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod gateway;
pub mod message;
pub mod normalizer;
pub mod render;
pub mod session;

// Re-export commonly used types
pub use client::GatewayClient;
pub use config::Config;
pub use error::{ParlayError, Result};
pub use gateway::{router, GatewayState};
pub use message::{Message, Role, ToolUse};
pub use normalizer::{normalize, normalize_with_fallback, NormalizedReply};
pub use session::{ChatSession, Pending, Phase};
