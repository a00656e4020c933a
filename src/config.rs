//! Configuration management for Parlay
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{ParlayError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for Parlay
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// AI backend the gateway forwards to
    #[serde(default)]
    pub backend: BackendConfig,

    /// Gateway server settings
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Interactive chat settings
    #[serde(default)]
    pub chat: ChatConfig,
}

/// Backend configuration
///
/// The base URL the gateway forwards prompt and instructions requests to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the AI backend
    #[serde(default = "default_backend_base_url")]
    pub base_url: String,
}

fn default_backend_base_url() -> String {
    "http://localhost:8000".to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_backend_base_url(),
        }
    }
}

/// Gateway server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Address the gateway listens on
    #[serde(default = "default_gateway_bind")]
    pub bind: String,
}

fn default_gateway_bind() -> String {
    "127.0.0.1:3000".to_string()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind: default_gateway_bind(),
        }
    }
}

/// Interactive chat configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Base URL of the gateway the chat session talks to
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Show message timestamps in the transcript
    #[serde(default = "default_show_timestamps")]
    pub show_timestamps: bool,
}

fn default_api_base() -> String {
    "http://localhost:3000".to_string()
}

fn default_show_timestamps() -> bool {
    true
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            show_timestamps: default_show_timestamps(),
        }
    }
}

impl Config {
    /// Load configuration from a file, then apply environment variable and
    /// CLI overrides.
    ///
    /// A missing file is not an error; defaults are used with a warning.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the YAML configuration file
    /// * `cli` - Parsed command line arguments
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ParlayError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| ParlayError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(base_url) = std::env::var("PYTHON_BACKEND_URL") {
            self.backend.base_url = base_url.clone();
            tracing::debug!(base_url = %base_url, "Env override: PYTHON_BACKEND_URL");
        }

        if let Ok(bind) = std::env::var("PARLAY_GATEWAY_BIND") {
            self.gateway.bind = bind.clone();
            tracing::debug!(bind = %bind, "Env override: PARLAY_GATEWAY_BIND");
        }

        if let Ok(api_base) = std::env::var("PARLAY_API_BASE") {
            self.chat.api_base = api_base.clone();
            tracing::debug!(api_base = %api_base, "Env override: PARLAY_API_BASE");
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if cli.verbose {
            tracing::debug!("Verbose mode enabled");
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error when a URL is not http(s) or the
    /// gateway bind address does not parse.
    pub fn validate(&self) -> Result<()> {
        validate_url("backend.base_url", &self.backend.base_url)?;
        validate_url("chat.api_base", &self.chat.api_base)?;

        self.gateway
            .bind
            .parse::<std::net::SocketAddr>()
            .map_err(|e| {
                ParlayError::Config(format!(
                    "gateway.bind '{}' is not a valid socket address: {}",
                    self.gateway.bind, e
                ))
            })?;

        Ok(())
    }
}

fn validate_url(field: &str, value: &str) -> Result<()> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ParlayError::Config(format!("{} must be an http(s) URL, got '{}'", field, value)).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        std::env::remove_var("PYTHON_BACKEND_URL");
        std::env::remove_var("PARLAY_GATEWAY_BIND");
        std::env::remove_var("PARLAY_API_BASE");
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.backend.base_url, "http://localhost:8000");
        assert_eq!(config.gateway.bind, "127.0.0.1:3000");
        assert_eq!(config.chat.api_base, "http://localhost:3000");
        assert!(config.chat.show_timestamps);
    }

    #[test]
    fn test_default_config_validates() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_parse_partial_yaml_fills_defaults() {
        let yaml = "backend:\n  base_url: http://backend:9000\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.backend.base_url, "http://backend:9000");
        assert_eq!(config.gateway.bind, "127.0.0.1:3000");
        assert!(config.chat.show_timestamps);
    }

    #[test]
    fn test_parse_full_yaml() {
        let yaml = r#"
backend:
  base_url: https://ai.internal
gateway:
  bind: 0.0.0.0:8080
chat:
  api_base: http://gateway.internal:8080
  show_timestamps: false
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.backend.base_url, "https://ai.internal");
        assert_eq!(config.gateway.bind, "0.0.0.0:8080");
        assert_eq!(config.chat.api_base, "http://gateway.internal:8080");
        assert!(!config.chat.show_timestamps);
    }

    #[test]
    fn test_validate_rejects_non_http_backend() {
        let config = Config {
            backend: BackendConfig {
                base_url: "localhost:8000".to_string(),
            },
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_bind() {
        let config = Config {
            gateway: GatewayConfig {
                bind: "not-an-address".to_string(),
            },
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_env_override_backend_url() {
        clear_env();
        std::env::set_var("PYTHON_BACKEND_URL", "http://backend.test:8001");

        let mut config = Config::default();
        config.apply_env_vars();
        assert_eq!(config.backend.base_url, "http://backend.test:8001");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_env_override_gateway_and_api_base() {
        clear_env();
        std::env::set_var("PARLAY_GATEWAY_BIND", "127.0.0.1:4000");
        std::env::set_var("PARLAY_API_BASE", "http://127.0.0.1:4000");

        let mut config = Config::default();
        config.apply_env_vars();
        assert_eq!(config.gateway.bind, "127.0.0.1:4000");
        assert_eq!(config.chat.api_base, "http://127.0.0.1:4000");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_load_missing_file_uses_defaults() {
        clear_env();
        let cli = crate::cli::Cli::default();
        let config = Config::load("does/not/exist.yaml", &cli).unwrap();
        assert_eq!(config.backend.base_url, "http://localhost:8000");
    }
}
