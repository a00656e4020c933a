//! Error types for Parlay
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

#![allow(dead_code)]

use thiserror::Error;

/// Main error type for Parlay operations
///
/// This enum encompasses all possible errors that can occur while loading
/// configuration, running the gateway, or talking to it from the chat
/// session.
#[derive(Error, Debug)]
pub enum ParlayError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Gateway errors (startup, forwarding, backend decode)
    #[error("Gateway error: {0}")]
    Gateway(String),

    /// Chat client errors (gateway unreachable, bad status, bad body)
    #[error("Chat error: {0}")]
    Chat(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for Parlay operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let error = ParlayError::Config("invalid format".to_string());
        assert_eq!(error.to_string(), "Configuration error: invalid format");
    }

    #[test]
    fn test_gateway_error_display() {
        let error = ParlayError::Gateway("bind failed".to_string());
        assert_eq!(error.to_string(), "Gateway error: bind failed");
    }

    #[test]
    fn test_chat_error_display() {
        let error = ParlayError::Chat("gateway returned status 500".to_string());
        assert_eq!(error.to_string(), "Chat error: gateway returned status 500");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: ParlayError = io_error.into();
        assert!(matches!(error, ParlayError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_str = "{invalid json}";
        let json_error = serde_json::from_str::<serde_json::Value>(json_str).unwrap_err();
        let error: ParlayError = json_error.into();
        assert!(matches!(error, ParlayError::Serialization(_)));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_str = "invalid: : yaml";
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>(yaml_str).unwrap_err();
        let error: ParlayError = yaml_error.into();
        assert!(matches!(error, ParlayError::Yaml(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ParlayError>();
    }
}
