//! Configuration file parsing for the chat service.
//!
//! Loads settings from TOML files including bind address, model
//! identifiers, and the API key (with environment fallback).

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Environment variable consulted when the config file carries no key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Server configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Missing required field
    #[error("Missing required configuration field: {0}")]
    MissingField(String),
}

/// Chat service configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1")
    pub bind_address: String,

    /// Bind port (e.g., 8080)
    pub bind_port: u16,

    /// Model used for answers; set the fine-tuned model id here once
    /// training has finished
    #[serde(default = "default_model_id")]
    pub model_id: String,

    /// Model used for the yes/no topical gate
    #[serde(default = "default_classifier_model")]
    pub classifier_model: String,

    /// API key; when absent, `OPENAI_API_KEY` from the environment is used
    #[serde(default)]
    pub openai_api_key: Option<String>,
}

fn default_model_id() -> String {
    "gpt-4o-mini-2024-07-18".to_string()
}

fn default_classifier_model() -> String {
    "gpt-4o-mini-2024-07-18".to_string()
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: ServerConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Create a default configuration for testing
    pub fn default_test_config() -> Self {
        ServerConfig {
            bind_address: "127.0.0.1".to_string(),
            bind_port: 8080,
            model_id: default_model_id(),
            classifier_model: default_classifier_model(),
            openai_api_key: None,
        }
    }

    /// Resolve the API key from config or environment.
    pub fn resolve_api_key(&self) -> Result<String, ConfigError> {
        if let Some(key) = &self.openai_api_key {
            if !key.is_empty() {
                return Ok(key.clone());
            }
        }
        std::env::var(API_KEY_ENV)
            .map_err(|_| ConfigError::MissingField("openai_api_key".to_string()))
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default_test_config();
        assert_eq!(config.bind_address, "127.0.0.1");
        assert_eq!(config.bind_port, 8080);
        assert_eq!(config.model_id, "gpt-4o-mini-2024-07-18");
    }

    #[test]
    fn test_bind_addr() {
        let config = ServerConfig::default_test_config();
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
            bind_address = "0.0.0.0"
            bind_port = 9000
            model_id = "ft:gpt-3.5-turbo:custom"
            classifier_model = "gpt-4o-mini-2024-07-18"
            openai_api_key = "sk-test"
        "#;

        let config: ServerConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.bind_address, "0.0.0.0");
        assert_eq!(config.bind_port, 9000);
        assert_eq!(config.model_id, "ft:gpt-3.5-turbo:custom");
        assert_eq!(config.openai_api_key.as_deref(), Some("sk-test"));
    }

    #[test]
    fn test_model_defaults_apply() {
        let toml = r#"
            bind_address = "127.0.0.1"
            bind_port = 8080
        "#;

        let config: ServerConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.model_id, "gpt-4o-mini-2024-07-18");
        assert_eq!(config.classifier_model, "gpt-4o-mini-2024-07-18");
    }

    #[test]
    fn test_resolve_api_key_from_config() {
        let mut config = ServerConfig::default_test_config();
        config.openai_api_key = Some("sk-from-config".to_string());
        assert_eq!(config.resolve_api_key().unwrap(), "sk-from-config");
    }
}
