//! Configuration management for Tinker
//!
//! Supports environment variables, config files, and runtime overrides.
//!
//! Config file location: ~/.config/tinker/config.toml

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

use crate::core::error::{Result, TinkerError};

/// Environment variable holding the API credential. Read at client
/// construction, never stored in the config file.
pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

/// Main configuration for Tinker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Anthropic API configuration
    pub api: ApiConfig,
    /// Agent configuration
    pub agent: AgentConfig,
    /// Session log configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Anthropic API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the API endpoint
    pub base_url: String,
    /// Model identifier
    pub model: String,
    /// Maximum tokens per response
    pub max_tokens: u32,
    /// API version header value
    pub version: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// Agent behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Maximum tool-use rounds per user input before stopping
    /// Default: 10
    pub max_rounds: usize,
    /// Whether to show debug output
    pub debug: bool,
    /// Optional system prompt
    pub system_prompt: Option<String>,
}

/// Session log configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Directory for session log files, relative to the working directory
    pub dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            agent: AgentConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: env::var("ANTHROPIC_BASE_URL")
                .unwrap_or_else(|_| "https://api.anthropic.com".to_string()),
            model: env::var("TINKER_MODEL")
                .unwrap_or_else(|_| "claude-3-7-sonnet-20250219".to_string()),
            max_tokens: 1024,
            version: "2023-06-01".to_string(),
            timeout_secs: 120,
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_rounds: 10,
            debug: env::var("TINKER_DEBUG")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            system_prompt: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: env::var("TINKER_LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("out")),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tinker")
    }

    /// Get the config file path
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Load configuration from file, environment, and defaults
    /// Priority: CLI args > env vars > config file > defaults
    pub fn load() -> Self {
        // Try to load .env file if it exists
        let _ = dotenvy::dotenv();

        // Try to load from config file
        if let Ok(config) = Self::load_from_file() {
            return config;
        }

        // Fall back to defaults (which respect env vars)
        Self::default()
    }

    /// Load configuration from file only
    pub fn load_from_file() -> Result<Self> {
        let config_path = Self::config_file();

        if !config_path.exists() {
            return Err(TinkerError::config("Config file not found"));
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|e| TinkerError::config(format!("Failed to read config: {}", e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| TinkerError::config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_dir = Self::config_dir();
        let config_path = Self::config_file();

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .map_err(|e| TinkerError::config(format!("Failed to create config dir: {}", e)))?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| TinkerError::config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, content)
            .map_err(|e| TinkerError::config(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// The full URL of the messages endpoint
    pub fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.api.base_url.trim_end_matches('/'))
    }

    /// Update the model
    pub fn set_model(&mut self, model: impl Into<String>) {
        self.api.model = model.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.max_tokens, 1024);
        assert_eq!(config.api.version, "2023-06-01");
        assert_eq!(config.agent.max_rounds, 10);
        assert_eq!(config.logging.dir, PathBuf::from("out"));
    }

    #[test]
    fn test_messages_url() {
        let mut config = Config::default();
        config.api.base_url = "https://api.anthropic.com".to_string();
        assert_eq!(config.messages_url(), "https://api.anthropic.com/v1/messages");

        config.api.base_url = "http://localhost:8080/".to_string();
        assert_eq!(config.messages_url(), "http://localhost:8080/v1/messages");
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("max_rounds"));
        assert!(toml_str.contains("base_url"));
        // The credential never round-trips through the config file
        assert!(!toml_str.contains("api_key"));
    }

    #[test]
    fn test_config_dir() {
        let dir = Config::config_dir();
        assert!(dir.to_string_lossy().contains("tinker"));
    }
}
