//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    pub openai_api_key: String,
    pub openai_base_url: Option<String>,
    pub generation_model: String,
    pub generation_max_tokens: u32,
    pub allowed_origin: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // --- Load Server Settings ---
        let bind_address_str =
            lookup("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let allowed_origin =
            lookup("ALLOWED_ORIGIN").unwrap_or_else(|| "http://localhost:5173".to_string());

        // --- Load Generation Backend Settings ---
        let openai_api_key = lookup("OPENAI_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingVar("OPENAI_API_KEY".to_string()))?;
        let openai_base_url = lookup("OPENAI_BASE_URL").filter(|url| !url.trim().is_empty());

        let generation_model =
            lookup("GENERATION_MODEL").unwrap_or_else(|| "gpt-4o-mini".to_string());
        let generation_max_tokens = match lookup("GENERATION_MAX_TOKENS") {
            Some(raw) => raw.parse::<u32>().map_err(|e| {
                ConfigError::InvalidValue("GENERATION_MAX_TOKENS".to_string(), e.to_string())
            })?,
            None => 1024,
        };

        Ok(Self {
            bind_address,
            log_level,
            openai_api_key,
            openai_base_url,
            generation_model,
            generation_max_tokens,
            allowed_origin,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_only_the_key_is_set() {
        let config = load(&[("OPENAI_API_KEY", "sk-test")]).unwrap();
        assert_eq!(config.bind_address, "0.0.0.0:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.log_level, Level::INFO);
        assert_eq!(config.generation_model, "gpt-4o-mini");
        assert_eq!(config.generation_max_tokens, 1024);
        assert_eq!(config.openai_base_url, None);
        assert_eq!(config.allowed_origin, "http://localhost:5173");
    }

    #[test]
    fn api_key_is_required() {
        assert!(matches!(
            load(&[]),
            Err(ConfigError::MissingVar(var)) if var == "OPENAI_API_KEY"
        ));
        assert!(load(&[("OPENAI_API_KEY", "  ")]).is_err());
    }

    #[test]
    fn invalid_values_are_reported() {
        let err = load(&[("OPENAI_API_KEY", "k"), ("GENERATION_MAX_TOKENS", "lots")])
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(var, _) if var == "GENERATION_MAX_TOKENS"));

        let err = load(&[("OPENAI_API_KEY", "k"), ("RUST_LOG", "chatty")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(var, _) if var == "RUST_LOG"));
    }

    #[test]
    fn overrides_are_honoured() {
        let config = load(&[
            ("OPENAI_API_KEY", "k"),
            ("OPENAI_BASE_URL", "https://example.test/v1"),
            ("GENERATION_MODEL", "gemini-2.5-flash"),
            ("BIND_ADDRESS", "127.0.0.1:8080"),
            ("RUST_LOG", "debug"),
        ])
        .unwrap();
        assert_eq!(config.openai_base_url.as_deref(), Some("https://example.test/v1"));
        assert_eq!(config.generation_model, "gemini-2.5-flash");
        assert_eq!(config.bind_address.port(), 8080);
        assert_eq!(config.log_level, Level::DEBUG);
    }
}
