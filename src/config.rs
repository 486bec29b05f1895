//! Configuration management for the inventory assistant.
//!
//! Configuration can be set via environment variables:
//! - `GEMINI_API_KEY` - Required. API key for the model provider.
//! - `INVENTORY_MODEL` - Optional. Model identifier. Defaults to `gemini-2.5-flash`.
//! - `INVENTORY_BASE_URL` - Optional. OpenAI-compatible base URL. Defaults to
//!   Gemini's compatibility endpoint.
//! - `INVENTORY_MAX_TURNS` - Optional. Model round-trips allowed per command. Defaults to `10`.
//!
//! Variables missing from the process environment are looked up in a `.env`
//! file in the working directory.

use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai/";
pub const DEFAULT_MAX_TURNS: usize = 10;

/// Name of the optional file read next to the working directory.
pub const DOTENV_FILE: &str = ".env";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),

    #[error("Failed to read {0}: {1}")]
    Dotenv(String, dotenvy::Error),
}

/// Assistant configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Model provider API key
    pub api_key: String,

    /// Model identifier
    pub model: String,

    /// Base URL of the chat-completion endpoint
    pub base_url: String,

    /// Maximum model round-trips per command
    pub max_turns: usize,
}

impl Config {
    /// Load configuration from the environment, falling back to `./.env`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `GEMINI_API_KEY` is not set anywhere.
    pub fn from_env() -> Result<Self, ConfigError> {
        let file_vars = load_dotenv(Path::new(DOTENV_FILE))?;
        Self::from_lookup(|key| {
            std::env::var(key)
                .ok()
                .or_else(|| file_vars.get(key).cloned())
        })
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("GEMINI_API_KEY")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("GEMINI_API_KEY".to_string()))?;

        let model = lookup("INVENTORY_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let base_url = lookup("INVENTORY_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let max_turns = lookup("INVENTORY_MAX_TURNS")
            .map(|v| {
                v.trim()
                    .parse::<usize>()
                    .map_err(|e| ConfigError::InvalidValue("INVENTORY_MAX_TURNS".to_string(), format!("{}", e)))
            })
            .transpose()?
            .unwrap_or(DEFAULT_MAX_TURNS);

        if max_turns == 0 {
            return Err(ConfigError::InvalidValue(
                "INVENTORY_MAX_TURNS".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            api_key,
            model,
            base_url,
            max_turns,
        })
    }
}

/// Read variables from a dotenv file at `path`. A missing file yields none.
pub fn load_dotenv(path: &Path) -> Result<HashMap<String, String>, ConfigError> {
    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(e) if e.not_found() => return Ok(HashMap::new()),
        Err(e) => return Err(ConfigError::Dotenv(path.display().to_string(), e)),
    };

    let vars = iter
        .collect::<Result<HashMap<_, _>, _>>()
        .map_err(|e| ConfigError::Dotenv(path.display().to_string(), e))?;
    tracing::debug!("Loaded {} variable(s) from {}", vars.len(), path.display());
    Ok(vars)
}
