//! Error types for the CLI

use keycalc::config::ConfigError;
use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal setup or rendering error
    #[error("Terminal error: {message}")]
    Terminal {
        /// Error message
        message: String,
    },

    /// A key script character that stands for no key
    #[error("Invalid key {key:?} at position {position}")]
    InvalidKeys {
        /// Offending character
        key: char,
        /// Zero-based character position in the script
        position: usize,
    },

    /// Output serialization error
    #[error("Output error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Create a terminal error
    #[must_use]
    pub fn terminal(message: impl Into<String>) -> Self {
        Self::Terminal {
            message: message.into(),
        }
    }

    /// Create an invalid key error, locating `key` in `script`
    #[must_use]
    pub fn invalid_key(script: &str, key: char) -> Self {
        let position = script.chars().position(|c| c == key).unwrap_or(0);
        Self::InvalidKeys { key, position }
    }
}
