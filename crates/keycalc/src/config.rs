//! Calculator configuration
//!
//! Display texts and key mapping options. Loaded from YAML or built in code.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::buffer::is_numeral;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while loading or validating a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("Failed to read config {path}: {source}")]
    Io {
        /// Path that was read
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The YAML could not be parsed
    #[error("Invalid config YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// A value failed validation
    #[error("Invalid config value for `{field}`: {message}")]
    Invalid {
        /// Offending field
        field: &'static str,
        /// What is wrong with it
        message: String,
    },
}

impl ConfigError {
    /// Create a validation error
    #[must_use]
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            message: message.into(),
        }
    }
}

/// Alphabet used for operator symbols in the secondary display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolStyle {
    /// `+ − × ÷`
    #[default]
    Unicode,
    /// `+ - * /`
    Ascii,
}

/// Calculator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalcConfig {
    /// Text shown in the primary display while errored
    pub error_marker: String,
    /// Explanation shown in the secondary display while errored
    pub error_message: String,
    /// Operator symbol alphabet
    pub symbols: SymbolStyle,
    /// Treat `,` as a decimal point key
    pub comma_decimal: bool,
}

impl Default for CalcConfig {
    fn default() -> Self {
        Self {
            error_marker: Self::DEFAULT_ERROR_MARKER.to_string(),
            error_message: Self::DEFAULT_ERROR_MESSAGE.to_string(),
            symbols: SymbolStyle::Unicode,
            comma_decimal: true,
        }
    }
}

impl CalcConfig {
    /// Default primary display text while errored
    pub const DEFAULT_ERROR_MARKER: &'static str = "Error";
    /// Default secondary display text while errored
    pub const DEFAULT_ERROR_MESSAGE: &'static str = "Division by zero or invalid operation";

    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the error marker
    #[must_use]
    pub fn with_error_marker(mut self, marker: impl Into<String>) -> Self {
        self.error_marker = marker.into();
        self
    }

    /// Set the error message
    #[must_use]
    pub fn with_error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = message.into();
        self
    }

    /// Set the operator symbol style
    #[must_use]
    pub const fn with_symbols(mut self, symbols: SymbolStyle) -> Self {
        self.symbols = symbols;
        self
    }

    /// Set whether `,` acts as a decimal point
    #[must_use]
    pub const fn with_comma_decimal(mut self, comma_decimal: bool) -> Self {
        self.comma_decimal = comma_decimal;
        self
    }

    /// Parses and validates a YAML document
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a YAML file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Renders the configuration as YAML
    pub fn to_yaml(&self) -> ConfigResult<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Checks that the error marker can never be mistaken for a number
    pub fn validate(&self) -> ConfigResult<()> {
        if self.error_marker.trim().is_empty() {
            return Err(ConfigError::invalid("error_marker", "must not be empty"));
        }
        if is_numeral(&self.error_marker) {
            return Err(ConfigError::invalid(
                "error_marker",
                format!("{:?} parses as a number", self.error_marker),
            ));
        }
        Ok(())
    }
}
