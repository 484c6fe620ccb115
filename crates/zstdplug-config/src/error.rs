//! Error types for configuration management

use std::path::PathBuf;
use thiserror::Error;
use zstdplug_types::Error as PluginError;

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file could not be read or parsed
    #[error("Failed to load config file '{path}': {message}")]
    Load {
        /// Path to the configuration file
        path: PathBuf,
        /// Error message
        message: String,
    },

    /// Configuration validation error
    #[error("Configuration validation failed: {message}")]
    Validation {
        /// Validation error message
        message: String,
    },

    /// Invalid configuration value
    #[error("Invalid value for '{key}': {message}")]
    InvalidValue {
        /// Configuration key or command-line option
        key: String,
        /// Error message
        message: String,
    },

    /// Serialization error
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error message
        message: String,
    },

    /// Error reported by the configuration loader
    #[error("Configuration error: {0}")]
    Source(#[from] config::ConfigError),
}

impl ConfigError {
    /// Create a validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value<K: Into<String>, S: Into<String>>(key: K, message: S) -> Self {
        Self::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization<S: Into<String>>(message: S) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }
}

impl From<ConfigError> for PluginError {
    fn from(error: ConfigError) -> Self {
        Self::config(error.to_string())
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;
    use zstdplug_types::ErrorKind;

    #[test]
    fn test_conversion_to_plugin_error() {
        let error: PluginError = ConfigError::invalid_value("-ZstdLevel=", "'abc'").into();
        assert_eq!(error.kind(), ErrorKind::Config);
        assert!(error.to_string().contains("-ZstdLevel="));
    }
}
