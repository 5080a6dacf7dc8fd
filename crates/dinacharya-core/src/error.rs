//! Core error types for dinacharya-core.
//!
//! The scheduling algorithms themselves never fail: missing overlap, unknown
//! task types and degenerate durations are all handled as data. Errors only
//! come from the edges, i.e. parsing clock strings and reading configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for dinacharya-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A clock string could not be parsed
    #[error("Time format error: {0}")]
    TimeFormat(#[from] TimeFormatError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Failure to read an `HH:MM` clock string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeFormatError {
    /// The input does not have exactly one `:` separator
    #[error("expected HH:MM, got '{input}'")]
    MissingSeparator { input: String },

    /// The hour or minute component is not an unsigned integer
    #[error("invalid {component} in '{input}'")]
    InvalidComponent {
        input: String,
        component: &'static str,
    },

    /// A work window was not written as `START-END`
    #[error("expected START-END window, got '{input}'")]
    InvalidWindow { input: String },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// The configuration directory could not be created
    #[error("Configuration directory unavailable: {0}")]
    NoConfigDir(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_format_error_names_input() {
        let err = TimeFormatError::MissingSeparator {
            input: "0900".to_string(),
        };
        assert_eq!(err.to_string(), "expected HH:MM, got '0900'");
    }

    #[test]
    fn core_error_wraps_time_format() {
        let err: CoreError = TimeFormatError::InvalidComponent {
            input: "aa:00".to_string(),
            component: "hour",
        }
        .into();
        assert!(err.to_string().contains("invalid hour in 'aa:00'"));
    }
}
