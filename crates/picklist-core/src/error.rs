//! Error types for picklist-core.
//!
//! Rendering and interaction never fail; only loading configuration does.

use thiserror::Error;

/// Errors raised while loading widget configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// YAML could not be parsed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// A field held a value outside its allowed range.
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue {
        /// Field name
        field: String,
        /// What was wrong
        message: String,
    },

    /// A theme override named a style key that does not exist.
    #[error("Unknown style key: {0}")]
    UnknownStyleKey(String),
}
