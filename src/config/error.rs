//! Configuration error types.

use thiserror::Error;

/// Errors from loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The environment could not be read into the typed configuration.
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// The configuration loaded but failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Validation failures for loaded configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required value was not provided.
    #[error("missing required configuration: {0}")]
    MissingRequired(&'static str),

    /// A provided value is unusable.
    #[error("invalid configuration value for {field}: {reason}")]
    InvalidValue {
        /// The offending field.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

impl ValidationError {
    /// Creates an invalid value error.
    pub fn invalid_value(field: &'static str, reason: impl Into<String>) -> Self {
        ValidationError::InvalidValue {
            field,
            reason: reason.into(),
        }
    }
}
