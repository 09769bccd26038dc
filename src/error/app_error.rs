use thiserror::Error;

use crate::config::ConfigError;
use crate::external::FetchError;
use crate::external::xview::ParseError;
use crate::thumbnail::ThumbnailError;

/// Application-wide error type that represents all possible errors in the system.
///
/// Component errors are wrapped unchanged so command handlers can map each
/// failure kind onto its own user-facing message.
#[derive(Error, Debug)]
pub enum AppError {
    /// The site could not be reached or answered with an error status
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The site answered but the page could not be understood
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Thumbnail download or processing failed
    #[error(transparent)]
    Thumbnail(#[from] ThumbnailError),

    /// Input rejected before any request was made
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Resource not found error with entity, field, and value information
    #[error("Resource not found: {entity} with {field}={value}")]
    NotFound {
        entity: String,
        field: String,
        value: String,
    },

    /// Configuration error with key information
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn not_found(
        entity: impl Into<String>,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::NotFound {
            entity: entity.into(),
            field: field.into(),
            value: value.into(),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        let key = error.field().unwrap_or("settings").to_string();
        AppError::Configuration {
            key,
            source: error.into(),
        }
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(error: tokio::task::JoinError) -> Self {
        AppError::Internal {
            source: error.into(),
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;
