//! Error types for the Scholia application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Scholia application.
///
/// Errors here are programmer-misuse or environment conditions; dispatch
/// outcomes (including transport failures) are domain values, not errors.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum ScholiaError {
    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ScholiaError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// A type alias for `Result<T, ScholiaError>`.
pub type Result<T> = std::result::Result<T, ScholiaError>;
