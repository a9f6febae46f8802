//! Error types for the Mentora platform.

use crate::session::SessionStatus;
use thiserror::Error;

/// A shared error type for the entire Mentora platform.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait. The lifecycle engine never
/// recovers from these locally; callers decide user-facing behavior.
#[derive(Error, Debug, Clone)]
pub enum MentoraError {
    /// Entity not found error with type information
    #[error("{entity_type} not found: '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Actor is not allowed to perform the operation
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Current session status does not permit the requested operation
    #[error("cannot {operation} a {status} session")]
    InvalidTransition {
        status: SessionStatus,
        operation: &'static str,
    },

    /// Required field missing or value out of range
    #[error("validation error: {0}")]
    Validation(String),

    /// Data access error (repository/storage layer)
    #[error("data access error: {0}")]
    DataAccess(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Internal error (should not happen in normal operation)
    #[error("internal error: {0}")]
    Internal(String),
}

impl MentoraError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a Forbidden error
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    /// Creates an InvalidTransition error
    pub fn invalid_transition(status: SessionStatus, operation: &'static str) -> Self {
        Self::InvalidTransition { status, operation }
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a DataAccess error
    pub fn data_access(message: impl Into<String>) -> Self {
        Self::DataAccess(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a Forbidden error
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Forbidden(_))
    }

    /// Check if this is an InvalidTransition error
    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, Self::InvalidTransition { .. })
    }

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this error came from the storage layer rather than a guard.
    ///
    /// Returns true for `DataAccess`, `Io`, and `Serialization` errors.
    /// Callers use this to distinguish repository failures from lifecycle
    /// rule violations.
    pub fn is_repository_failure(&self) -> bool {
        matches!(
            self,
            Self::DataAccess(_) | Self::Io { .. } | Self::Serialization { .. }
        )
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for MentoraError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for MentoraError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for MentoraError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for MentoraError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, MentoraError>`.
pub type Result<T> = std::result::Result<T, MentoraError>;
