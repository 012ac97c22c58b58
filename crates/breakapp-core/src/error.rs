//! Error types for the BreakApp ordering engine.

use serde::Serialize;
use thiserror::Error;

/// A shared error type for the whole engine.
///
/// Logical gaps in a conversation (no entities, no menu match, no usual
/// order) are not errors; they are reported as command outcomes. This type
/// covers input errors, collaborator failures and storage problems.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum BreakAppError {
    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// The caller supplied missing or malformed input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Confirmation was requested for a session without a staged order
    #[error("Session '{session_id}' has no staged order to confirm")]
    NothingToConfirm { session_id: String },

    /// The session is already confirmed, cancelled or expired
    #[error("Session '{session_id}' is closed ({phase})")]
    SessionClosed { session_id: String, phase: String },

    /// The session outlived its idle TTL
    #[error("Session '{session_id}' has expired")]
    SessionExpired { session_id: String },

    /// An external collaborator (transcription, synthesis, order creation) failed
    #[error("{service} failed: {message}")]
    Collaborator {
        service: &'static str,
        message: String,
    },

    /// Data access error (repository/storage layer)
    #[error("Data access error: {0}")]
    DataAccess(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON"
        message: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },
}

impl BreakAppError {
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

    /// Creates an InvalidInput error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Creates a Collaborator error for the named service
    pub fn collaborator(service: &'static str, message: impl Into<String>) -> Self {
        Self::Collaborator {
            service,
            message: message.into(),
        }
    }

    /// Creates a DataAccess error
    pub fn data_access(message: impl Into<String>) -> Self {
        Self::DataAccess(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a caller input error
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput(_) | Self::NothingToConfirm { .. } | Self::NotFound { .. }
        )
    }

    /// Check if this error came from an external collaborator
    pub fn is_collaborator(&self) -> bool {
        matches!(self, Self::Collaborator { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for BreakAppError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for BreakAppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for BreakAppError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, BreakAppError>`.
pub type Result<T> = std::result::Result<T, BreakAppError>;
