//! Error types for the Parliamentarium.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Parliamentarium workspace.
///
/// Variants are structured so callers can branch on the failure kind
/// (a missing meeting versus a rejected topic versus a dead backend)
/// without string matching.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum ParliamentError {
    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// User input rejected (empty topic, empty catalog, ...)
    #[error("Validation error: {0}")]
    Validation(String),

    /// An idea index outside the meeting's idea list
    #[error("Invalid idea index {index} (meeting has {len} ideas)")]
    InvalidIdeaIndex { index: usize, len: usize },

    /// A report was requested before the meeting was finalized
    #[error("Meeting not yet finalized: {0}")]
    NotFinalized(String),

    /// A council agent failed to produce a response
    #[error("Agent error: {0}")]
    Agent(String),

    /// The remote council backend rejected or failed a request
    #[error("Remote council error{}: {message}", .status.map(|s| format!(" ({s})")).unwrap_or_default())]
    Remote {
        status: Option<u16>,
        message: String,
    },

    /// The session was cancelled before it adjourned
    #[error("Session cancelled during {0}")]
    Cancelled(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ParliamentError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a Remote error
    pub fn remote(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Remote {
            status,
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for ParliamentError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for ParliamentError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for ParliamentError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for ParliamentError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<crate::agent::AgentError> for ParliamentError {
    fn from(err: crate::agent::AgentError) -> Self {
        Self::Agent(err.to_string())
    }
}

/// Conversion from anyhow::Error (used at the infrastructure boundary)
impl From<anyhow::Error> for ParliamentError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, ParliamentError>`.
pub type Result<T> = std::result::Result<T, ParliamentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_display_includes_status() {
        let err = ParliamentError::remote(Some(404), "Meeting not found");
        assert_eq!(
            err.to_string(),
            "Remote council error (404): Meeting not found"
        );

        let err = ParliamentError::remote(None, "connection refused");
        assert_eq!(err.to_string(), "Remote council error: connection refused");
    }

    #[test]
    fn test_io_conversion_keeps_kind() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: ParliamentError = io.into();
        assert!(err.to_string().contains("NotFound"));
    }

    #[test]
    fn test_json_conversion_is_serialization() {
        let err: ParliamentError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(err.is_serialization());
    }
}
