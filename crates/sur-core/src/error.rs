//! Error types for the Sur application.

use thiserror::Error;

/// Message shown when the generation endpoint rejects the credential.
pub const AUTH_ERROR_MESSAGE: &str =
    "API Permission Denied. Please check if your API Key is valid and has access to the model.";

/// Message shown for every other generation failure.
pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate lyrics. Please try again.";

/// A shared error type for the entire Sur application.
///
/// Generation failures carry the user-facing message only; the underlying
/// transport detail is logged where the failure is classified.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SurError {
    /// Input rejected before it reaches the generation client
    #[error("Validation error: {0}")]
    Validation(String),

    /// Credential invalid or lacking access to the model
    #[error("{0}")]
    Auth(String),

    /// The generation endpoint answered with an empty body
    #[error("No content generated")]
    NoContent,

    /// Catch-all transport or service failure
    #[error("{0}")]
    GenerationFailed(String),

    /// Stored history could not be decoded
    #[error("Failed to load history: {0}")]
    PersistenceLoad(String),

    /// A generation is already outstanding for this session
    #[error("A song is already being generated")]
    Busy,

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

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SurError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an Auth error with the standard user-facing message
    pub fn auth() -> Self {
        Self::Auth(AUTH_ERROR_MESSAGE.to_string())
    }

    /// Creates a GenerationFailed error with the standard user-facing message
    pub fn generation_failed() -> Self {
        Self::GenerationFailed(GENERATION_FAILED_MESSAGE.to_string())
    }

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

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is an Auth error
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }

    /// Check if this is a Busy error
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Busy)
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this error came out of the generation boundary.
    pub fn is_generation(&self) -> bool {
        matches!(
            self,
            Self::Auth(_) | Self::NoContent | Self::GenerationFailed(_)
        )
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for SurError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for SurError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for SurError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for SurError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, SurError>`.
pub type Result<T> = std::result::Result<T, SurError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_messages_are_user_facing() {
        assert_eq!(SurError::auth().to_string(), AUTH_ERROR_MESSAGE);
        assert_eq!(
            SurError::generation_failed().to_string(),
            GENERATION_FAILED_MESSAGE
        );
    }

    #[test]
    fn test_predicates() {
        assert!(SurError::auth().is_auth());
        assert!(SurError::auth().is_generation());
        assert!(SurError::NoContent.is_generation());
        assert!(!SurError::Busy.is_generation());
        assert!(SurError::not_found("song", "x").is_not_found());
        assert!(SurError::validation("empty").is_validation());
    }

    #[test]
    fn test_json_error_conversion() {
        let err: SurError = serde_json::from_str::<Vec<u8>>("{").unwrap_err().into();
        match err {
            SurError::Serialization { format, .. } => assert_eq!(format, "JSON"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
