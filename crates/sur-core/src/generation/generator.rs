//! Text generator trait.
//!
//! The hosted language model is an opaque collaborator: it takes a prompt and
//! sampling parameters and returns text or a classified failure.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sampling parameters sent with every request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingConfig {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_k: 40,
            top_p: 0.9,
        }
    }
}

/// Broad category of an endpoint failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointErrorKind {
    /// Credential invalid or lacking access to the model.
    Permission,
    /// The request never got a response (connect, timeout, TLS).
    Transport,
    /// The service answered with an error or an unreadable body.
    Service,
}

/// Failure reported by a [`TextGenerator`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind:?} error (status: {status:?}): {message}")]
pub struct EndpointError {
    pub kind: EndpointErrorKind,
    pub status: Option<u16>,
    pub message: String,
}

impl EndpointError {
    pub fn permission(status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            kind: EndpointErrorKind::Permission,
            status,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: EndpointErrorKind::Transport,
            status: None,
            message: message.into(),
        }
    }

    pub fn service(status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            kind: EndpointErrorKind::Service,
            status,
            message: message.into(),
        }
    }

    /// True when the failure means the credential cannot be used for the model.
    ///
    /// Matches the explicit kind, an HTTP 401/403, or the status text the
    /// Gemini API puts in its error body.
    pub fn is_permission_denied(&self) -> bool {
        self.kind == EndpointErrorKind::Permission
            || matches!(self.status, Some(401) | Some(403))
            || self.message.contains("PERMISSION_DENIED")
            || self.message.contains("UNAUTHENTICATED")
    }
}

/// An external text-generation service.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generates text for `prompt`.
    ///
    /// Implementations return the raw text of the first candidate. An empty
    /// string is a valid answer; the caller decides what it means.
    async fn generate(
        &self,
        prompt: &str,
        config: &SamplingConfig,
    ) -> Result<String, EndpointError>;

    /// Model identifier, for logging.
    fn model_name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_detection() {
        assert!(EndpointError::permission(None, "nope").is_permission_denied());
        assert!(EndpointError::service(Some(403), "Forbidden").is_permission_denied());
        assert!(EndpointError::service(Some(401), "").is_permission_denied());
        assert!(
            EndpointError::service(Some(400), "PERMISSION_DENIED: key revoked")
                .is_permission_denied()
        );
        assert!(!EndpointError::service(Some(500), "INTERNAL").is_permission_denied());
        assert!(!EndpointError::transport("connection refused").is_permission_denied());
    }

    #[test]
    fn test_default_sampling() {
        let config = SamplingConfig::default();
        assert_eq!(config.top_k, 40);
        assert!((config.temperature - 0.7).abs() < f32::EPSILON);
        assert!((config.top_p - 0.9).abs() < f32::EPSILON);
    }
}
