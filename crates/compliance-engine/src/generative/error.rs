//! Error types for the generative stage

use std::time::Duration;

use thiserror::Error;

/// Failure of a model-service call.
///
/// Everything except [`ModelError::Configuration`] is recoverable: the engine
/// falls back to pattern-only analysis.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Model call timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("Model transport error: {0}")]
    Transport(String),

    #[error("Model service error (HTTP {status}): {message}")]
    Service { status: u16, message: String },

    #[error("Model service rate limited: {0}")]
    RateLimited(String),

    #[error("Model response failed schema validation: {0}")]
    InvalidResponse(String),

    #[error("Model client misconfigured: {0}")]
    Configuration(String),
}

impl ModelError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Whether the engine may degrade to pattern-only analysis.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, ModelError::Configuration(_))
    }

    /// Short machine-readable kind, used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            ModelError::Timeout(_) => "timeout",
            ModelError::Transport(_) => "transport",
            ModelError::Service { .. } => "service",
            ModelError::RateLimited(_) => "rate_limited",
            ModelError::InvalidResponse(_) => "invalid_response",
            ModelError::Configuration(_) => "configuration",
        }
    }
}
