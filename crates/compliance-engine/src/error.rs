//! Error types for the compliance engine

use thiserror::Error;

use crate::generative::ModelError;

/// Hard failures of `analyze`.
///
/// Recoverable model failures never surface here; they degrade the result to
/// pattern-only analysis instead.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<ModelError> for AnalysisError {
    fn from(err: ModelError) -> Self {
        AnalysisError::Configuration(err.to_string())
    }
}
