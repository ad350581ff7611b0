//! Generative analyzer
//!
//! Delegates the authoritative analysis of non-trivial content to an external
//! language-model service. The request carries the regulatory context, the
//! verbatim content, the pattern scanner's hits and a JSON schema; the reply
//! is validated against that schema before anything is used.
//!
//! This stage never retries. Any failure is returned to the engine, which
//! decides between fallback and propagation.

pub mod error;
pub mod prompts;
pub mod schema;

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use shared_types::Flag;

use crate::industry::Industry;

pub use error::ModelError;
pub use prompts::build_analysis_prompt;
pub use schema::{ModelAnalysis, ModelFindings, SCHEMA_NAME};

/// A structured-output request for the model service.
#[derive(Debug, Clone)]
pub struct StructuredRequest {
    pub prompt: String,
    pub schema_name: String,
    pub schema: serde_json::Value,
}

/// Client for a language-model service that can return schema-shaped JSON.
///
/// Implementations should honour their own transport timeouts, but the
/// analyzer also bounds every call. Dropping the returned future must abort
/// the in-flight request.
#[async_trait]
pub trait ModelService: Send + Sync {
    /// Provider name for logs.
    fn name(&self) -> &str;

    /// Send the request and return the raw JSON object the model produced.
    async fn generate_structured(
        &self,
        request: StructuredRequest,
    ) -> Result<serde_json::Value, ModelError>;
}

/// Runs the generative stage against a [`ModelService`].
#[derive(Clone)]
pub struct GenerativeAnalyzer {
    service: Arc<dyn ModelService>,
    timeout: Duration,
}

impl GenerativeAnalyzer {
    pub fn new(service: Arc<dyn ModelService>, timeout: Duration) -> Self {
        Self { service, timeout }
    }

    pub fn service_name(&self) -> &str {
        self.service.name()
    }

    /// Analyze `content` with the model, seeded with the pattern hits.
    pub async fn analyze(
        &self,
        content: &str,
        industry: Industry,
        pattern_flags: &[Flag],
    ) -> Result<ModelFindings, ModelError> {
        let start_time = Instant::now();
        let request = StructuredRequest {
            prompt: build_analysis_prompt(content, industry, pattern_flags),
            schema_name: SCHEMA_NAME.to_string(),
            schema: ModelAnalysis::json_schema(),
        };
        let prompt_length = request.prompt.len();

        tracing::debug!(
            provider = %self.service.name(),
            industry = %industry,
            pattern_flags = pattern_flags.len(),
            prompt_length,
            "Initiating model call for compliance analysis"
        );

        let raw = match tokio::time::timeout(
            self.timeout,
            self.service.generate_structured(request),
        )
        .await
        {
            Ok(result) => result?,
            Err(_) => return Err(ModelError::Timeout(self.timeout)),
        };

        let analysis = ModelAnalysis::from_value(raw)?;

        tracing::info!(
            provider = %self.service.name(),
            industry = %industry,
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            model_flags = analysis.flags.len(),
            "Model compliance analysis completed"
        );

        Ok(analysis.into_findings(content))
    }
}
