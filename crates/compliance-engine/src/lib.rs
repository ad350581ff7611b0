//! Compliance analysis for marketing copy
//!
//! Pipeline: the pattern scanner always runs; inputs shorter than the
//! configured threshold stop there. Longer inputs go to the generative
//! analyzer, whose flags are merged with the pattern hits. When the model
//! stage fails, the engine degrades to pattern-only scoring instead of
//! returning an error.

pub mod catalog;
pub mod config;
pub mod error;
pub mod generative;
pub mod industry;
pub mod merge;
pub mod patterns;
pub mod scanner;
pub mod scoring;

use std::collections::HashSet;
use std::sync::Arc;

use shared_types::{AnalysisMode, AnalysisResult, Flag, Suggestion};

pub use config::EngineConfig;
pub use error::AnalysisError;
pub use generative::{GenerativeAnalyzer, ModelError, ModelService, StructuredRequest};
pub use industry::Industry;

/// Assessment used when the generative stage could not run.
pub const DEGRADED_ASSESSMENT_SUFFIX: &str = "AI analysis unavailable.";

/// ComplianceEngine entry point
pub struct ComplianceEngine {
    config: EngineConfig,
    analyzer: Option<GenerativeAnalyzer>,
}

impl ComplianceEngine {
    /// Engine without a model service: every non-trivial input falls back.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            analyzer: None,
        }
    }

    /// Engine backed by a model service, bounded by the configured timeout.
    pub fn with_model(config: EngineConfig, service: Arc<dyn ModelService>) -> Self {
        let analyzer = GenerativeAnalyzer::new(service, config.model_timeout());
        Self {
            config,
            analyzer: Some(analyzer),
        }
    }

    pub fn has_model(&self) -> bool {
        self.analyzer.is_some()
    }

    /// Run only the pattern scanner.
    pub fn scan(&self, content: &str, industry: &str) -> Vec<Flag> {
        scanner::scan_text(content, Industry::parse(industry))
    }

    /// Analyze `content` for the given industry vertical.
    ///
    /// Returns an error only for configuration-level faults of the model
    /// client. Timeouts, transport and service failures and schema-invalid
    /// responses produce a degraded [`AnalysisMode::Fallback`] result.
    pub async fn analyze(
        &self,
        content: &str,
        industry: &str,
    ) -> Result<AnalysisResult, AnalysisError> {
        let industry = Industry::parse(industry);
        let pattern_flags = scanner::scan_text(content, industry);

        let char_count = content.chars().count();
        if char_count < self.config.min_model_chars {
            tracing::debug!(
                chars = char_count,
                threshold = self.config.min_model_chars,
                pattern_flags = pattern_flags.len(),
                "Content below model threshold, using pattern analysis"
            );
            return Ok(self.short_circuit_result(content, pattern_flags));
        }

        let Some(analyzer) = &self.analyzer else {
            tracing::debug!("No model service configured, using pattern analysis");
            return Ok(self.fallback_result(content, pattern_flags));
        };

        match analyzer.analyze(content, industry, &pattern_flags).await {
            Ok(findings) => {
                let flags = merge::merge_flags(findings.flags, pattern_flags);
                Ok(AnalysisResult {
                    safety_score: findings.safety_score,
                    risk_level: findings.risk_level,
                    flags,
                    suggestions: findings.suggestions,
                    rewritten_content: findings.rewritten_content,
                    overall_assessment: findings.overall_assessment,
                    mode: AnalysisMode::Full,
                })
            }
            Err(err) if err.is_recoverable() => {
                tracing::warn!(
                    provider = %analyzer.service_name(),
                    error_kind = err.kind(),
                    error = %err,
                    "Model analysis failed, falling back to pattern analysis"
                );
                Ok(self.fallback_result(content, pattern_flags))
            }
            Err(err) => {
                tracing::error!(
                    provider = %analyzer.service_name(),
                    error = %err,
                    "Model client misconfigured"
                );
                Err(err.into())
            }
        }
    }

    fn short_circuit_result(&self, content: &str, flags: Vec<Flag>) -> AnalysisResult {
        let (safety_score, risk_level) = self.config.scoring.assess(&flags);
        let overall_assessment = if flags.is_empty() {
            "Content appears compliant based on initial screening.".to_string()
        } else {
            format!("Found {} potential compliance issue(s).", flags.len())
        };

        AnalysisResult {
            safety_score,
            risk_level,
            flags,
            suggestions: Vec::new(),
            rewritten_content: content.to_string(),
            overall_assessment,
            mode: AnalysisMode::ShortCircuit,
        }
    }

    fn fallback_result(&self, content: &str, flags: Vec<Flag>) -> AnalysisResult {
        let (safety_score, risk_level) = self.config.scoring.assess(&flags);
        let overall_assessment = format!(
            "Pattern analysis found {} potential issue(s). {}",
            flags.len(),
            DEGRADED_ASSESSMENT_SUFFIX
        );

        AnalysisResult {
            safety_score,
            risk_level,
            suggestions: fallback_suggestions(&flags),
            flags,
            rewritten_content: content.to_string(),
            overall_assessment,
            mode: AnalysisMode::Fallback,
        }
    }
}

impl Default for ComplianceEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

/// Replace-all suggestions for flags with a known replacement, one per phrase.
fn fallback_suggestions(flags: &[Flag]) -> Vec<Suggestion> {
    let mut seen = HashSet::new();
    flags
        .iter()
        .filter_map(|flag| {
            let replacement = flag.suggestion.as_deref()?;
            if !patterns::is_meaningful_replacement(&flag.matched_text, replacement) {
                return None;
            }
            if !seen.insert(flag.dedup_key()) {
                return None;
            }
            Some(Suggestion {
                original: flag.matched_text.clone(),
                replacement: replacement.to_string(),
                reason: flag.reason.clone(),
            })
        })
        .collect()
}
