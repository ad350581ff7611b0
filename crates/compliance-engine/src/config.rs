//! Engine configuration
//!
//! Product-tuning knobs for the pipeline, loadable from TOML. Every field has a
//! default, so an empty document is a valid configuration.

use anyhow::{ensure, Context};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::scoring::ScoringPolicy;

/// Inputs shorter than this many characters skip the model.
pub const DEFAULT_MIN_MODEL_CHARS: usize = 50;

/// Upper bound on a single model call.
pub const DEFAULT_MODEL_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Minimum content length (in chars) for the generative stage
    pub min_model_chars: usize,
    /// Per-severity penalties for the deterministic scorer
    pub scoring: ScoringPolicy,
    /// Timeout for the generative stage in milliseconds
    pub model_timeout_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_model_chars: DEFAULT_MIN_MODEL_CHARS,
            scoring: ScoringPolicy::default(),
            model_timeout_ms: DEFAULT_MODEL_TIMEOUT_MS,
        }
    }
}

impl EngineConfig {
    /// Load and validate configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML is malformed, or
    /// a value fails [`EngineConfig::validate`].
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parse and validate configuration from a TOML string
    ///
    /// ```
    /// use compliance_engine::config::EngineConfig;
    ///
    /// # fn example() -> anyhow::Result<()> {
    /// let config = EngineConfig::from_toml(r#"
    ///     min_model_chars = 80
    ///
    ///     [scoring]
    ///     high_penalty = 30
    /// "#)?;
    /// assert_eq!(config.scoring.medium_penalty, 10);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_toml(s: &str) -> anyhow::Result<Self> {
        let config: EngineConfig = toml::from_str(s).context("Failed to parse TOML config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.model_timeout_ms > 0, "model_timeout_ms must be positive");
        for (name, penalty) in [
            ("high_penalty", self.scoring.high_penalty),
            ("medium_penalty", self.scoring.medium_penalty),
            ("low_penalty", self.scoring.low_penalty),
        ] {
            ensure!(penalty <= 100, "scoring.{} must be at most 100, got {}", name, penalty);
        }
        Ok(())
    }

    pub fn model_timeout(&self) -> Duration {
        Duration::from_millis(self.model_timeout_ms)
    }
}
