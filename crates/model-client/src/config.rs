//! Client configuration, read from the environment

use std::time::Duration;

use compliance_engine::ModelError;

pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";
pub const BASE_URL_ENV: &str = "ANTHROPIC_BASE_URL";
pub const MODEL_ENV: &str = "COMPLIANCE_MODEL";

pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
pub const DEFAULT_MAX_TOKENS: u32 = 4096;
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 60_000;

#[derive(Clone)]
pub struct AnthropicConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    /// Transport-level timeout; the engine applies its own bound on top
    pub request_timeout_ms: u64,
}

impl std::fmt::Debug for AnthropicConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnthropicConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("request_timeout_ms", &self.request_timeout_ms)
            .finish()
    }
}

impl AnthropicConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Read `ANTHROPIC_API_KEY`, `ANTHROPIC_BASE_URL` and `COMPLIANCE_MODEL`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Configuration`] when the API key is missing or
    /// blank.
    pub fn from_env() -> Result<Self, ModelError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AnthropicConfig::from_env`] with an injectable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ModelError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = non_blank(API_KEY_ENV)
            .ok_or_else(|| ModelError::configuration(format!("{} is not set", API_KEY_ENV)))?;

        let mut config = Self::new(api_key.trim());
        if let Some(base_url) = non_blank(BASE_URL_ENV) {
            config = config.with_base_url(base_url.trim());
        }
        if let Some(model) = non_blank(MODEL_ENV) {
            config = config.with_model(model.trim());
        }
        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Messages endpoint, tolerant of a trailing slash or `/v1` on the base.
    pub fn messages_url(&self) -> String {
        let base = self
            .base_url
            .trim_end_matches('/')
            .trim_end_matches("/v1/messages")
            .trim_end_matches("/v1");
        format!("{}/v1/messages", base)
    }
}
