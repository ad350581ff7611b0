//! Anthropic Messages API client
//!
//! Structured output is obtained by offering one tool whose `input_schema` is
//! the requested schema and forcing the model to call it. The tool call's
//! `input` is the structured result.

use std::time::Instant;

use async_trait::async_trait;
use compliance_engine::{ModelError, ModelService, StructuredRequest};
use serde_json::{json, Value};

use crate::config::AnthropicConfig;

pub const ANTHROPIC_VERSION: &str = "2023-06-01";

const PROVIDER: &str = "anthropic";

pub struct AnthropicClient {
    config: AnthropicConfig,
    http_client: reqwest::Client,
    messages_url: String,
}

impl AnthropicClient {
    /// Build a client.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Configuration`] when the API key is blank or the
    /// HTTP client cannot be constructed.
    pub fn new(config: AnthropicConfig) -> Result<Self, ModelError> {
        if config.api_key.trim().is_empty() {
            return Err(ModelError::configuration("Anthropic API key is empty"));
        }
        if !config.base_url.starts_with("http://") && !config.base_url.starts_with("https://") {
            return Err(ModelError::configuration(format!(
                "Invalid Anthropic base URL: {}",
                config.base_url
            )));
        }

        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| ModelError::configuration(format!("Failed to build HTTP client: {}", e)))?;
        let messages_url = config.messages_url();

        tracing::info!(url = %messages_url, model = %config.model, "Anthropic client initialized");

        Ok(Self {
            config,
            http_client,
            messages_url,
        })
    }

    pub fn from_env() -> Result<Self, ModelError> {
        Self::new(AnthropicConfig::from_env()?)
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// JSON body for a forced single-tool call.
    pub fn build_request_body(&self, request: &StructuredRequest) -> Value {
        let mut input_schema = request.schema.clone();
        if let Some(obj) = input_schema.as_object_mut() {
            // the tools API rejects meta keywords at the schema root
            obj.remove("$schema");
            obj.remove("title");
        }

        json!({
            "model": self.config.model,
            "max_tokens": self.config.max_tokens,
            "messages": [{
                "role": "user",
                "content": request.prompt,
            }],
            "tools": [{
                "name": request.schema_name,
                "description": "Record the compliance analysis of the supplied content.",
                "input_schema": input_schema,
            }],
            "tool_choice": {
                "type": "tool",
                "name": request.schema_name,
            },
        })
    }
}

/// Pull the forced tool call's input out of a Messages API response.
pub fn extract_tool_input(response: Value, tool_name: &str) -> Result<Value, ModelError> {
    let Value::Object(mut response) = response else {
        return Err(ModelError::invalid("response is not a JSON object"));
    };
    let Some(Value::Array(blocks)) = response.remove("content") else {
        return Err(ModelError::invalid("response has no content array"));
    };

    let stop_reason = response
        .get("stop_reason")
        .and_then(Value::as_str)
        .unwrap_or("unknown")
        .to_string();

    blocks
        .into_iter()
        .find_map(|block| match block {
            Value::Object(mut block)
                if block.get("type").and_then(Value::as_str) == Some("tool_use")
                    && block.get("name").and_then(Value::as_str) == Some(tool_name) =>
            {
                block.remove("input")
            }
            _ => None,
        })
        .ok_or_else(|| {
            ModelError::invalid(format!(
                "no {} tool call in response (stop_reason: {})",
                tool_name, stop_reason
            ))
        })
}

/// Map a non-success HTTP status to a [`ModelError`].
pub fn parse_http_error(status: u16, body: &str) -> ModelError {
    let message = error_message(body);
    match status {
        401 => ModelError::configuration(format!("{}: Invalid API key", PROVIDER)),
        403 => ModelError::configuration(format!("{}: Access denied", PROVIDER)),
        404 => ModelError::configuration(format!("{}: Model or endpoint not found: {}", PROVIDER, message)),
        429 => ModelError::RateLimited(message),
        _ => ModelError::Service { status, message },
    }
}

/// The `error.message` field of an API error body, or the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

fn transport_error(err: reqwest::Error, timeout: std::time::Duration) -> ModelError {
    if err.is_timeout() {
        ModelError::Timeout(timeout)
    } else if err.is_builder() {
        ModelError::configuration(err.to_string())
    } else {
        ModelError::Transport(err.to_string())
    }
}

#[async_trait]
impl ModelService for AnthropicClient {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn generate_structured(&self, request: StructuredRequest) -> Result<Value, ModelError> {
        let start_time = Instant::now();
        let body = self.build_request_body(&request);

        let response = self
            .http_client
            .post(&self.messages_url)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error(e, self.config.request_timeout()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let err = parse_http_error(status.as_u16(), &text);
            tracing::warn!(
                status = status.as_u16(),
                elapsed_ms = start_time.elapsed().as_millis() as u64,
                "Anthropic request failed"
            );
            return Err(err);
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| ModelError::invalid(format!("response body is not JSON: {}", e)))?;

        tracing::debug!(
            model = %self.config.model,
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            input_tokens = payload["usage"]["input_tokens"].as_u64(),
            output_tokens = payload["usage"]["output_tokens"].as_u64(),
            "Anthropic request completed"
        );

        extract_tool_input(payload, &request.schema_name)
    }
}
