//! Model-service client for the compliance engine
//!
//! Speaks the Anthropic Messages API and forces a single tool call whose input
//! schema is the engine's analysis schema, so the reply is a JSON object of the
//! requested shape.

pub mod anthropic;
pub mod config;

pub use anthropic::AnthropicClient;
pub use config::AnthropicConfig;
