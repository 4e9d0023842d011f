//! LLM module - model endpoint integration
//!
//! Provides the provider abstraction and the Anthropic Messages API client.

pub mod anthropic;
pub mod traits;

pub use anthropic::AnthropicClient;
pub use traits::{ModelProvider, ModelRequest, ModelResponse, StopReason, TokenUsage};
