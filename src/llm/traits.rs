//! Model provider trait for abstracting the hosted endpoint
//!
//! The conversation loop only depends on this seam, which also makes the
//! loop testable with a scripted provider.

use async_trait::async_trait;

use crate::core::{ContentBlock, Message, Result, ToolDefinition, ToolUseRequest};

/// A single request to the model endpoint
#[derive(Debug, Clone)]
pub struct ModelRequest {
    /// Model identifier
    pub model: String,
    /// Maximum tokens to generate
    pub max_tokens: u32,
    /// Optional system prompt
    pub system: Option<String>,
    /// The full conversation transcript
    pub messages: Vec<Message>,
    /// Static tool descriptors advertised to the model
    pub tools: Vec<ToolDefinition>,
}

/// Response from the model endpoint
#[derive(Debug, Clone)]
pub struct ModelResponse {
    /// Content blocks (text and/or tool-use requests)
    pub content: Vec<ContentBlock>,
    /// Why the model stopped generating
    pub stop_reason: StopReason,
    /// Model that generated the response
    pub model: String,
    /// Token usage information
    pub usage: Option<TokenUsage>,
}

impl ModelResponse {
    /// Concatenated text of all text blocks
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Whether the model stopped to request tool invocations
    pub fn wants_tools(&self) -> bool {
        self.stop_reason == StopReason::ToolUse
    }

    /// Extract every tool-use request in the response
    pub fn tool_uses(&self) -> Vec<ToolUseRequest> {
        self.content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::ToolUse { id, name, input } => Some(ToolUseRequest {
                    id: id.clone(),
                    name: name.clone(),
                    input: input.clone(),
                }),
                _ => None,
            })
            .collect()
    }
}

/// The model's stop condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Plain completion
    EndTurn,
    /// The model wants to invoke tools
    ToolUse,
    /// Token limit reached
    MaxTokens,
    /// A stop sequence was hit
    StopSequence,
    /// Anything the API adds later
    Other,
}

impl StopReason {
    /// Map the wire value; unknown values degrade instead of failing the round
    pub fn parse(value: &str) -> Self {
        match value {
            "end_turn" => Self::EndTurn,
            "tool_use" => Self::ToolUse,
            "max_tokens" => Self::MaxTokens,
            "stop_sequence" => Self::StopSequence,
            _ => Self::Other,
        }
    }
}

/// Token usage information
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Trait for model providers
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Send one request and return the model's response
    async fn complete(&self, request: &ModelRequest) -> Result<ModelResponse>;

    /// Get the provider name
    fn name(&self) -> &str;
}
