//! Shared types used across Tinker modules
//!
//! Contains transcript messages, content blocks, and tool metadata in the
//! Anthropic Messages API wire format.

use serde::{Deserialize, Serialize};

/// A message in the conversation transcript
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message sender (user or assistant)
    pub role: String,
    /// Content blocks carried by this turn
    pub content: Vec<ContentBlock>,
}

impl Message {
    /// Create a user message containing a single text block
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: vec![ContentBlock::text(text)],
        }
    }

    /// Create an assistant message from raw content blocks
    pub fn assistant(content: Vec<ContentBlock>) -> Self {
        Self {
            role: "assistant".to_string(),
            content,
        }
    }

    /// Create the user-role turn that carries a batch of tool results
    pub fn tool_results(outcomes: Vec<ToolOutcome>) -> Self {
        Self {
            role: "user".to_string(),
            content: outcomes.into_iter().map(ContentBlock::from).collect(),
        }
    }

    /// Concatenated text of all text blocks in this message
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

    /// Extract every tool-use request in this message
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

/// One content block within a message
///
/// Matches the Anthropic Messages API content format. `tool_use` blocks are
/// emitted by the model; `tool_result` blocks are sent back by us.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Plain text
    Text { text: String },
    /// A tool invocation requested by the model
    ToolUse {
        id: String,
        name: String,
        input: serde_json::Value,
    },
    /// The result of a tool invocation, keyed by the originating request id
    ToolResult {
        tool_use_id: String,
        content: String,
        #[serde(default, skip_serializing_if = "std::ops::Not::not")]
        is_error: bool,
    },
}

impl ContentBlock {
    /// Create a text block
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }
}

impl From<ToolOutcome> for ContentBlock {
    fn from(outcome: ToolOutcome) -> Self {
        Self::ToolResult {
            tool_use_id: outcome.request_id,
            content: outcome.output,
            is_error: !outcome.success,
        }
    }
}

/// A tool invocation extracted from an assistant turn
#[derive(Debug, Clone)]
pub struct ToolUseRequest {
    /// Request identifier assigned by the model
    pub id: String,
    /// Name of the tool to invoke
    pub name: String,
    /// JSON arguments for the tool
    pub input: serde_json::Value,
}

impl ToolUseRequest {
    /// Get a string argument by key
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.input
            .get(key)
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
    }
}

/// Definition of a tool advertised to the model
///
/// Static for the process lifetime; serialized verbatim into the `tools`
/// field of every API request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Name of the tool
    pub name: String,
    /// Description of what the tool does
    pub description: String,
    /// JSON Schema for the input payload
    pub input_schema: serde_json::Value,
}

impl ToolDefinition {
    /// Create a new tool definition
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: serde_json::Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }
}

/// Outcome of executing one tool-use request
#[derive(Debug, Clone)]
pub struct ToolOutcome {
    /// Identifier of the originating tool-use request
    pub request_id: String,
    /// Name of the tool that was executed
    pub tool_name: String,
    /// Whether the execution was successful
    pub success: bool,
    /// Tool output, or a human-readable error description
    pub output: String,
}

impl ToolOutcome {
    /// Create a successful outcome
    pub fn success(
        request_id: impl Into<String>,
        tool_name: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        Self {
            request_id: request_id.into(),
            tool_name: tool_name.into(),
            success: true,
            output: output.into(),
        }
    }

    /// Create a failed outcome carrying an error description
    pub fn failure(
        request_id: impl Into<String>,
        tool_name: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            request_id: request_id.into(),
            tool_name: tool_name.into(),
            success: false,
            output: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_content_block_wire_format() {
        let block = ContentBlock::ToolUse {
            id: "toolu_01".to_string(),
            name: "read_file".to_string(),
            input: json!({"path": "src/main.rs"}),
        };
        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(value["type"], "tool_use");
        assert_eq!(value["name"], "read_file");

        let result = ContentBlock::from(ToolOutcome::success("toolu_01", "read_file", "fn main"));
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["type"], "tool_result");
        assert_eq!(value["tool_use_id"], "toolu_01");
        // is_error is omitted on success
        assert!(value.get("is_error").is_none());
    }

    #[test]
    fn test_error_result_marks_is_error() {
        let result = ContentBlock::from(ToolOutcome::failure("toolu_02", "read_file", "no entry"));
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["is_error"], true);
    }

    #[test]
    fn test_parse_assistant_content() {
        let raw = json!([
            {"type": "text", "text": "Let me check."},
            {"type": "tool_use", "id": "toolu_03", "name": "list_files", "input": {}}
        ]);
        let blocks: Vec<ContentBlock> = serde_json::from_value(raw).unwrap();
        let msg = Message::assistant(blocks);

        assert_eq!(msg.text(), "Let me check.");
        let uses = msg.tool_uses();
        assert_eq!(uses.len(), 1);
        assert_eq!(uses[0].name, "list_files");
    }
}
