//! Read file tool
//!
//! Returns the full text content of a file.

use serde_json::json;

use crate::core::{Result, TinkerError, ToolDefinition, ToolUseRequest};

/// Tool for reading a file's contents
pub struct ReadFileTool;

impl ReadFileTool {
    /// Create a new read tool
    pub fn new() -> Self {
        Self
    }

    /// The descriptor advertised to the model
    pub fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            "read_file",
            "Read the contents of a given relative file path. Use this when you \
             want to see what's inside a file. Do not use this with directory names.",
            json!({
                "type": "object",
                "properties": {
                    "path": {
                        "type": "string",
                        "description": "The relative path of a file in the working directory."
                    }
                },
                "required": ["path"]
            }),
        )
    }

    /// Execute the tool
    pub async fn execute(&self, request: &ToolUseRequest) -> Result<String> {
        let path = request
            .get_string("path")
            .ok_or_else(|| TinkerError::tool("read_file: missing 'path' argument"))?;

        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| TinkerError::tool(format!("Failed to read file '{}': {}", path, e)))
    }
}

impl Default for ReadFileTool {
    fn default() -> Self {
        Self::new()
    }
}
