//! Edit file tool
//!
//! Replaces every occurrence of a substring in a file, creating the file
//! when it does not exist.

use serde_json::json;
use std::io::ErrorKind;

use crate::core::{Result, TinkerError, ToolDefinition, ToolUseRequest};

/// Tool for string-replace edits
pub struct EditFileTool;

impl EditFileTool {
    /// Create a new edit tool
    pub fn new() -> Self {
        Self
    }

    /// The descriptor advertised to the model
    pub fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            "edit_file",
            "Edit a file by replacing all occurrences of a string with another string.",
            json!({
                "type": "object",
                "properties": {
                    "path": {
                        "type": "string",
                        "description": "The relative path of the file to edit."
                    },
                    "old_str": {
                        "type": "string",
                        "description": "The string to replace."
                    },
                    "new_str": {
                        "type": "string",
                        "description": "The replacement string."
                    }
                },
                "required": ["path", "old_str", "new_str"]
            }),
        )
    }

    /// Execute the tool
    ///
    /// Plain substring replace, not pattern matching. A missing file is
    /// created containing exactly `new_str`; the write is not atomic.
    pub async fn execute(&self, request: &ToolUseRequest) -> Result<String> {
        let path = request
            .get_string("path")
            .ok_or_else(|| TinkerError::tool("edit_file: missing 'path' argument"))?;
        let old_str = request
            .get_string("old_str")
            .ok_or_else(|| TinkerError::tool("edit_file: missing 'old_str' argument"))?;
        let new_str = request
            .get_string("new_str")
            .ok_or_else(|| TinkerError::tool("edit_file: missing 'new_str' argument"))?;

        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tokio::fs::write(&path, &new_str).await.map_err(|e| {
                    TinkerError::tool(format!("Failed to create file '{}': {}", path, e))
                })?;
                return Ok(format!(
                    "File \"{}\" created with the specified content.",
                    path
                ));
            }
            Err(e) => {
                return Err(TinkerError::tool(format!(
                    "Failed to edit file '{}': {}",
                    path, e
                )))
            }
        };

        let updated = content.replace(&old_str, &new_str);
        tokio::fs::write(&path, updated)
            .await
            .map_err(|e| TinkerError::tool(format!("Failed to edit file '{}': {}", path, e)))?;

        Ok("File edited successfully.".to_string())
    }
}

impl Default for EditFileTool {
    fn default() -> Self {
        Self::new()
    }
}
