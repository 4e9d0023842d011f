//! List files tool
//!
//! Lists the entries directly inside a directory.

use serde_json::json;

use crate::core::{Result, TinkerError, ToolDefinition, ToolUseRequest};

/// Tool for listing directory entries
pub struct ListFilesTool;

impl ListFilesTool {
    /// Create a new list tool
    pub fn new() -> Self {
        Self
    }

    /// The descriptor advertised to the model
    pub fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            "list_files",
            "List files and directories at a given path. If no path is provided, \
             lists files in the current directory.",
            json!({
                "type": "object",
                "properties": {
                    "path": {
                        "type": "string",
                        "description": "Optional relative path to list files from. \
                                        Defaults to current directory if not provided."
                    }
                }
            }),
        )
    }

    /// Execute the tool
    ///
    /// Directory entries get a trailing `/` so the model can tell them from
    /// files. Entries come back in the underlying directory order.
    pub async fn execute(&self, request: &ToolUseRequest) -> Result<String> {
        let path = request.get_string("path").unwrap_or_else(|| ".".to_string());

        let mut entries = tokio::fs::read_dir(&path)
            .await
            .map_err(|e| TinkerError::tool(format!("Failed to list files in '{}': {}", path, e)))?;

        let mut lines = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| TinkerError::tool(format!("Failed to list files in '{}': {}", path, e)))?
        {
            let mut name = entry.file_name().to_string_lossy().into_owned();
            let file_type = entry
                .file_type()
                .await
                .map_err(|e| TinkerError::tool(format!("Failed to list files in '{}': {}", path, e)))?;
            if file_type.is_dir() {
                name.push('/');
            }
            lines.push(name);
        }

        Ok(lines.join("\n"))
    }
}

impl Default for ListFilesTool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(input: serde_json::Value) -> ToolUseRequest {
        ToolUseRequest {
            id: "toolu_test".to_string(),
            name: "list_files".to_string(),
            input,
        }
    }

    #[tokio::test]
    async fn test_list_marks_directories() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "x").unwrap();
        std::fs::create_dir(dir.path().join("b")).unwrap();

        let tool = ListFilesTool::new();
        let listing = tool
            .execute(&request(json!({"path": dir.path().to_str().unwrap()})))
            .await
            .unwrap();

        let mut lines: Vec<&str> = listing.lines().collect();
        lines.sort_unstable();
        assert_eq!(lines, vec!["a.txt", "b/"]);
    }

    #[tokio::test]
    async fn test_list_missing_directory_fails() {
        let tool = ListFilesTool::new();
        let err = tool
            .execute(&request(json!({"path": "no/such/dir"})))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no/such/dir"));
    }

    #[tokio::test]
    async fn test_list_defaults_to_current_directory() {
        let tool = ListFilesTool::new();
        // No path argument: lists the working directory without erroring.
        let listing = tool.execute(&request(json!({}))).await.unwrap();
        assert!(!listing.is_empty());
    }
}
