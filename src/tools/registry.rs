//! Tool registry - manages and dispatches tool calls
//!
//! Central hub for registering tools and routing tool-use requests to
//! handlers. A failed execution becomes an error outcome fed back to the
//! model; it never aborts the conversation loop.

use std::collections::HashMap;

use crate::core::{ToolDefinition, ToolOutcome, ToolUseRequest};
use crate::tools::fs::{EditFileTool, ListFilesTool, ReadFileTool};

/// Registry of available tools
pub struct ToolRegistry {
    /// Tool definitions indexed by name
    definitions: HashMap<String, ToolDefinition>,
    /// Filesystem tools
    read_tool: ReadFileTool,
    list_tool: ListFilesTool,
    edit_tool: EditFileTool,
}

impl ToolRegistry {
    /// Create a new tool registry with the default tools
    pub fn new() -> Self {
        let read_tool = ReadFileTool::new();
        let list_tool = ListFilesTool::new();
        let edit_tool = EditFileTool::new();

        let mut definitions = HashMap::new();
        for def in [
            read_tool.definition(),
            list_tool.definition(),
            edit_tool.definition(),
        ] {
            definitions.insert(def.name.clone(), def);
        }

        Self {
            definitions,
            read_tool,
            list_tool,
            edit_tool,
        }
    }

    /// Get all tool definitions for the API request
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.definitions.values().cloned().collect()
    }

    /// Look up a tool definition by name
    pub fn definition(&self, name: &str) -> Option<&ToolDefinition> {
        self.definitions.get(name)
    }

    /// Execute a tool-use request, converting every failure into an error
    /// outcome keyed by the request id
    pub async fn execute(&self, request: &ToolUseRequest) -> ToolOutcome {
        let definition = match self.definitions.get(&request.name) {
            Some(def) => def,
            None => {
                return ToolOutcome::failure(
                    &request.id,
                    &request.name,
                    format!("Unknown tool: {}", request.name),
                )
            }
        };

        if let Err(reason) = validate_input(definition, &request.input) {
            return ToolOutcome::failure(&request.id, &request.name, reason);
        }

        let result = match request.name.as_str() {
            "read_file" => self.read_tool.execute(request).await,
            "list_files" => self.list_tool.execute(request).await,
            "edit_file" => self.edit_tool.execute(request).await,
            _ => {
                return ToolOutcome::failure(
                    &request.id,
                    &request.name,
                    format!("Unknown tool: {}", request.name),
                )
            }
        };

        match result {
            Ok(output) => ToolOutcome::success(&request.id, &request.name, output),
            Err(e) => ToolOutcome::failure(&request.id, &request.name, e.to_string()),
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate an input payload against the tool's declared schema
///
/// Checks that the payload is an object, every required property is present,
/// and each declared string property that is present actually holds a string.
/// A mismatch fails the individual call, not the process.
fn validate_input(
    definition: &ToolDefinition,
    input: &serde_json::Value,
) -> std::result::Result<(), String> {
    let object = input
        .as_object()
        .ok_or_else(|| format!("{}: input must be a JSON object", definition.name))?;

    let schema = &definition.input_schema;

    if let Some(required) = schema.get("required").and_then(|r| r.as_array()) {
        for key in required.iter().filter_map(|k| k.as_str()) {
            if !object.contains_key(key) {
                return Err(format!(
                    "{}: missing required argument '{}'",
                    definition.name, key
                ));
            }
        }
    }

    if let Some(properties) = schema.get("properties").and_then(|p| p.as_object()) {
        for (key, value) in object {
            let declared = match properties.get(key) {
                Some(decl) => decl,
                None => continue,
            };
            if declared.get("type").and_then(|t| t.as_str()) == Some("string")
                && !value.is_string()
            {
                return Err(format!(
                    "{}: argument '{}' must be a string",
                    definition.name, key
                ));
            }
        }
    }

    Ok(())
}
