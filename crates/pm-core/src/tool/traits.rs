//! Tool trait definition
//!
//! Defines the core trait for implementing tools exposed over MCP.

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::Result;
use crate::tool::defaults::DefaultRule;

/// Tool execution result
#[derive(Debug, Clone)]
pub struct ToolResult {
    /// Output string from tool execution
    pub output: String,
    /// Whether the execution resulted in an error
    pub is_error: bool,
}

impl ToolResult {
    /// Create a successful tool result
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            is_error: false,
        }
    }

    /// Create an error tool result
    pub fn error(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            is_error: true,
        }
    }
}

/// Tool definition advertised to MCP clients
#[derive(Debug, Clone)]
pub struct ToolDefinition {
    /// Tool name (unique within the registry)
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// JSON schema for the tool's input parameters
    pub input_schema: JsonValue,
}

impl ToolDefinition {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: JsonValue,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }
}

/// Tool trait for MCP tool calls
///
/// Implementations receive input that has already been validated against
/// `input_schema` and had `default_rules` applied, so `execute` only maps
/// arguments onto the upstream request and formats the result.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool name (used as the MCP tool identifier)
    fn name(&self) -> &str;

    /// Get the tool description (shown to clients when listing tools)
    fn description(&self) -> &str;

    /// Get the JSON schema for the tool's input parameters
    fn input_schema(&self) -> JsonValue;

    /// Fields filled from process-wide defaults when the caller leaves
    /// them unset. Applied by the dispatcher after validation succeeds.
    fn default_rules(&self) -> &[DefaultRule] {
        &[]
    }

    /// Execute the tool with validated, defaulted input
    ///
    /// # Errors
    /// Returns an error when the upstream call fails; the dispatcher
    /// converts it into an error `ToolResult`.
    async fn execute(&self, input: JsonValue) -> Result<ToolResult>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_result_success() {
        let result = ToolResult::success("ok");
        assert_eq!(result.output, "ok");
        assert!(!result.is_error);
    }

    #[test]
    fn test_tool_result_error() {
        let result = ToolResult::error("boom");
        assert_eq!(result.output, "boom");
        assert!(result.is_error);
    }

    #[test]
    fn test_tool_definition() {
        let def = ToolDefinition::new("sendEmail", "Send an email", serde_json::json!({}));
        assert_eq!(def.name, "sendEmail");
        assert_eq!(def.description, "Send an email");
    }
}
