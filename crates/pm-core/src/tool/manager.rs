//! Tool manager for registering and dispatching tools

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value as JsonValue;
use tracing::debug;

use crate::error::{Error, Result};
use crate::tool::defaults::{ToolDefaults, apply_defaults};
use crate::tool::schema;
use crate::tool::traits::{Tool, ToolDefinition, ToolResult};

/// Manager for registered tools
///
/// Handles tool registration, listing, and dispatch. Dispatch validates
/// arguments against the tool's schema, substitutes configured defaults,
/// and converts handler failures into error results so every call yields
/// a well-formed envelope.
pub struct ToolManager {
    /// Registered tools indexed by name
    tools: HashMap<String, Arc<dyn Tool>>,
    /// Process-wide defaults substituted into unset sender/stream fields
    defaults: ToolDefaults,
}

impl ToolManager {
    /// Create a new empty tool manager with the given defaults
    pub fn new(defaults: ToolDefaults) -> Self {
        Self {
            tools: HashMap::new(),
            defaults,
        }
    }

    /// Register a tool
    ///
    /// Names must be unique; registering a duplicate name replaces the
    /// previous tool and must not be relied upon.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Get all registered tool definitions for listing
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .values()
            .map(|t| ToolDefinition::new(t.name(), t.description(), t.input_schema()))
            .collect()
    }

    /// Check if a tool is registered
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if no tools are registered
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Get all registered tool names
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.keys().map(|s| s.as_str()).collect()
    }

    /// Dispatch a tool call
    ///
    /// # Arguments
    /// * `name` - The name of the tool to call
    /// * `args` - The caller-supplied arguments (null is treated as `{}`)
    ///
    /// # Errors
    /// Returns `Error::UnknownTool` for unregistered names and
    /// `Error::InvalidArgument` when validation fails; both are surfaced
    /// as protocol-level errors. Handler failures do not propagate: they
    /// are returned as an error `ToolResult` prefixed with the failing
    /// tool's name.
    pub async fn dispatch(&self, name: &str, args: JsonValue) -> Result<ToolResult> {
        let tool = self
            .get(name)
            .ok_or_else(|| Error::UnknownTool(name.to_string()))?;

        let mut args = if args.is_null() {
            JsonValue::Object(serde_json::Map::new())
        } else {
            args
        };

        schema::validate(&tool.input_schema(), &args)?;
        apply_defaults(tool.default_rules(), &self.defaults, &mut args);

        debug!("Dispatching tool: {}", name);
        match tool.execute(args).await {
            Ok(result) => Ok(result),
            Err(e) => Ok(ToolResult::error(format!("Tool '{}' failed: {}", name, e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;

    fn defaults() -> ToolDefaults {
        ToolDefaults {
            sender: "info@x.com".to_string(),
            message_stream: "outbound".to_string(),
        }
    }

    /// Echoes its defaulted input back, or fails on demand
    struct EchoTool {
        fail: bool,
    }

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echo the defaulted input"
        }

        fn input_schema(&self) -> JsonValue {
            json!({
                "type": "object",
                "properties": {
                    "to": { "type": "string", "format": "email" },
                    "from": { "type": "string", "format": "email" }
                },
                "required": ["to"]
            })
        }

        fn default_rules(&self) -> &[crate::tool::DefaultRule] {
            use crate::tool::{DefaultRule, DefaultSource};
            const RULES: &[DefaultRule] = &[DefaultRule::field("from", DefaultSource::Sender)];
            RULES
        }

        async fn execute(&self, input: JsonValue) -> crate::Result<ToolResult> {
            if self.fail {
                return Err(Error::Upstream("connection refused".to_string()));
            }
            Ok(ToolResult::success(input.to_string()))
        }
    }

    #[tokio::test]
    async fn test_dispatch_unknown_tool() {
        let manager = ToolManager::new(defaults());
        let err = manager.dispatch("nope", json!({})).await.unwrap_err();
        assert!(matches!(err, Error::UnknownTool(_)));
    }

    #[tokio::test]
    async fn test_dispatch_validates_before_defaults() {
        let mut manager = ToolManager::new(defaults());
        manager.register(Arc::new(EchoTool { fail: false }));

        // missing required field is rejected before any defaulting
        let err = manager.dispatch("echo", json!({})).await.unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(err.to_string().contains("to"));
    }

    #[tokio::test]
    async fn test_dispatch_applies_defaults() {
        let mut manager = ToolManager::new(defaults());
        manager.register(Arc::new(EchoTool { fail: false }));

        let result = manager
            .dispatch("echo", json!({"to": "a@b.com"}))
            .await
            .unwrap();
        assert!(!result.is_error);

        let echoed: JsonValue = serde_json::from_str(&result.output).unwrap();
        assert_eq!(echoed["from"], "info@x.com");
        assert_eq!(echoed["to"], "a@b.com");
    }

    #[tokio::test]
    async fn test_dispatch_null_args() {
        let mut manager = ToolManager::new(defaults());
        manager.register(Arc::new(EchoTool { fail: false }));

        let err = manager
            .dispatch("echo", JsonValue::Null)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_handler_failure_becomes_error_result() {
        let mut manager = ToolManager::new(defaults());
        manager.register(Arc::new(EchoTool { fail: true }));

        let result = manager
            .dispatch("echo", json!({"to": "a@b.com"}))
            .await
            .unwrap();
        assert!(result.is_error);
        assert!(result.output.starts_with("Tool 'echo' failed:"));
        assert!(result.output.contains("connection refused"));
    }

    #[test]
    fn test_registry_queries() {
        let mut manager = ToolManager::new(defaults());
        assert!(manager.is_empty());

        manager.register(Arc::new(EchoTool { fail: false }));
        assert_eq!(manager.len(), 1);
        assert!(manager.contains("echo"));
        assert_eq!(manager.tool_names(), vec!["echo"]);

        let defs = manager.definitions();
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].name, "echo");
    }
}
