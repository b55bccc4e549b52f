//! MCP server handler
//!
//! Bridges the tool manager onto rmcp's `ServerHandler`: listing maps
//! registered definitions to MCP tool descriptors, calls go through
//! `ToolManager::dispatch`. Unknown-tool and invalid-argument failures
//! become protocol errors; handler failures arrive as error results and
//! are forwarded with the MCP `isError` flag set.

use std::sync::Arc;

use rmcp::{
    ErrorData, RoleServer, ServerHandler,
    model::{
        CallToolRequestParams, CallToolResult, Content, Implementation, ListToolsResult,
        PaginatedRequestParams, ServerCapabilities, ServerInfo, Tool as McpTool,
    },
    service::RequestContext,
};
use serde_json::Value as JsonValue;

use pm_core::{Error, ToolDefinition, ToolManager};

/// MCP-facing wrapper around the tool manager
#[derive(Clone)]
pub struct PostmarkGateway {
    tools: Arc<ToolManager>,
}

impl PostmarkGateway {
    pub fn new(tools: Arc<ToolManager>) -> Self {
        Self { tools }
    }
}

/// Convert a registry definition into an MCP tool descriptor
fn to_mcp_tool(definition: ToolDefinition) -> McpTool {
    let schema = match definition.input_schema {
        JsonValue::Object(map) => map,
        _ => serde_json::Map::new(),
    };
    McpTool::new(definition.name, definition.description, Arc::new(schema))
}

impl ServerHandler for PostmarkGateway {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "postmark-mcp".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            instructions: Some(
                "Postmark email tools: send single, batch and templated emails, manage \
                 templates, query delivery statistics, and register and verify sending \
                 domains."
                    .to_string(),
            ),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        let tools = self
            .tools
            .definitions()
            .into_iter()
            .map(to_mcp_tool)
            .collect();

        Ok(ListToolsResult {
            tools,
            ..Default::default()
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        let args = request
            .arguments
            .map(JsonValue::Object)
            .unwrap_or(JsonValue::Null);

        match self.tools.dispatch(&request.name, args).await {
            Ok(result) => {
                let content = vec![Content::text(result.output)];
                if result.is_error {
                    Ok(CallToolResult::error(content))
                } else {
                    Ok(CallToolResult::success(content))
                }
            }
            Err(e @ (Error::UnknownTool(_) | Error::InvalidArgument(_))) => {
                Err(ErrorData::invalid_params(e.to_string(), None))
            }
            Err(e) => Err(ErrorData::internal_error(e.to_string(), None)),
        }
    }
}
