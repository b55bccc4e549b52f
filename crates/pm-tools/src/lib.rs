//! pm-tools: Postmark tools for the MCP gateway
//!
//! This crate provides the tool catalog: sending, templates, statistics,
//! and domain verification. Each tool declares its input schema and
//! default rules; argument-to-request mapping lives in pure functions so
//! it can be tested apart from the dispatcher.

mod args;

pub mod domains;
pub mod email;
pub mod stats;
pub mod templates;

pub use domains::{CreateDomainTool, VerifyDomainDkimTool, VerifyDomainReturnPathTool};
pub use email::{SendEmailBatchTool, SendEmailTool, SendEmailWithTemplateTool};
pub use stats::{GetDeliveryStatsTool, GetOutboundMessagesTool};
pub use templates::{CreateTemplateTool, GetTemplateTool, ListTemplatesTool, UpdateTemplateTool};

use std::sync::Arc;

use pm_client::PostmarkClient;
use pm_core::ToolManager;

/// Register all Postmark tools with the tool manager
pub fn register_default_tools(manager: &mut ToolManager, client: Arc<PostmarkClient>) {
    manager.register(Arc::new(SendEmailTool::new(client.clone())));
    manager.register(Arc::new(SendEmailBatchTool::new(client.clone())));
    manager.register(Arc::new(SendEmailWithTemplateTool::new(client.clone())));
    manager.register(Arc::new(CreateTemplateTool::new(client.clone())));
    manager.register(Arc::new(UpdateTemplateTool::new(client.clone())));
    manager.register(Arc::new(ListTemplatesTool::new(client.clone())));
    manager.register(Arc::new(GetTemplateTool::new(client.clone())));
    manager.register(Arc::new(GetDeliveryStatsTool::new(client.clone())));
    manager.register(Arc::new(GetOutboundMessagesTool::new(client.clone())));
    manager.register(Arc::new(CreateDomainTool::new(client.clone())));
    manager.register(Arc::new(VerifyDomainDkimTool::new(client.clone())));
    manager.register(Arc::new(VerifyDomainReturnPathTool::new(client)));
}
