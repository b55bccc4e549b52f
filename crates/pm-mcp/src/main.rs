//! pm-mcp: Postmark MCP server main binary
//!
//! Serves the Postmark tool catalog over MCP on stdio.
//!
//! Required environment variables (startup fails fast without them):
//!   POSTMARK_SERVER_TOKEN   Postmark server API token
//!   DEFAULT_SENDER_EMAIL    sender used when a tool call omits `from`
//!   DEFAULT_MESSAGE_STREAM  stream used when a tool call omits one

mod server;

use std::sync::Arc;

use pm_client::PostmarkClient;
use pm_core::{Config, ToolManager};
use pm_tools::register_default_tools;
use rmcp::{ServiceExt, transport::stdio};
use tracing_subscriber::EnvFilter;

use server::PostmarkGateway;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the protocol; all diagnostics go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    // Load .env file
    dotenvy::dotenv().ok();

    // Load configuration from environment; missing values are fatal
    // before any protocol traffic is accepted
    let config = Config::from_env().map_err(|e| anyhow::anyhow!("Config error: {}", e))?;

    tracing::info!("Starting postmark-mcp...");
    tracing::info!("Default sender: {}", config.default_sender);
    tracing::info!("Default message stream: {}", config.default_message_stream);

    let client = PostmarkClient::new(&config.server_token)
        .map_err(|e| anyhow::anyhow!("Failed to create Postmark client: {}", e))?;

    let mut manager = ToolManager::new(config.tool_defaults());
    register_default_tools(&mut manager, Arc::new(client));

    tracing::info!(
        "Registered {} tools: {:?}",
        manager.len(),
        manager.tool_names()
    );

    let gateway = PostmarkGateway::new(Arc::new(manager));
    let service = gateway.serve(stdio()).await?;

    tracing::info!("postmark-mcp serving on stdio");
    service.waiting().await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
