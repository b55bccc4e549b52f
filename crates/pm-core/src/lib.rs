//! pm-core: Core types for the Postmark MCP gateway
//!
//! This crate provides the configuration resolver, the error taxonomy,
//! and the tool registry/dispatcher that validates and normalizes tool
//! arguments before they reach the Postmark client.

pub mod config;
pub mod error;
pub mod tool;

pub use config::Config;
pub use error::{Error, Result};
pub use tool::{
    DefaultRule, DefaultSource, DefaultTarget, Tool, ToolDefaults, ToolDefinition, ToolManager,
    ToolResult,
};
