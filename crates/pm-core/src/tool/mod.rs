//! Tool registry and dispatch
//!
//! A tool is a named operation with a declared input schema. The manager
//! validates raw arguments against the schema, substitutes configured
//! defaults for unset sender/stream fields, and wraps handler failures
//! into error results so the transport always receives a well-formed
//! envelope.

pub mod defaults;
pub mod manager;
pub mod schema;
pub mod traits;

pub use defaults::{DefaultRule, DefaultSource, DefaultTarget, ToolDefaults, apply_defaults};
pub use manager::ToolManager;
pub use traits::{Tool, ToolDefinition, ToolResult};
