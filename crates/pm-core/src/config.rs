//! Configuration management
//!
//! All settings come from environment variables. The three values below
//! are required; startup must fail before the server accepts any protocol
//! traffic if one of them is missing or empty:
//!
//! - `POSTMARK_SERVER_TOKEN`: Postmark server API token
//! - `DEFAULT_SENDER_EMAIL`: sender address used when a tool call omits `from`
//! - `DEFAULT_MESSAGE_STREAM`: message stream used when a tool call omits one

use crate::error::{Error, Result};
use crate::tool::ToolDefaults;

/// Resolved process configuration for the Postmark MCP gateway
///
/// Constructed once at startup and passed into the dispatcher; handlers
/// never read the environment themselves.
#[derive(Debug, Clone)]
pub struct Config {
    /// Postmark server API token
    pub server_token: String,

    /// Default sender address for send tools
    pub default_sender: String,

    /// Default message stream for send tools
    pub default_message_stream: String,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns `Error::Config` naming the first variable that is missing
    /// or empty.
    pub fn from_env() -> Result<Self> {
        Ok(Config {
            server_token: required_env("POSTMARK_SERVER_TOKEN")?,
            default_sender: required_env("DEFAULT_SENDER_EMAIL")?,
            default_message_stream: required_env("DEFAULT_MESSAGE_STREAM")?,
        })
    }

    /// The per-call default values consumed by the tool dispatcher
    pub fn tool_defaults(&self) -> ToolDefaults {
        ToolDefaults {
            sender: self.default_sender.clone(),
            message_stream: self.default_message_stream.clone(),
        }
    }
}

/// Read a required environment variable, rejecting empty values
fn required_env(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        Ok(_) => Err(Error::Config(format!("{} is set but empty", name))),
        Err(_) => Err(Error::Config(format!("{} not set", name))),
    }
}
