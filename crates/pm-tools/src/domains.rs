//! Sending-domain tools
//!
//! createDomain registers a domain; the two verify tools trigger DKIM
//! and return-path checks and report the refreshed domain state.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value as JsonValue, json};

use pm_client::{CreateDomainRequest, PostmarkClient};
use pm_core::{Error, Tool, ToolResult};

use crate::args::{optional_str, required_i64, required_str};

/// Map validated input onto the domain-creation shape
pub fn create_domain_request(input: &JsonValue) -> pm_core::Result<CreateDomainRequest> {
    Ok(CreateDomainRequest {
        name: required_str(input, "name")?,
        return_path_domain: optional_str(input, "returnPathDomain"),
    })
}

/// Register a new sending domain
pub struct CreateDomainTool {
    client: Arc<PostmarkClient>,
}

impl CreateDomainTool {
    pub fn new(client: Arc<PostmarkClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for CreateDomainTool {
    fn name(&self) -> &str {
        "createDomain"
    }

    fn description(&self) -> &str {
        "Register a new sending domain with Postmark"
    }

    fn input_schema(&self) -> JsonValue {
        json!({
            "type": "object",
            "properties": {
                "name": {
                    "type": "string",
                    "description": "Domain name, e.g. example.com"
                },
                "returnPathDomain": {
                    "type": "string",
                    "description": "Custom return-path domain"
                }
            },
            "required": ["name"]
        })
    }

    async fn execute(&self, input: JsonValue) -> pm_core::Result<ToolResult> {
        let request = create_domain_request(&input)?;
        let domain = self
            .client
            .create_domain(&request)
            .await
            .map_err(|e| Error::Upstream(e.to_string()))?;

        Ok(ToolResult::success(serde_json::to_string(&json!({
            "status": "created",
            "domainId": domain.id,
            "name": domain.name,
            "dkimHost": domain.dkim_host,
            "dkimTextValue": domain.dkim_text_value
        }))?))
    }
}

/// Trigger a DKIM verification check
pub struct VerifyDomainDkimTool {
    client: Arc<PostmarkClient>,
}

impl VerifyDomainDkimTool {
    pub fn new(client: Arc<PostmarkClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for VerifyDomainDkimTool {
    fn name(&self) -> &str {
        "verifyDomainDKIM"
    }

    fn description(&self) -> &str {
        "Trigger a DKIM verification check for a sending domain"
    }

    fn input_schema(&self) -> JsonValue {
        json!({
            "type": "object",
            "properties": {
                "domainId": {
                    "type": "integer",
                    "description": "Numeric domain identifier"
                }
            },
            "required": ["domainId"]
        })
    }

    async fn execute(&self, input: JsonValue) -> pm_core::Result<ToolResult> {
        let domain_id = required_i64(&input, "domainId")?;
        let domain = self
            .client
            .verify_dkim(domain_id)
            .await
            .map_err(|e| Error::Upstream(e.to_string()))?;

        Ok(ToolResult::success(serde_json::to_string(&domain)?))
    }
}

/// Trigger a return-path verification check
pub struct VerifyDomainReturnPathTool {
    client: Arc<PostmarkClient>,
}

impl VerifyDomainReturnPathTool {
    pub fn new(client: Arc<PostmarkClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for VerifyDomainReturnPathTool {
    fn name(&self) -> &str {
        "verifyDomainReturnPath"
    }

    fn description(&self) -> &str {
        "Trigger a return-path verification check for a sending domain"
    }

    fn input_schema(&self) -> JsonValue {
        json!({
            "type": "object",
            "properties": {
                "domainId": {
                    "type": "integer",
                    "description": "Numeric domain identifier"
                }
            },
            "required": ["domainId"]
        })
    }

    async fn execute(&self, input: JsonValue) -> pm_core::Result<ToolResult> {
        let domain_id = required_i64(&input, "domainId")?;
        let domain = self
            .client
            .verify_return_path(domain_id)
            .await
            .map_err(|e| Error::Upstream(e.to_string()))?;

        Ok(ToolResult::success(serde_json::to_string(&domain)?))
    }
}
