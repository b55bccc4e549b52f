//! Email send tools
//!
//! sendEmail, sendEmailBatch and sendEmailWithTemplate. Unset `from` and
//! `messageStream` fields are filled from configuration by the
//! dispatcher before the mapping functions here run.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value as JsonValue, json};
use tracing::info;

use pm_client::{PostmarkClient, SendEmailRequest, SendWithTemplateRequest};
use pm_core::{DefaultRule, DefaultSource, Error, Tool, ToolResult};

use crate::args::{optional_i64, optional_str, required_str};

const SEND_RULES: &[DefaultRule] = &[
    DefaultRule::field("from", DefaultSource::Sender),
    DefaultRule::field("messageStream", DefaultSource::MessageStream),
];

const BATCH_RULES: &[DefaultRule] = &[
    DefaultRule::array_field("messages", "from", DefaultSource::Sender),
    DefaultRule::array_field("messages", "messageStream", DefaultSource::MessageStream),
];

/// Map one validated, defaulted message object onto the Postmark shape
pub fn email_request(input: &JsonValue) -> pm_core::Result<SendEmailRequest> {
    Ok(SendEmailRequest {
        from: required_str(input, "from")?,
        to: required_str(input, "to")?,
        subject: required_str(input, "subject")?,
        text_body: required_str(input, "textBody")?,
        tag: optional_str(input, "tag"),
        message_stream: required_str(input, "messageStream")?,
    })
}

/// Map the batch argument onto one request per message element
pub fn batch_requests(input: &JsonValue) -> pm_core::Result<Vec<SendEmailRequest>> {
    input["messages"]
        .as_array()
        .ok_or_else(|| Error::InvalidArgument("Missing 'messages' parameter".to_string()))?
        .iter()
        .map(email_request)
        .collect()
}

/// Map validated, defaulted input onto the templated-send shape
pub fn template_request(input: &JsonValue) -> pm_core::Result<SendWithTemplateRequest> {
    Ok(SendWithTemplateRequest {
        from: required_str(input, "from")?,
        to: required_str(input, "to")?,
        template_id: optional_i64(input, "templateId"),
        template_alias: optional_str(input, "templateAlias"),
        template_model: input
            .get("templateModel")
            .cloned()
            .unwrap_or_else(|| json!({})),
        tag: optional_str(input, "tag"),
        message_stream: required_str(input, "messageStream")?,
    })
}

/// Send a single email
pub struct SendEmailTool {
    client: Arc<PostmarkClient>,
}

impl SendEmailTool {
    pub fn new(client: Arc<PostmarkClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for SendEmailTool {
    fn name(&self) -> &str {
        "sendEmail"
    }

    fn description(&self) -> &str {
        "Send a single text email via Postmark"
    }

    fn input_schema(&self) -> JsonValue {
        json!({
            "type": "object",
            "properties": {
                "to": {
                    "type": "string",
                    "format": "email",
                    "description": "Recipient email address"
                },
                "subject": {
                    "type": "string",
                    "description": "Email subject"
                },
                "textBody": {
                    "type": "string",
                    "description": "Plain-text email body"
                },
                "from": {
                    "type": "string",
                    "format": "email",
                    "description": "Sender address (defaults to DEFAULT_SENDER_EMAIL)"
                },
                "messageStream": {
                    "type": "string",
                    "description": "Message stream (defaults to DEFAULT_MESSAGE_STREAM)"
                },
                "tag": {
                    "type": "string",
                    "description": "Tag attached to the message for categorization"
                }
            },
            "required": ["to", "subject", "textBody"]
        })
    }

    fn default_rules(&self) -> &[DefaultRule] {
        SEND_RULES
    }

    async fn execute(&self, input: JsonValue) -> pm_core::Result<ToolResult> {
        let request = email_request(&input)?;
        info!("Sending email to {} on stream {}", request.to, request.message_stream);
        let response = self
            .client
            .send_email(&request)
            .await
            .map_err(|e| Error::Upstream(e.to_string()))?;

        Ok(ToolResult::success(serde_json::to_string(&json!({
            "status": "sent",
            "to": request.to,
            "subject": request.subject,
            "messageId": response.message_id,
            "submittedAt": response.submitted_at
        }))?))
    }
}

/// Send a batch of emails in one call
pub struct SendEmailBatchTool {
    client: Arc<PostmarkClient>,
}

impl SendEmailBatchTool {
    pub fn new(client: Arc<PostmarkClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for SendEmailBatchTool {
    fn name(&self) -> &str {
        "sendEmailBatch"
    }

    fn description(&self) -> &str {
        "Send multiple text emails in a single Postmark batch call"
    }

    fn input_schema(&self) -> JsonValue {
        json!({
            "type": "object",
            "properties": {
                "messages": {
                    "type": "array",
                    "minItems": 1,
                    "description": "Messages to send",
                    "items": {
                        "type": "object",
                        "properties": {
                            "to": {
                                "type": "string",
                                "format": "email",
                                "description": "Recipient email address"
                            },
                            "subject": {
                                "type": "string",
                                "description": "Email subject"
                            },
                            "textBody": {
                                "type": "string",
                                "description": "Plain-text email body"
                            },
                            "from": {
                                "type": "string",
                                "format": "email",
                                "description": "Sender address (defaults to DEFAULT_SENDER_EMAIL)"
                            },
                            "messageStream": {
                                "type": "string",
                                "description": "Message stream (defaults to DEFAULT_MESSAGE_STREAM)"
                            },
                            "tag": {
                                "type": "string",
                                "description": "Tag attached to the message"
                            }
                        },
                        "required": ["to", "subject", "textBody"]
                    }
                }
            },
            "required": ["messages"]
        })
    }

    fn default_rules(&self) -> &[DefaultRule] {
        BATCH_RULES
    }

    async fn execute(&self, input: JsonValue) -> pm_core::Result<ToolResult> {
        let requests = batch_requests(&input)?;
        info!("Sending batch of {} emails", requests.len());
        let responses = self
            .client
            .send_email_batch(&requests)
            .await
            .map_err(|e| Error::Upstream(e.to_string()))?;

        let accepted = responses.iter().filter(|r| r.error_code == 0).count();
        Ok(ToolResult::success(serde_json::to_string(&json!({
            "status": "submitted",
            "count": responses.len(),
            "accepted": accepted,
            "results": responses
        }))?))
    }
}

/// Send an email from a stored template
pub struct SendEmailWithTemplateTool {
    client: Arc<PostmarkClient>,
}

impl SendEmailWithTemplateTool {
    pub fn new(client: Arc<PostmarkClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for SendEmailWithTemplateTool {
    fn name(&self) -> &str {
        "sendEmailWithTemplate"
    }

    fn description(&self) -> &str {
        "Send an email from a stored Postmark template, identified by templateId or templateAlias"
    }

    fn input_schema(&self) -> JsonValue {
        json!({
            "type": "object",
            "properties": {
                "to": {
                    "type": "string",
                    "format": "email",
                    "description": "Recipient email address"
                },
                "templateId": {
                    "type": "integer",
                    "description": "Numeric template identifier"
                },
                "templateAlias": {
                    "type": "string",
                    "description": "Template alias"
                },
                "templateModel": {
                    "type": "object",
                    "description": "Key/value data merged into the template, forwarded verbatim"
                },
                "from": {
                    "type": "string",
                    "format": "email",
                    "description": "Sender address (defaults to DEFAULT_SENDER_EMAIL)"
                },
                "messageStream": {
                    "type": "string",
                    "description": "Message stream (defaults to DEFAULT_MESSAGE_STREAM)"
                },
                "tag": {
                    "type": "string",
                    "description": "Tag attached to the message"
                }
            },
            "required": ["to"],
            "oneOf": [
                { "required": ["templateId"] },
                { "required": ["templateAlias"] }
            ]
        })
    }

    fn default_rules(&self) -> &[DefaultRule] {
        SEND_RULES
    }

    async fn execute(&self, input: JsonValue) -> pm_core::Result<ToolResult> {
        let request = template_request(&input)?;
        info!("Sending templated email to {}", request.to);
        let response = self
            .client
            .send_email_with_template(&request)
            .await
            .map_err(|e| Error::Upstream(e.to_string()))?;

        Ok(ToolResult::success(serde_json::to_string(&json!({
            "status": "sent",
            "to": request.to,
            "templateId": request.template_id,
            "templateAlias": request.template_alias,
            "messageId": response.message_id,
            "submittedAt": response.submitted_at
        }))?))
    }
}
