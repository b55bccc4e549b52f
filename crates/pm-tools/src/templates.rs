//! Template management tools
//!
//! createTemplate, updateTemplate, listTemplates and getTemplate.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value as JsonValue, json};

use pm_client::{CreateTemplateRequest, EditTemplateRequest, PostmarkClient};
use pm_core::{Error, Tool, ToolResult};

use crate::args::{optional_str, required_i64, required_str};

/// Map validated input onto the template-creation shape
///
/// `textBody` falls back to an empty string so templates can be
/// HTML-only.
pub fn create_template_request(input: &JsonValue) -> pm_core::Result<CreateTemplateRequest> {
    Ok(CreateTemplateRequest {
        name: required_str(input, "name")?,
        subject: required_str(input, "subject")?,
        html_body: required_str(input, "htmlBody")?,
        text_body: optional_str(input, "textBody").unwrap_or_default(),
        alias: optional_str(input, "alias"),
    })
}

/// Map validated input onto the partial-update shape
///
/// Every field is optional; unset fields stay off the wire so the
/// provider leaves them untouched.
pub fn edit_template_request(input: &JsonValue) -> EditTemplateRequest {
    EditTemplateRequest {
        name: optional_str(input, "name"),
        subject: optional_str(input, "subject"),
        html_body: optional_str(input, "htmlBody"),
        text_body: optional_str(input, "textBody"),
        alias: optional_str(input, "alias"),
    }
}

/// Create a new stored template
pub struct CreateTemplateTool {
    client: Arc<PostmarkClient>,
}

impl CreateTemplateTool {
    pub fn new(client: Arc<PostmarkClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for CreateTemplateTool {
    fn name(&self) -> &str {
        "createTemplate"
    }

    fn description(&self) -> &str {
        "Create a new email template in Postmark"
    }

    fn input_schema(&self) -> JsonValue {
        json!({
            "type": "object",
            "properties": {
                "name": {
                    "type": "string",
                    "description": "Template name"
                },
                "subject": {
                    "type": "string",
                    "description": "Subject line, may contain template variables"
                },
                "htmlBody": {
                    "type": "string",
                    "description": "HTML body of the template"
                },
                "textBody": {
                    "type": "string",
                    "description": "Plain-text body (defaults to empty)"
                },
                "alias": {
                    "type": "string",
                    "description": "Stable alias for addressing the template"
                }
            },
            "required": ["name", "subject", "htmlBody"]
        })
    }

    async fn execute(&self, input: JsonValue) -> pm_core::Result<ToolResult> {
        let request = create_template_request(&input)?;
        let template = self
            .client
            .create_template(&request)
            .await
            .map_err(|e| Error::Upstream(e.to_string()))?;

        Ok(ToolResult::success(serde_json::to_string(&json!({
            "status": "created",
            "templateId": template.template_id,
            "name": template.name,
            "alias": template.alias
        }))?))
    }
}

/// Partially update an existing template
pub struct UpdateTemplateTool {
    client: Arc<PostmarkClient>,
}

impl UpdateTemplateTool {
    pub fn new(client: Arc<PostmarkClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for UpdateTemplateTool {
    fn name(&self) -> &str {
        "updateTemplate"
    }

    fn description(&self) -> &str {
        "Update fields of an existing Postmark template; unspecified fields are left unchanged"
    }

    fn input_schema(&self) -> JsonValue {
        json!({
            "type": "object",
            "properties": {
                "templateId": {
                    "type": "integer",
                    "description": "Numeric template identifier"
                },
                "name": {
                    "type": "string",
                    "description": "New template name"
                },
                "subject": {
                    "type": "string",
                    "description": "New subject line"
                },
                "htmlBody": {
                    "type": "string",
                    "description": "New HTML body"
                },
                "textBody": {
                    "type": "string",
                    "description": "New plain-text body"
                },
                "alias": {
                    "type": "string",
                    "description": "New alias"
                }
            },
            "required": ["templateId"]
        })
    }

    async fn execute(&self, input: JsonValue) -> pm_core::Result<ToolResult> {
        let template_id = required_i64(&input, "templateId")?;
        let request = edit_template_request(&input);
        let template = self
            .client
            .edit_template(template_id, &request)
            .await
            .map_err(|e| Error::Upstream(e.to_string()))?;

        Ok(ToolResult::success(serde_json::to_string(&json!({
            "status": "updated",
            "templateId": template.template_id,
            "name": template.name
        }))?))
    }
}

/// List all stored templates
pub struct ListTemplatesTool {
    client: Arc<PostmarkClient>,
}

impl ListTemplatesTool {
    pub fn new(client: Arc<PostmarkClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for ListTemplatesTool {
    fn name(&self) -> &str {
        "listTemplates"
    }

    fn description(&self) -> &str {
        "List all templates stored on the Postmark server"
    }

    fn input_schema(&self) -> JsonValue {
        json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn execute(&self, _input: JsonValue) -> pm_core::Result<ToolResult> {
        let templates = self
            .client
            .list_templates()
            .await
            .map_err(|e| Error::Upstream(e.to_string()))?;

        Ok(ToolResult::success(serde_json::to_string(&templates)?))
    }
}

/// Fetch one template with its full bodies
pub struct GetTemplateTool {
    client: Arc<PostmarkClient>,
}

impl GetTemplateTool {
    pub fn new(client: Arc<PostmarkClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for GetTemplateTool {
    fn name(&self) -> &str {
        "getTemplate"
    }

    fn description(&self) -> &str {
        "Fetch a single Postmark template, including its subject and bodies"
    }

    fn input_schema(&self) -> JsonValue {
        json!({
            "type": "object",
            "properties": {
                "templateId": {
                    "type": "integer",
                    "description": "Numeric template identifier"
                }
            },
            "required": ["templateId"]
        })
    }

    async fn execute(&self, input: JsonValue) -> pm_core::Result<ToolResult> {
        let template_id = required_i64(&input, "templateId")?;
        let template = self
            .client
            .get_template(template_id)
            .await
            .map_err(|e| Error::Upstream(e.to_string()))?;

        Ok(ToolResult::success(serde_json::to_string(&template)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pm_core::tool::schema;

    fn test_client() -> Arc<PostmarkClient> {
        Arc::new(PostmarkClient::with_base_url("token", "http://localhost:0").unwrap())
    }

    #[test]
    fn test_create_request_defaults_text_body() {
        let input = json!({"name": "Welcome", "subject": "Hi", "htmlBody": "<b>Hi</b>"});
        let request = create_template_request(&input).unwrap();

        assert_eq!(request.name, "Welcome");
        assert_eq!(request.text_body, "");
        assert_eq!(request.alias, None);
    }

    #[test]
    fn test_edit_request_with_identifier_only_is_empty() {
        let input = json!({"templateId": 5});
        let request = edit_template_request(&input);

        assert_eq!(request, EditTemplateRequest::default());
        assert_eq!(serde_json::to_value(&request).unwrap(), json!({}));
    }

    #[test]
    fn test_edit_request_partial_fields() {
        let input = json!({"templateId": 5, "subject": "New", "alias": "welcome-v2"});
        let request = edit_template_request(&input);

        assert_eq!(request.subject.as_deref(), Some("New"));
        assert_eq!(request.alias.as_deref(), Some("welcome-v2"));
        assert_eq!(request.name, None);
        assert_eq!(request.html_body, None);
    }

    #[test]
    fn test_update_schema_accepts_identifier_only() {
        let tool = UpdateTemplateTool::new(test_client());
        assert!(schema::validate(&tool.input_schema(), &json!({"templateId": 5})).is_ok());
    }

    #[test]
    fn test_update_schema_rejects_string_identifier() {
        let tool = UpdateTemplateTool::new(test_client());
        let err =
            schema::validate(&tool.input_schema(), &json!({"templateId": "5"})).unwrap_err();
        assert!(err.to_string().contains("templateId"));
    }
}
