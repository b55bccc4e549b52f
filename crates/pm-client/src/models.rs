//! Postmark API types
//!
//! Field names and casing follow the Postmark wire contract
//! (PascalCase), so these structs rename rather than redesign.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Single outgoing message (POST /email, and elements of /email/batch)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct SendEmailRequest {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text_body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    pub message_stream: String,
}

/// Templated outgoing message (POST /email/withTemplate)
///
/// Exactly one of `template_id` / `template_alias` is set; the caller
/// enforces that before the request is built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct SendWithTemplateRequest {
    pub from: String,
    pub to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_alias: Option<String>,
    /// Arbitrary key/value data forwarded to the template verbatim
    pub template_model: JsonValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    pub message_stream: String,
}

/// Response to a send call; batch responses are arrays of this
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SendEmailResponse {
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub submitted_at: Option<String>,
    #[serde(rename = "MessageID", default)]
    pub message_id: Option<String>,
    #[serde(default)]
    pub error_code: i64,
    #[serde(default)]
    pub message: Option<String>,
}

/// New template (POST /templates)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct CreateTemplateRequest {
    pub name: String,
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

/// Partial template update (PUT /templates/{id})
///
/// Every field is optional; unset fields are omitted from the wire body
/// so Postmark leaves them untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct EditTemplateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

/// Template list entry (GET /templates)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TemplateSummary {
    pub template_id: i64,
    pub name: String,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub template_type: Option<String>,
}

/// Template list response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TemplateListResponse {
    pub total_count: i64,
    pub templates: Vec<TemplateSummary>,
}

/// Full template detail (GET /templates/{id}, and create/edit responses)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TemplateDetail {
    pub template_id: i64,
    pub name: String,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub html_body: Option<String>,
    #[serde(default)]
    pub text_body: Option<String>,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub active: bool,
}

/// Optional filters for GET /stats/outbound
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsFilter {
    pub tag: Option<String>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
    pub message_stream: Option<String>,
}

/// Aggregate outbound statistics (GET /stats/outbound)
///
/// Postmark omits counters that are zero for the window, so every field
/// defaults. The rate math downstream consumes `sent`, `tracked`,
/// `unique_opens`, `total_tracked_links_sent` and `unique_links_clicked`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OutboundStats {
    #[serde(default)]
    pub sent: u64,
    #[serde(default)]
    pub bounced: u64,
    #[serde(default)]
    pub opens: u64,
    #[serde(default)]
    pub unique_opens: u64,
    #[serde(default)]
    pub tracked: u64,
    #[serde(default)]
    pub total_clicks: u64,
    #[serde(default)]
    pub unique_links_clicked: u64,
    #[serde(default)]
    pub total_tracked_links_sent: u64,
}

/// Previously sent message (GET /messages/outbound)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OutboundMessage {
    #[serde(rename = "MessageID")]
    pub message_id: String,
    #[serde(default)]
    pub to: Vec<OutboundRecipient>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub received_at: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub message_stream: Option<String>,
}

/// Recipient entry within an outbound message
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OutboundRecipient {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Outbound message search response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OutboundMessagesResponse {
    pub total_count: i64,
    pub messages: Vec<OutboundMessage>,
}

/// New sending domain (POST /domains)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct CreateDomainRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_path_domain: Option<String>,
}

/// Domain detail, also returned by the verification calls
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DomainDetail {
    #[serde(rename = "ID")]
    pub id: i64,
    pub name: String,
    #[serde(rename = "SPFVerified", default)]
    pub spf_verified: bool,
    #[serde(rename = "DKIMVerified", default)]
    pub dkim_verified: bool,
    #[serde(default)]
    pub return_path_domain_verified: bool,
    #[serde(default)]
    pub return_path_domain: Option<String>,
    #[serde(rename = "DKIMHost", default)]
    pub dkim_host: Option<String>,
    #[serde(rename = "DKIMTextValue", default)]
    pub dkim_text_value: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_send_request_wire_casing() {
        let request = SendEmailRequest {
            from: "info@x.com".to_string(),
            to: "a@b.com".to_string(),
            subject: "S".to_string(),
            text_body: "B".to_string(),
            tag: None,
            message_stream: "outbound".to_string(),
        };

        let wire = serde_json::to_value(&request).unwrap();
        assert_eq!(
            wire,
            json!({
                "From": "info@x.com",
                "To": "a@b.com",
                "Subject": "S",
                "TextBody": "B",
                "MessageStream": "outbound"
            })
        );
    }

    #[test]
    fn test_edit_request_omits_unset_fields() {
        let request = EditTemplateRequest::default();
        let wire = serde_json::to_value(&request).unwrap();
        assert_eq!(wire, json!({}));

        let request = EditTemplateRequest {
            subject: Some("New subject".to_string()),
            ..Default::default()
        };
        let wire = serde_json::to_value(&request).unwrap();
        assert_eq!(wire, json!({"Subject": "New subject"}));
    }

    #[test]
    fn test_send_response_parsing() {
        let response: SendEmailResponse = serde_json::from_value(json!({
            "To": "a@b.com",
            "SubmittedAt": "2024-01-01T00:00:00.000Z",
            "MessageID": "b7bc2f4a-e38e-4336-af7d-e6c392c2f817",
            "ErrorCode": 0,
            "Message": "OK"
        }))
        .unwrap();

        assert_eq!(
            response.message_id.as_deref(),
            Some("b7bc2f4a-e38e-4336-af7d-e6c392c2f817")
        );
        assert_eq!(response.error_code, 0);
    }

    #[test]
    fn test_outbound_stats_defaults_missing_counters() {
        let stats: OutboundStats = serde_json::from_value(json!({
            "Sent": 100,
            "Tracked": 50,
            "UniqueOpens": 60
        }))
        .unwrap();

        assert_eq!(stats.sent, 100);
        assert_eq!(stats.tracked, 50);
        assert_eq!(stats.unique_opens, 60);
        assert_eq!(stats.total_tracked_links_sent, 0);
        assert_eq!(stats.unique_links_clicked, 0);
    }

    #[test]
    fn test_domain_detail_parsing() {
        let domain: DomainDetail = serde_json::from_value(json!({
            "ID": 1234,
            "Name": "example.com",
            "SPFVerified": true,
            "DKIMVerified": false,
            "ReturnPathDomainVerified": false
        }))
        .unwrap();

        assert_eq!(domain.id, 1234);
        assert!(domain.spf_verified);
        assert!(!domain.dkim_verified);
    }
}
