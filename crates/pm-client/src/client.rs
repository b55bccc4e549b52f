//! Postmark HTTP API client
//!
//! Communicates with the Postmark REST API. The server token travels in
//! the `X-Postmark-Server-Token` header on every request; non-success
//! statuses are decoded from Postmark's `{ErrorCode, Message}` error
//! body.

use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use crate::error::{PostmarkError, Result};
use crate::models::*;

const DEFAULT_BASE_URL: &str = "https://api.postmarkapp.com";

/// Postmark error body shape
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ApiErrorBody {
    error_code: i64,
    message: String,
}

/// Postmark API client
#[derive(Clone)]
pub struct PostmarkClient {
    client: Client,
    server_token: String,
    base_url: String,
}

impl PostmarkClient {
    /// Create a new Postmark API client
    pub fn new(server_token: &str) -> Result<Self> {
        Self::with_base_url(server_token, DEFAULT_BASE_URL)
    }

    /// Create a client against a custom base URL (used by tests)
    pub fn with_base_url(server_token: &str, base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(PostmarkError::Http)?;

        Ok(Self {
            client,
            server_token: server_token.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Add the server token header
    fn add_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("X-Postmark-Server-Token", &self.server_token)
            .header("Accept", "application/json")
    }

    /// Decode a response, turning non-success statuses into API errors
    async fn parse_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if let Ok(api) = serde_json::from_str::<ApiErrorBody>(&body) {
                error!("Postmark API error {}: {}", api.error_code, api.message);
                return Err(PostmarkError::Api {
                    code: api.error_code,
                    message: api.message,
                });
            }
            return Err(PostmarkError::Api {
                code: i64::from(status.as_u16()),
                message: body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| PostmarkError::Parse(e.to_string()))
    }

    /// Send a single message (POST /email)
    pub async fn send_email(&self, request: &SendEmailRequest) -> Result<SendEmailResponse> {
        let url = format!("{}/email", self.base_url);
        debug!("Sending email to {}", request.to);

        let response = self
            .add_auth(self.client.post(&url).json(request))
            .send()
            .await?;
        self.parse_response(response).await
    }

    /// Send a batch of messages (POST /email/batch)
    ///
    /// Elements of the returned array may carry a non-zero `ErrorCode`
    /// even when the HTTP call itself succeeds.
    pub async fn send_email_batch(
        &self,
        requests: &[SendEmailRequest],
    ) -> Result<Vec<SendEmailResponse>> {
        let url = format!("{}/email/batch", self.base_url);
        debug!("Sending batch of {} emails", requests.len());

        let response = self
            .add_auth(self.client.post(&url).json(requests))
            .send()
            .await?;
        self.parse_response(response).await
    }

    /// Send a templated message (POST /email/withTemplate)
    pub async fn send_email_with_template(
        &self,
        request: &SendWithTemplateRequest,
    ) -> Result<SendEmailResponse> {
        let url = format!("{}/email/withTemplate", self.base_url);
        debug!("Sending templated email to {}", request.to);

        let response = self
            .add_auth(self.client.post(&url).json(request))
            .send()
            .await?;
        self.parse_response(response).await
    }

    /// Create a template (POST /templates)
    pub async fn create_template(&self, request: &CreateTemplateRequest) -> Result<TemplateDetail> {
        let url = format!("{}/templates", self.base_url);
        debug!("Creating template: {}", request.name);

        let response = self
            .add_auth(self.client.post(&url).json(request))
            .send()
            .await?;
        self.parse_response(response).await
    }

    /// Partially update a template (PUT /templates/{id})
    pub async fn edit_template(
        &self,
        template_id: i64,
        request: &EditTemplateRequest,
    ) -> Result<TemplateDetail> {
        let url = format!("{}/templates/{}", self.base_url, template_id);
        debug!("Updating template {}", template_id);

        let response = self
            .add_auth(self.client.put(&url).json(request))
            .send()
            .await?;
        self.parse_response(response).await
    }

    /// List templates (GET /templates)
    pub async fn list_templates(&self) -> Result<TemplateListResponse> {
        let url = format!("{}/templates", self.base_url);

        let response = self
            .add_auth(
                self.client
                    .get(&url)
                    .query(&[("count", "500"), ("offset", "0")]),
            )
            .send()
            .await?;
        self.parse_response(response).await
    }

    /// Fetch one template (GET /templates/{id})
    pub async fn get_template(&self, template_id: i64) -> Result<TemplateDetail> {
        let url = format!("{}/templates/{}", self.base_url, template_id);

        let response = self.add_auth(self.client.get(&url)).send().await?;
        self.parse_response(response).await
    }

    /// Query aggregate outbound statistics (GET /stats/outbound)
    ///
    /// Filter parameters are appended only when supplied.
    pub async fn outbound_stats(&self, filter: &StatsFilter) -> Result<OutboundStats> {
        let url = format!("{}/stats/outbound", self.base_url);

        let mut params: Vec<(&str, &str)> = Vec::new();
        if let Some(tag) = filter.tag.as_deref() {
            params.push(("tag", tag));
        }
        if let Some(from_date) = filter.from_date.as_deref() {
            params.push(("fromdate", from_date));
        }
        if let Some(to_date) = filter.to_date.as_deref() {
            params.push(("todate", to_date));
        }
        if let Some(stream) = filter.message_stream.as_deref() {
            params.push(("messagestream", stream));
        }

        let response = self
            .add_auth(self.client.get(&url).query(&params))
            .send()
            .await?;
        self.parse_response(response).await
    }

    /// List previously sent messages (GET /messages/outbound)
    pub async fn outbound_messages(
        &self,
        count: u64,
        offset: u64,
    ) -> Result<OutboundMessagesResponse> {
        let url = format!("{}/messages/outbound", self.base_url);

        let response = self
            .add_auth(
                self.client
                    .get(&url)
                    .query(&[("count", count), ("offset", offset)]),
            )
            .send()
            .await?;
        self.parse_response(response).await
    }

    /// Register a sending domain (POST /domains)
    pub async fn create_domain(&self, request: &CreateDomainRequest) -> Result<DomainDetail> {
        let url = format!("{}/domains", self.base_url);
        debug!("Creating domain: {}", request.name);

        let response = self
            .add_auth(self.client.post(&url).json(request))
            .send()
            .await?;
        self.parse_response(response).await
    }

    /// Trigger a DKIM verification check (PUT /domains/{id}/verifyDkim)
    pub async fn verify_dkim(&self, domain_id: i64) -> Result<DomainDetail> {
        let url = format!("{}/domains/{}/verifyDkim", self.base_url, domain_id);
        debug!("Verifying DKIM for domain {}", domain_id);

        let response = self.add_auth(self.client.put(&url)).send().await?;
        self.parse_response(response).await
    }

    /// Trigger a return-path verification check (PUT /domains/{id}/verifyReturnPath)
    pub async fn verify_return_path(&self, domain_id: i64) -> Result<DomainDetail> {
        let url = format!("{}/domains/{}/verifyReturnPath", self.base_url, domain_id);
        debug!("Verifying return path for domain {}", domain_id);

        let response = self.add_auth(self.client.put(&url)).send().await?;
        self.parse_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn send_request() -> SendEmailRequest {
        SendEmailRequest {
            from: "info@x.com".to_string(),
            to: "a@b.com".to_string(),
            subject: "S".to_string(),
            text_body: "B".to_string(),
            tag: None,
            message_stream: "outbound".to_string(),
        }
    }

    #[tokio::test]
    async fn test_send_email_wire_shape() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/email"))
            .and(header("X-Postmark-Server-Token", "test-token"))
            .and(body_json(json!({
                "From": "info@x.com",
                "To": "a@b.com",
                "Subject": "S",
                "TextBody": "B",
                "MessageStream": "outbound"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "To": "a@b.com",
                "SubmittedAt": "2024-01-01T00:00:00.000Z",
                "MessageID": "msg-123",
                "ErrorCode": 0,
                "Message": "OK"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = PostmarkClient::with_base_url("test-token", &server.uri()).unwrap();
        let response = client.send_email(&send_request()).await.unwrap();

        assert_eq!(response.message_id.as_deref(), Some("msg-123"));
        assert_eq!(response.error_code, 0);
    }

    #[tokio::test]
    async fn test_send_email_batch_is_an_array() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/email/batch"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"MessageID": "msg-1", "ErrorCode": 0},
                {"MessageID": null, "ErrorCode": 406, "Message": "Inactive recipient"}
            ])))
            .mount(&server)
            .await;

        let client = PostmarkClient::with_base_url("test-token", &server.uri()).unwrap();
        let responses = client
            .send_email_batch(&[send_request(), send_request()])
            .await
            .unwrap();

        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0].message_id.as_deref(), Some("msg-1"));
        assert_eq!(responses[1].error_code, 406);
    }

    #[tokio::test]
    async fn test_api_error_decoding() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/email"))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({
                "ErrorCode": 300,
                "Message": "Invalid 'To' address."
            })))
            .mount(&server)
            .await;

        let client = PostmarkClient::with_base_url("test-token", &server.uri()).unwrap();
        let err = client.send_email(&send_request()).await.unwrap_err();

        match err {
            PostmarkError::Api { code, message } => {
                assert_eq!(code, 300);
                assert!(message.contains("Invalid 'To' address"));
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_stats_appends_only_supplied_params() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/stats/outbound"))
            .and(query_param("tag", "welcome"))
            .and(query_param_is_missing("fromdate"))
            .and(query_param_is_missing("todate"))
            .and(query_param_is_missing("messagestream"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "Sent": 100,
                "Tracked": 50,
                "UniqueOpens": 20
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = PostmarkClient::with_base_url("test-token", &server.uri()).unwrap();
        let filter = StatsFilter {
            tag: Some("welcome".to_string()),
            ..Default::default()
        };
        let stats = client.outbound_stats(&filter).await.unwrap();

        assert_eq!(stats.sent, 100);
        assert_eq!(stats.tracked, 50);
        assert_eq!(stats.total_tracked_links_sent, 0);
    }

    #[tokio::test]
    async fn test_outbound_messages_pagination_params() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/messages/outbound"))
            .and(query_param("count", "10"))
            .and(query_param("offset", "0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "TotalCount": 1,
                "Messages": [{
                    "MessageID": "msg-9",
                    "To": [{"Email": "a@b.com"}],
                    "Subject": "S",
                    "Status": "Sent"
                }]
            })))
            .mount(&server)
            .await;

        let client = PostmarkClient::with_base_url("test-token", &server.uri()).unwrap();
        let page = client.outbound_messages(10, 0).await.unwrap();

        assert_eq!(page.total_count, 1);
        assert_eq!(page.messages[0].message_id, "msg-9");
    }

    #[tokio::test]
    async fn test_verify_dkim_path() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/domains/7/verifyDkim"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ID": 7,
                "Name": "example.com",
                "DKIMVerified": true
            })))
            .mount(&server)
            .await;

        let client = PostmarkClient::with_base_url("test-token", &server.uri()).unwrap();
        let domain = client.verify_dkim(7).await.unwrap();

        assert_eq!(domain.id, 7);
        assert!(domain.dkim_verified);
    }
}
