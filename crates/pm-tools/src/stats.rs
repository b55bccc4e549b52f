//! Statistics tools
//!
//! getDeliveryStats computes open/click rates from Postmark's aggregate
//! counters; getOutboundMessages pages through sent messages.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value as JsonValue, json};

use pm_client::{OutboundStats, PostmarkClient, StatsFilter};
use pm_core::{Error, Tool, ToolResult};

use crate::args::optional_str;

const DEFAULT_MESSAGE_COUNT: u64 = 10;
const DEFAULT_MESSAGE_OFFSET: u64 = 0;

/// Map validated input onto the stats query filter
///
/// Absent fields stay `None` so the client appends no query parameter
/// for them. The messageStream field here is a filter, not a send
/// target, so it is deliberately not defaulted from configuration.
pub fn stats_filter(input: &JsonValue) -> StatsFilter {
    StatsFilter {
        tag: optional_str(input, "tag"),
        from_date: optional_str(input, "fromDate"),
        to_date: optional_str(input, "toDate"),
        message_stream: optional_str(input, "messageStream"),
    }
}

/// Pagination parameters for getOutboundMessages, with literal defaults
pub fn page_params(input: &JsonValue) -> (u64, u64) {
    let count = input["count"].as_u64().unwrap_or(DEFAULT_MESSAGE_COUNT);
    let offset = input["offset"].as_u64().unwrap_or(DEFAULT_MESSAGE_OFFSET);
    (count, offset)
}

/// Render a percentage with one decimal place, capped at 100
///
/// A zero denominator yields "0.0" rather than an error; the cap
/// absorbs upstream counters that nominally exceed their denominator.
pub fn format_rate(numerator: u64, denominator: u64) -> String {
    if denominator == 0 {
        return "0.0".to_string();
    }
    let rate = numerator as f64 / denominator as f64 * 100.0;
    if !rate.is_finite() {
        return "0.0".to_string();
    }
    format!("{:.1}", rate.min(100.0))
}

/// Derived rates plus the raw counters they were computed from
pub fn stats_summary(stats: &OutboundStats) -> JsonValue {
    json!({
        "openRate": format_rate(stats.unique_opens, stats.tracked),
        "clickRate": format_rate(stats.unique_links_clicked, stats.total_tracked_links_sent),
        "sent": stats.sent,
        "bounced": stats.bounced,
        "tracked": stats.tracked,
        "opens": stats.opens,
        "uniqueOpens": stats.unique_opens,
        "totalClicks": stats.total_clicks,
        "uniqueLinksClicked": stats.unique_links_clicked,
        "totalTrackedLinksSent": stats.total_tracked_links_sent
    })
}

/// Query aggregate delivery statistics
pub struct GetDeliveryStatsTool {
    client: Arc<PostmarkClient>,
}

impl GetDeliveryStatsTool {
    pub fn new(client: Arc<PostmarkClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for GetDeliveryStatsTool {
    fn name(&self) -> &str {
        "getDeliveryStats"
    }

    fn description(&self) -> &str {
        "Query aggregate outbound delivery statistics, with derived open and click rates"
    }

    fn input_schema(&self) -> JsonValue {
        json!({
            "type": "object",
            "properties": {
                "tag": {
                    "type": "string",
                    "description": "Only count messages with this tag"
                },
                "fromDate": {
                    "type": "string",
                    "format": "date",
                    "description": "Window start, YYYY-MM-DD"
                },
                "toDate": {
                    "type": "string",
                    "format": "date",
                    "description": "Window end, YYYY-MM-DD"
                },
                "messageStream": {
                    "type": "string",
                    "description": "Only count messages on this stream"
                }
            }
        })
    }

    async fn execute(&self, input: JsonValue) -> pm_core::Result<ToolResult> {
        let filter = stats_filter(&input);
        let stats = self
            .client
            .outbound_stats(&filter)
            .await
            .map_err(|e| Error::Upstream(e.to_string()))?;

        Ok(ToolResult::success(serde_json::to_string(&stats_summary(
            &stats,
        ))?))
    }
}

/// List previously sent messages
pub struct GetOutboundMessagesTool {
    client: Arc<PostmarkClient>,
}

impl GetOutboundMessagesTool {
    pub fn new(client: Arc<PostmarkClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for GetOutboundMessagesTool {
    fn name(&self) -> &str {
        "getOutboundMessages"
    }

    fn description(&self) -> &str {
        "List previously sent messages, newest first"
    }

    fn input_schema(&self) -> JsonValue {
        json!({
            "type": "object",
            "properties": {
                "count": {
                    "type": "integer",
                    "description": "Number of messages to return (default: 10)"
                },
                "offset": {
                    "type": "integer",
                    "description": "Number of messages to skip (default: 0)"
                }
            }
        })
    }

    async fn execute(&self, input: JsonValue) -> pm_core::Result<ToolResult> {
        let (count, offset) = page_params(&input);
        let page = self
            .client
            .outbound_messages(count, offset)
            .await
            .map_err(|e| Error::Upstream(e.to_string()))?;

        Ok(ToolResult::success(serde_json::to_string(&page)?))
    }
}
