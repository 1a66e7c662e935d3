use std::time::Duration;

use busbar_at_api::client::RateLimitConfig;
use busbar_at_api::{Airtable, ClientConfig, RetryConfig};
use serde::{Deserialize, Serialize};
use wiremock::MockServer;

pub const BASE_ID: &str = "appIntegration";
pub const CREATED_TIME: &str = "2022-02-02T10:20:30.000Z";

/// Field schema used across the suite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Priority", default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
}

impl Task {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            priority: None,
        }
    }
}

/// Client pointed at the mock server, without throttling or retry.
pub fn airtable(server: &MockServer) -> Airtable {
    airtable_with(server, RateLimitConfig::disabled(), None)
}

pub fn airtable_with(
    server: &MockServer,
    rate_limit: RateLimitConfig,
    retry: Option<RetryConfig>,
) -> Airtable {
    let builder = ClientConfig::builder()
        .with_api_url(format!("{}/v0", server.uri()))
        .with_rate_limit(rate_limit)
        .with_timeout(Duration::from_secs(10));
    let config = match retry {
        Some(retry) => builder.with_retry(retry),
        None => builder.without_retry(),
    }
    .build();

    Airtable::with_config("patIntegration1234.0123456789abcdef", config)
        .expect("client should build")
}

pub fn record_json(id: &str, name: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "fields": {"Name": name},
        "createdTime": CREATED_TIME
    })
}
