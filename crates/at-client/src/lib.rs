//! # at-client
//!
//! Core HTTP client infrastructure for the Airtable API.
//!
//! This crate provides the request orchestration layer:
//! - Per-base rate limiting (5 requests/second by default)
//! - Retry with Airtable's backoff schedule on 429/502/503/504
//! - Typed JSON decoding with structured errors
//! - Request/response tracing
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Application Layer                        │
//! │  (at-rest: Airtable → Base → Table → Record)                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   AirtableClient                            │
//! │  - Holds the API key, session and rate limiter              │
//! │  - request(base_id, ..): retry( acquire slot → execute )    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    AtHttpClient                             │
//! │  - Exactly one HTTP call per execute                        │
//! │  - Headers, JSON encoding/decoding, error mapping           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use busbar_at_client::{AirtableClient, RequestBuilder};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), busbar_at_client::Error> {
//!     let client = AirtableClient::new("patXXXXXXXXXXXXXX.XXXX")?;
//!     let url = client.base_url("appXXXXXXXXXXXXXX")?.join("Tasks")?;
//!
//!     let page: serde_json::Value = client
//!         .request("appXXXXXXXXXXXXXX", &RequestBuilder::get(url))
//!         .await?;
//!
//!     client.close();
//!     Ok(())
//! }
//! ```

mod airtable_client;
mod client;
mod config;
mod error;
mod rate_limit;
mod request;
mod response;
mod retry;
pub mod security;

pub use airtable_client::{append_segment, endpoint, AirtableClient, API_KEY_ENV};
pub use client::AtHttpClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{is_transient_status, Error, ErrorKind, Result, TRANSIENT_STATUSES};
pub use rate_limit::{RateLimitConfig, RateLimitPermit, RateLimiter, DEFAULT_MIN_INTERVAL};
pub use request::{RequestBuilder, RequestMethod};
pub use retry::{with_retry, RetryConfig, RetryPolicy, DEFAULT_BASE_WAIT};

/// Default API root.
pub const DEFAULT_API_URL: &str = "https://api.airtable.com/v0";

/// User-Agent string for the client
pub const USER_AGENT: &str = concat!("busbar-at-api/", env!("CARGO_PKG_VERSION"));
