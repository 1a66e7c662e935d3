//! Airtable REST API entry point.
//!
//! This client wraps `AirtableClient` from `at-client` and hands out
//! [`Base`] handles that share its session and rate limiter.

use busbar_at_client::{AirtableClient, ClientConfig, Result};

use crate::base::Base;

/// Airtable REST API client.
///
/// # Example
///
/// ```rust,ignore
/// use busbar_at_rest::{Airtable, DynamicFields, ListRecordsOptions};
///
/// let airtable = Airtable::new("patXXXXXXXXXXXXXX.XXXX")?;
/// let tasks = airtable.base("appXXXXXXXXXXXXXX")?.table::<DynamicFields>("Tasks")?;
///
/// let (records, offset) = tasks.list_records(&ListRecordsOptions::new()).await?;
///
/// airtable.close();
/// ```
#[derive(Debug, Clone)]
pub struct Airtable {
    client: AirtableClient,
}

impl Airtable {
    /// Create a client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let client = AirtableClient::new(api_key)?;
        Ok(Self { client })
    }

    /// Create a client with custom HTTP configuration.
    pub fn with_config(api_key: impl Into<String>, config: ClientConfig) -> Result<Self> {
        let client = AirtableClient::with_config(api_key, config)?;
        Ok(Self { client })
    }

    /// Create a client from the `AIRTABLE_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let client = AirtableClient::from_env()?;
        Ok(Self { client })
    }

    /// Create a client from an existing AirtableClient.
    pub fn from_client(client: AirtableClient) -> Self {
        Self { client }
    }

    /// Get the underlying AirtableClient.
    pub fn inner(&self) -> &AirtableClient {
        &self.client
    }

    /// Handle for one base. No network call is made.
    pub fn base(&self, base_id: impl Into<String>) -> Result<Base> {
        Base::new(self.client.clone(), base_id.into())
    }

    /// Release the HTTP session and rate-limiter state. Idempotent.
    pub fn close(&self) {
        self.client.close();
    }

    pub fn is_closed(&self) -> bool {
        self.client.is_closed()
    }
}
