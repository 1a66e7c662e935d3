//! Base handle.

use serde::de::DeserializeOwned;
use url::Url;

use busbar_at_client::{AirtableClient, RequestBuilder, Result};

use crate::table::Table;

/// One Airtable base. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Base {
    client: AirtableClient,
    id: String,
    url: Url,
}

impl Base {
    pub(crate) fn new(client: AirtableClient, id: String) -> Result<Self> {
        let url = client.base_url(&id)?;
        Ok(Self { client, id, url })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// `{api_url}/{base_id}/`
    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn client(&self) -> &AirtableClient {
        &self.client
    }

    /// Typed handle for one table in this base. No network call is made.
    pub fn table<F>(&self, name: impl Into<String>) -> Result<Table<F>> {
        Table::new(self.clone(), name.into())
    }

    /// Issue a request that counts against this base's rate limit.
    pub async fn request<T: DeserializeOwned>(&self, request: &RequestBuilder) -> Result<T> {
        self.client.request(&self.id, request).await
    }
}
