//! Record handle: update and delete.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument};
use url::Url;

use busbar_at_client::{Error, ErrorKind, RequestBuilder, Result};

use crate::table::Table;
use crate::types::{parse_timestamp, DeletedRecord, RecordData, RecordRequest};

/// One record of a table.
///
/// Mutating calls take `&mut self`, so a record has a single owner. Once
/// [`delete`](Self::delete) succeeds the record is terminal: further
/// updates and deletes fail with [`ErrorKind::Deleted`] without touching
/// the network.
#[derive(Debug)]
pub struct Record<F> {
    id: String,
    url: Url,
    fields: F,
    created_time: DateTime<Utc>,
    table: Table<F>,
    deleted: bool,
}

impl<F> Record<F> {
    pub(crate) fn from_data(data: RecordData<F>, table: Table<F>) -> Result<Self> {
        let created_time = parse_timestamp(&data.created_time)?;
        let url = table.record_url(&data.id)?;
        Ok(Self {
            id: data.id,
            url,
            fields: data.fields,
            created_time,
            table,
            deleted: false,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// `{api_url}/{base_id}/{table_name}/{record_id}`
    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn fields(&self) -> &F {
        &self.fields
    }

    pub fn into_fields(self) -> F {
        self.fields
    }

    pub fn created_time(&self) -> DateTime<Utc> {
        self.created_time
    }

    pub fn table(&self) -> &Table<F> {
        &self.table
    }

    pub fn deleted(&self) -> bool {
        self.deleted
    }

    /// Issue a request against this record's base.
    pub async fn request<T: DeserializeOwned>(&self, request: &RequestBuilder) -> Result<T> {
        self.table.request(request).await
    }

    fn ensure_live(&self) -> Result<()> {
        if self.deleted {
            return Err(Error::new(ErrorKind::Deleted {
                record_id: self.id.clone(),
            }));
        }
        Ok(())
    }
}

impl<F: Serialize + DeserializeOwned> Record<F> {
    /// PATCH the given fields and replace the local fields with the
    /// server's copy.
    #[instrument(skip(self, fields), fields(record_id = %self.id))]
    pub async fn update(&mut self, fields: &F) -> Result<()> {
        self.ensure_live()?;
        let request = RequestBuilder::patch(self.url.clone()).json(&RecordRequest { fields })?;
        let data: RecordData<F> = self.request(&request).await?;
        self.fields = data.fields;
        Ok(())
    }
}

impl<F> Record<F> {
    /// Delete the record on the server.
    #[instrument(skip(self), fields(record_id = %self.id))]
    pub async fn delete(&mut self) -> Result<()> {
        self.ensure_live()?;
        let request = RequestBuilder::delete(self.url.clone());
        let response: DeletedRecord = self.request(&request).await?;
        if !response.deleted {
            return Err(Error::new(ErrorKind::UnexpectedResponse(format!(
                "server did not confirm deletion of {}",
                self.id
            ))));
        }
        self.deleted = true;
        debug!("Record deleted");
        Ok(())
    }
}
