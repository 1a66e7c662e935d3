//! Table handle: list, iterate, retrieve and create records.

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument};
use url::Url;

use busbar_at_client::{append_segment, endpoint, RequestBuilder, Result};

use crate::base::Base;
use crate::pagination::{record_stream, RecordStream};
use crate::query::{ListRecordsOptions, DEFAULT_PAGE_SIZE};
use crate::record::Record;
use crate::types::{RecordData, RecordList, RecordRequest};

/// One table of a base, typed by its field schema `F`.
///
/// `F` is any serde type describing the `fields` object, or
/// [`DynamicFields`](crate::DynamicFields) for an untyped map.
pub struct Table<F> {
    base: Base,
    name: String,
    url: Url,
    _fields: PhantomData<fn() -> F>,
}

impl<F> Clone for Table<F> {
    fn clone(&self) -> Self {
        Self {
            base: self.base.clone(),
            name: self.name.clone(),
            url: self.url.clone(),
            _fields: PhantomData,
        }
    }
}

impl<F> fmt::Debug for Table<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("base", &self.base.id())
            .field("name", &self.name)
            .field("url", &self.url.as_str())
            .finish()
    }
}

impl<F> Table<F> {
    pub(crate) fn new(base: Base, name: String) -> Result<Self> {
        let url = endpoint(&append_segment(base.url(), &name)?);
        Ok(Self {
            base,
            name,
            url,
            _fields: PhantomData,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `{api_url}/{base_id}/{table_name}`
    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn base(&self) -> &Base {
        &self.base
    }

    /// Issue a request against this table's base.
    pub async fn request<T: DeserializeOwned>(&self, request: &RequestBuilder) -> Result<T> {
        self.base.request(request).await
    }

    pub(crate) fn record_url(&self, record_id: &str) -> Result<Url> {
        Ok(endpoint(&append_segment(&self.url, record_id)?))
    }
}

impl<F: DeserializeOwned> Table<F> {
    /// Fetch one page of records.
    ///
    /// Returns the records and the cursor for the next page, if any.
    #[instrument(skip(self, options), fields(table = %self.name))]
    pub async fn list_records(
        &self,
        options: &ListRecordsOptions,
    ) -> Result<(Vec<Record<F>>, Option<String>)> {
        let request = RequestBuilder::get(self.url.clone()).query_pairs(options.to_query_pairs());
        let page: RecordList<F> = self.request(&request).await?;

        let records = page
            .records
            .into_iter()
            .map(|data| Record::from_data(data, self.clone()))
            .collect::<Result<Vec<_>>>()?;

        debug!(count = records.len(), more = page.offset.is_some(), "Page received");
        Ok((records, page.offset))
    }

    /// Fetch a single record by id.
    #[instrument(skip(self), fields(table = %self.name))]
    pub async fn retrieve_record(&self, record_id: &str) -> Result<Record<F>> {
        let request = RequestBuilder::get(self.record_url(record_id)?);
        let data: RecordData<F> = self.request(&request).await?;
        Record::from_data(data, self.clone())
    }
}

impl<F: DeserializeOwned + Send + 'static> Table<F> {
    /// Stream every record matching `options`, fetching pages on demand.
    ///
    /// `page_size` defaults to 25. Any `offset` in `options` is ignored;
    /// iteration always starts at the first page.
    pub fn iter_records(&self, mut options: ListRecordsOptions) -> RecordStream<F> {
        if options.page_size.is_none() {
            options.page_size = Some(DEFAULT_PAGE_SIZE);
        }
        options.offset = None;
        record_stream(self.clone(), options)
    }
}

impl<F: Serialize + DeserializeOwned> Table<F> {
    /// Create a record. The returned record carries the fields as stored
    /// by the server.
    #[instrument(skip(self, fields), fields(table = %self.name))]
    pub async fn create_record(&self, fields: &F) -> Result<Record<F>> {
        let request = RequestBuilder::post(self.url.clone()).json(&RecordRequest { fields })?;
        let data: RecordData<F> = self.request(&request).await?;
        debug!(record_id = %data.id, "Record created");
        Record::from_data(data, self.clone())
    }
}
