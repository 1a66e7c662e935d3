//! # at-rest
//!
//! Typed Airtable REST API client: bases, tables and records.
//!
//! ## Features
//!
//! - **Resource hierarchy** - `Airtable` → `Base` → `Table<F>` → `Record<F>`,
//!   each level only adds its URL segment
//! - **Typed fields** - any serde type describes a table's fields
//! - **List records** - filter, sort, view and cell-format options
//! - **Pagination** - `iter_records` streams every record, fetching pages
//!   on demand
//! - **Record lifecycle** - update and delete, with deleted records
//!   rejected locally
//!
//! All calls go through one shared `AirtableClient`, so every table of a
//! base shares that base's rate limit.
//!
//! ## Example
//!
//! ```rust,ignore
//! use busbar_at_rest::{Airtable, ListRecordsOptions, SortDirection};
//! use futures::TryStreamExt;
//!
//! #[derive(serde::Serialize, serde::Deserialize)]
//! struct Task {
//!     #[serde(rename = "Name")]
//!     name: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), busbar_at_rest::Error> {
//!     let airtable = Airtable::from_env()?;
//!     let tasks = airtable.base("appXXXXXXXXXXXXXX")?.table::<Task>("Tasks")?;
//!
//!     // Create
//!     let mut task = tasks
//!         .create_record(&Task { name: "Write docs".into() })
//!         .await?;
//!
//!     // Iterate
//!     let all: Vec<_> = tasks
//!         .iter_records(ListRecordsOptions::new().sort("Name", SortDirection::Asc))
//!         .try_collect()
//!         .await?;
//!
//!     // Delete
//!     task.delete().await?;
//!
//!     airtable.close();
//!     Ok(())
//! }
//! ```

mod base;
mod client;
mod pagination;
mod query;
mod record;
mod table;
mod types;

pub use base::Base;
pub use client::Airtable;
pub use pagination::RecordStream;
pub use query::{ListRecordsOptions, DEFAULT_PAGE_SIZE};
pub use record::Record;
pub use table::Table;
pub use types::{
    format_timestamp, parse_timestamp, Attachment, CellFormat, Collaborator, DeletedRecord,
    DynamicFields, NewAttachment, RecordData, RecordList, SortDirection, Thumbnail, Thumbnails,
    TIMESTAMP_FORMAT,
};

// Re-export commonly used types from at-client
pub use busbar_at_client::{
    AirtableClient, ClientConfig, ClientConfigBuilder, Error, ErrorKind, RateLimitConfig,
    RequestBuilder, RequestMethod, Result, RetryConfig,
};
