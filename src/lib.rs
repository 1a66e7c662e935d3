//! # busbar-at-api
//!
//! An async Airtable API client library for Rust.
//!
//! This library provides typed access to Airtable bases, tables and records
//! with built-in per-base rate limiting, retry on transient failures, and
//! structured errors.
//!
//! ## Security
//!
//! - The API key is redacted in Debug output
//! - Tracing skips credential parameters
//! - Error messages sanitize any API keys echoed by the server
//!
//! ## Crates
//!
//! - **busbar-at-client** - Core HTTP client infrastructure: rate limiting, retry, error taxonomy
//! - **busbar-at-rest** - REST API: bases, tables, records, pagination
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use busbar_at_api::{Airtable, DynamicFields, ListRecordsOptions};
//! use futures::TryStreamExt;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads AIRTABLE_API_KEY
//!     let airtable = Airtable::from_env()?;
//!     let table = airtable
//!         .base("appXXXXXXXXXXXXXX")?
//!         .table::<DynamicFields>("Tasks")?;
//!
//!     let records: Vec<_> = table
//!         .iter_records(ListRecordsOptions::new().view("Grid view"))
//!         .try_collect()
//!         .await?;
//!
//!     for record in records {
//!         println!("{} {:?}", record.id(), record.fields().get("Name"));
//!     }
//!
//!     airtable.close();
//!     Ok(())
//! }
//! ```

// Re-export all crates for convenient access
pub use busbar_at_client as client;
pub use busbar_at_rest as rest;

// Re-export commonly used types at the top level
pub use busbar_at_client::{AirtableClient, ClientConfig, Error, ErrorKind, Result, RetryConfig};
pub use busbar_at_rest::{
    Airtable, Base, CellFormat, DynamicFields, ListRecordsOptions, Record, RecordStream,
    SortDirection, Table,
};
