//! Wire shapes and common field value types.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use busbar_at_client::{Error, ErrorKind, Result};

/// Format Airtable uses for `createdTime`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Schema-less field map for tables without a dedicated struct.
pub type DynamicFields = serde_json::Map<String, serde_json::Value>;

/// Parse an Airtable UTC timestamp such as `2024-03-01T09:30:00.000Z`.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.fZ")
        .map(|naive| naive.and_utc())
        .map_err(|e| Error::with_source(ErrorKind::Timestamp(value.to_string()), e))
}

/// Render a timestamp the way Airtable does.
pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.format(TIMESTAMP_FORMAT).to_string()
}

/// A record as it appears on the wire.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecordData<F> {
    pub id: String,
    pub fields: F,
    #[serde(rename = "createdTime")]
    pub created_time: String,
}

/// One page of a list call.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecordList<F> {
    pub records: Vec<RecordData<F>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<String>,
}

/// Body of create and update calls.
#[derive(Debug, Clone, Serialize)]
pub struct RecordRequest<'a, F> {
    pub fields: &'a F,
}

/// Response to a delete call.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeletedRecord {
    pub id: String,
    pub deleted: bool,
}

/// Sort direction for `sort[i][direction]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Cell rendering requested through `cellFormat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CellFormat {
    Json,
    String,
}

impl CellFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            CellFormat::Json => "json",
            CellFormat::String => "string",
        }
    }
}

/// One thumbnail rendition of an attachment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Thumbnail {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

/// Thumbnail renditions Airtable generates for image attachments.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct Thumbnails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub small: Option<Thumbnail>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub large: Option<Thumbnail>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full: Option<Thumbnail>,
}

/// Attachment cell value as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Attachment {
    pub id: String,
    pub url: String,
    pub filename: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub content_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnails: Option<Thumbnails>,
}

/// Attachment cell value for writes: either a public URL to fetch, or the
/// id of an attachment that is already on the record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NewAttachment {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

impl NewAttachment {
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            id: None,
            filename: None,
        }
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }
}

/// Collaborator cell value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Collaborator {
    pub id: String,
    pub email: String,
    pub name: String,
}
