//! List-records query options.
//!
//! Builds the query string for `GET /{baseId}/{table}` in a fixed parameter
//! order so requests are reproducible.
//!
//! # Example
//!
//! ```rust,ignore
//! use busbar_at_rest::{ListRecordsOptions, SortDirection};
//!
//! let options = ListRecordsOptions::new()
//!     .fields(["Name", "Status"])
//!     .filter_by_formula("{Status} = 'Open'")
//!     .sort("Priority", SortDirection::Desc)
//!     .view("Grid view");
//! ```

use crate::types::{CellFormat, SortDirection};

/// Page size used by [`Table::iter_records`](crate::Table::iter_records)
/// when none is set.
pub const DEFAULT_PAGE_SIZE: u32 = 25;

/// Options for listing records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListRecordsOptions {
    pub fields: Vec<String>,
    pub filter_by_formula: Option<String>,
    pub max_records: Option<u32>,
    pub page_size: Option<u32>,
    pub sort: Vec<(String, SortDirection)>,
    pub view: Option<String>,
    pub cell_format: Option<CellFormat>,
    pub time_zone: Option<String>,
    pub user_locale: Option<String>,
    /// Pagination cursor returned by the previous page.
    pub offset: Option<String>,
}

impl ListRecordsOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only return these fields.
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields.extend(fields.into_iter().map(Into::into));
        self
    }

    pub fn filter_by_formula(mut self, formula: impl Into<String>) -> Self {
        self.filter_by_formula = Some(formula.into());
        self
    }

    pub fn max_records(mut self, max_records: u32) -> Self {
        self.max_records = Some(max_records);
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Add a sort key. Keys apply in the order they are added.
    pub fn sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort.push((field.into(), direction));
        self
    }

    pub fn view(mut self, view: impl Into<String>) -> Self {
        self.view = Some(view.into());
        self
    }

    pub fn cell_format(mut self, cell_format: CellFormat) -> Self {
        self.cell_format = Some(cell_format);
        self
    }

    pub fn time_zone(mut self, time_zone: impl Into<String>) -> Self {
        self.time_zone = Some(time_zone.into());
        self
    }

    pub fn user_locale(mut self, user_locale: impl Into<String>) -> Self {
        self.user_locale = Some(user_locale.into());
        self
    }

    pub fn offset(mut self, offset: impl Into<String>) -> Self {
        self.offset = Some(offset.into());
        self
    }

    /// Query pairs in wire order. Unset options are omitted.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();

        for field in &self.fields {
            pairs.push(("fields[]".to_string(), field.clone()));
        }
        if let Some(ref formula) = self.filter_by_formula {
            pairs.push(("filterByFormula".to_string(), formula.clone()));
        }
        if let Some(max_records) = self.max_records {
            pairs.push(("maxRecords".to_string(), max_records.to_string()));
        }
        if let Some(page_size) = self.page_size {
            pairs.push(("pageSize".to_string(), page_size.to_string()));
        }
        for (i, (field, direction)) in self.sort.iter().enumerate() {
            pairs.push((format!("sort[{i}][field]"), field.clone()));
            pairs.push((format!("sort[{i}][direction]"), direction.as_str().to_string()));
        }
        if let Some(ref view) = self.view {
            pairs.push(("view".to_string(), view.clone()));
        }
        if let Some(cell_format) = self.cell_format {
            pairs.push(("cellFormat".to_string(), cell_format.as_str().to_string()));
        }
        if let Some(ref time_zone) = self.time_zone {
            pairs.push(("timeZone".to_string(), time_zone.clone()));
        }
        if let Some(ref user_locale) = self.user_locale {
            pairs.push(("userLocale".to_string(), user_locale.clone()));
        }
        if let Some(ref offset) = self.offset {
            pairs.push(("offset".to_string(), offset.clone()));
        }

        pairs
    }
}
