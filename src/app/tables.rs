//! The fixed set of CellarTracker tables exported by a dump
//!
//! Tables are fetched in the order declared by [`default_tables`].

use crate::constants::{cellartracker, files};

/// One table export request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRequest {
    /// Table name as the service knows it (e.g. `Inventory`)
    pub name: String,
    /// Export format, `csv` unless overridden
    pub format: String,
    /// Extra query parameters; a `Format` entry here overrides `format`
    pub params: Vec<(String, String)>,
}

impl TableRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            format: cellartracker::DEFAULT_FORMAT.to_string(),
            params: Vec::new(),
        }
    }

    /// Add an extra query parameter
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Full query string pairs: `Table`, `Format`, then the extras
    pub fn query_pairs(&self) -> Vec<(&str, &str)> {
        let format_overridden = self.params.iter().any(|(key, _)| key == "Format");

        let mut pairs = vec![("Table", self.name.as_str())];
        if !format_overridden {
            pairs.push(("Format", self.format.as_str()));
        }
        pairs.extend(
            self.params
                .iter()
                .filter(|(key, _)| key != "Table")
                .map(|(key, value)| (key.as_str(), value.as_str())),
        );
        pairs
    }

    /// Output file name: lower-cased table name with a `.csv` suffix
    pub fn file_name(&self) -> String {
        format!(
            "{}.{}",
            self.name.to_lowercase(),
            files::TABLE_FILE_EXTENSION
        )
    }
}

/// The twelve tables of a full dump, in fetch order
pub fn default_tables() -> Vec<TableRequest> {
    vec![
        TableRequest::new("List").with_param("Location", "1"),
        TableRequest::new("Inventory"),
        TableRequest::new("Notes"),
        TableRequest::new("PrivateNotes"),
        TableRequest::new("Purchase"),
        TableRequest::new("Pending"),
        TableRequest::new("Consumed"),
        TableRequest::new("Availability"),
        TableRequest::new("Tag"),
        TableRequest::new("ProReview"),
        TableRequest::new("Bottles"),
        TableRequest::new("FoodTags"),
    ]
}
