//! In-memory sheet representation and its provenance.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata about where a sheet snapshot came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File path or URL the bytes were read from.
    pub origin: String,
    /// SHA-256 hash of the raw contents.
    pub hash: String,
    /// Content size in bytes.
    pub size_bytes: u64,
    /// Detected format (csv, tsv, etc.).
    pub format: String,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// When the contents were read.
    pub fetched_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for contents that have just been parsed.
    pub fn new(
        origin: impl Into<String>,
        hash: String,
        size_bytes: u64,
        format: String,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        Self {
            origin: origin.into(),
            hash,
            size_bytes,
            format,
            row_count,
            column_count,
            fetched_at: Utc::now(),
        }
    }
}

/// Represents a parsed sheet: raw headers and string cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataTable {
    /// Column headers, exactly as they appeared in the sheet.
    pub headers: Vec<String>,
    /// Row data as strings (row-major order).
    pub rows: Vec<Vec<String>>,
}

impl DataTable {
    /// Create a new data table.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Build a table from string literals.
    pub fn from_rows<H, R, C>(headers: H, rows: R) -> Self
    where
        H: IntoIterator,
        H::Item: Into<String>,
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of rows (excluding header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if a value is one of the spreadsheet's "no data" spellings.
    ///
    /// Exports write missing cells as empty strings, `None` or `nan` depending
    /// on which tool touched the sheet last.
    pub fn is_null_value(value: &str) -> bool {
        let trimmed = value.trim();
        trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("none")
            || trimmed.eq_ignore_ascii_case("nan")
    }
}
