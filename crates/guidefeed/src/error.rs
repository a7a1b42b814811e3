//! Error types for the guidefeed library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for guidefeed operations.
#[derive(Debug, Error)]
pub enum FeedbackError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Empty sheet or no rows to report on.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// A column the report cannot do without is absent from the sheet.
    #[error("Coluna {column} não encontrada na sheet {sheet}")]
    MissingColumn { sheet: String, column: String },

    /// A caller-supplied date did not match any accepted format.
    #[error("Formato inválido: {0}")]
    InvalidDate(String),

    /// The row source could not deliver a sheet.
    #[error("Failed to fetch sheet '{sheet}': {message}")]
    Fetch { sheet: String, message: String },

    /// Error from the HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl FeedbackError {
    /// Shorthand for a missing required column.
    pub fn missing_column(sheet: impl Into<String>, column: impl Into<String>) -> Self {
        FeedbackError::MissingColumn {
            sheet: sheet.into(),
            column: column.into(),
        }
    }
}

/// Result type alias for guidefeed operations.
pub type Result<T> = std::result::Result<T, FeedbackError>;
