//! Error types for the chartsmith library.
//!
//! Only the plumbing around the engine is fallible (reading files, parsing
//! delimited text, decoding JSON, fetching rows). The analysis itself never
//! fails; degraded inputs are reported through [`crate::AnalysisFlag`].

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for chartsmith operations.
#[derive(Debug, Error)]
pub enum ChartsmithError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error parsing CSV/TSV data.
    #[error("Parse error at row {row}, column {column}: {message}")]
    Parse {
        row: usize,
        column: usize,
        message: String,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid delimiter detected or specified.
    #[error("Invalid delimiter: {0}")]
    InvalidDelimiter(String),

    /// File format not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Empty file or no data to analyze.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A row source could not deliver rows for a dataset.
    #[error("Failed to fetch rows for dataset '{dataset_id}': {message}")]
    Fetch { dataset_id: String, message: String },

    /// HTTP transport error from a remote row source.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for chartsmith operations.
pub type Result<T> = std::result::Result<T, ChartsmithError>;
