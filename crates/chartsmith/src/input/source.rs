//! Dataset snapshots and source metadata.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::cell::CellValue;

/// One row: column name to coerced value, in column order.
pub type Record = IndexMap<String, CellValue>;

/// A dataset snapshot handed to the engine by a caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    /// Caller-assigned dataset identifier.
    pub id: String,
    /// Ordered column names.
    #[serde(default)]
    pub columns: Vec<String>,
    /// Declared row count. May exceed `rows.len()`.
    #[serde(default)]
    pub row_count: usize,
    /// Rows actually supplied.
    #[serde(default)]
    pub rows: Vec<Record>,
    /// Caller-supplied version token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl Dataset {
    /// Create a dataset with columns and no rows.
    pub fn new(id: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            id: id.into(),
            columns,
            ..Self::default()
        }
    }

    /// Attach rows, updating the declared row count when it is smaller.
    pub fn with_rows(mut self, rows: Vec<Record>) -> Self {
        self.row_count = self.row_count.max(rows.len());
        self.rows = rows;
        self
    }

    /// Set the declared row count.
    pub fn with_row_count(mut self, row_count: usize) -> Self {
        self.row_count = row_count;
        self
    }

    /// Set the version token.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Build a dataset from text rows, coercing each cell.
    pub fn from_text_rows(
        id: impl Into<String>,
        columns: Vec<String>,
        rows: Vec<Vec<String>>,
    ) -> Self {
        let records = rows
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .enumerate()
                    .map(|(idx, name)| {
                        let raw = row.get(idx).map(|s| s.as_str()).unwrap_or("");
                        (name.clone(), CellValue::from_text(raw))
                    })
                    .collect()
            })
            .collect();

        Self::new(id, columns).with_rows(records)
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Whether any rows were supplied.
    pub fn has_rows(&self) -> bool {
        !self.rows.is_empty()
    }

    /// All values for a column, in row order. Missing keys read as null.
    pub fn column_values(&self, name: &str) -> Vec<CellValue> {
        self.rows
            .iter()
            .map(|row| row.get(name).cloned().unwrap_or(CellValue::Null))
            .collect()
    }

    /// The caller's version token, or a content digest when none was given.
    pub fn version_token(&self) -> String {
        if let Some(version) = &self.version {
            return version.clone();
        }

        let mut hasher = Sha256::new();
        hasher.update(self.id.as_bytes());
        for column in &self.columns {
            hasher.update(b"\x1f");
            hasher.update(column.as_bytes());
        }
        hasher.update(self.row_count.to_le_bytes());
        for row in &self.rows {
            hasher.update(b"\x1e");
            for (key, value) in row {
                hasher.update(key.as_bytes());
                hasher.update(b"\x1d");
                hasher.update(value.display_key().as_bytes());
                hasher.update(b"\x1f");
            }
        }
        format!("sha256:{:x}", hasher.finalize())
    }
}

/// Metadata about a data file loaded from disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Detected format (csv, tsv, json, ...).
    pub format: String,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// When the file was loaded.
    pub loaded_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a file that has been loaded.
    pub fn new(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        format: String,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            format,
            row_count,
            column_count,
            loaded_at: Utc::now(),
        }
    }
}
