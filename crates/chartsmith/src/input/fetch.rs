//! Row sources: the collaborator the engine asks for rows when a snapshot
//! arrives without them.

use std::path::PathBuf;
use std::time::Duration;

use tracing::debug;

use super::parser::{records_from_json, Parser};
use super::source::Record;
use crate::error::{ChartsmithError, Result};

/// Something that can produce the rows of a dataset by id.
pub trait RowSource: Send + Sync {
    /// Fetch all rows for the dataset.
    fn fetch_rows(&self, dataset_id: &str) -> Result<Vec<Record>>;

    /// Name of this source, for logs.
    fn name(&self) -> &str {
        "row_source"
    }
}

impl<F> RowSource for F
where
    F: Fn(&str) -> Result<Vec<Record>> + Send + Sync,
{
    fn fetch_rows(&self, dataset_id: &str) -> Result<Vec<Record>> {
        self(dataset_id)
    }

    fn name(&self) -> &str {
        "closure"
    }
}

/// Reads `<root>/<id>.csv`, `<id>.tsv` or `<id>.json`.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    /// Create a source rooted at a directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl RowSource for DirectorySource {
    fn fetch_rows(&self, dataset_id: &str) -> Result<Vec<Record>> {
        for ext in ["csv", "tsv", "json"] {
            let path = self.root.join(format!("{}.{}", dataset_id, ext));
            if path.is_file() {
                debug!(path = %path.display(), "reading rows from directory source");
                let (dataset, _) = Parser::new().parse_file(&path)?;
                return Ok(dataset.rows);
            }
        }

        Err(ChartsmithError::Fetch {
            dataset_id: dataset_id.to_string(),
            message: format!("no csv, tsv or json file in '{}'", self.root.display()),
        })
    }

    fn name(&self) -> &str {
        "directory"
    }
}

/// Fetches rows over HTTP from `<base_url>/<id>/rows`.
///
/// The endpoint must return a JSON array of objects.
pub struct HttpRowSource {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpRowSource {
    /// Create a source with a 30 second timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    /// Create a source with a custom request timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// URL that rows for a dataset are fetched from.
    pub fn rows_url(&self, dataset_id: &str) -> String {
        format!("{}/{}/rows", self.base_url, dataset_id)
    }
}

impl RowSource for HttpRowSource {
    fn fetch_rows(&self, dataset_id: &str) -> Result<Vec<Record>> {
        let url = self.rows_url(dataset_id);
        debug!(url = %url, "fetching rows over http");

        let response = self.client.get(&url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ChartsmithError::Fetch {
                dataset_id: dataset_id.to_string(),
                message: format!("GET {} returned {}", url, status),
            });
        }

        let body: serde_json::Value = response.json()?;
        records_from_json(body)
    }

    fn name(&self) -> &str {
        "http"
    }
}
