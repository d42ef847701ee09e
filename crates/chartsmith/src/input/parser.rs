//! CSV/TSV and JSON loading with delimiter detection.

use std::io::{BufRead, BufReader};
use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::debug;

use super::cell::CellValue;
use super::source::{Dataset, Record, SourceMetadata};
use crate::error::{ChartsmithError, Result};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Whether the file has a header row.
    pub has_header: bool,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: true,
            max_rows: None,
            quote: b'"',
        }
    }
}

/// Loads tabular data files into [`Dataset`] snapshots.
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Load a file and return the dataset and its metadata.
    ///
    /// `.json` files are read as a dataset snapshot or an array of records;
    /// anything else is treated as delimited text. The dataset id is the file
    /// stem and the version token is the SHA-256 of the file contents.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(Dataset, SourceMetadata)> {
        let path = path.as_ref();

        let contents = std::fs::read(path).map_err(|e| ChartsmithError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let size_bytes = contents.len() as u64;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let id = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "dataset".to_string());

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let (dataset, format) = if is_json {
            (parse_json(&contents, &id)?, "json".to_string())
        } else {
            let delimiter = match self.config.delimiter {
                Some(d) => d,
                None => detect_delimiter(&contents)?,
            };
            let format = match delimiter {
                b'\t' => "tsv",
                b',' => "csv",
                b';' => "csv-semicolon",
                b'|' => "psv",
                _ => "delimited",
            }
            .to_string();
            (self.parse_bytes(&contents, delimiter, &id)?, format)
        };

        let dataset = match dataset.version {
            Some(_) => dataset,
            None => dataset.with_version(hash.clone()),
        };

        debug!(
            file = %path.display(),
            format = %format,
            rows = dataset.rows.len(),
            columns = dataset.column_count(),
            "loaded dataset"
        );

        let source_metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            size_bytes,
            format,
            dataset.rows.len(),
            dataset.column_count(),
        );

        Ok((dataset, source_metadata))
    }

    /// Parse delimited bytes directly.
    pub fn parse_bytes(&self, bytes: &[u8], delimiter: u8, id: &str) -> Result<Dataset> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(self.config.has_header)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let headers: Vec<String> = if self.config.has_header {
            reader
                .headers()?
                .iter()
                .map(|s| s.trim().to_string())
                .collect()
        } else {
            let first_record = csv::ReaderBuilder::new()
                .delimiter(delimiter)
                .has_headers(false)
                .quote(self.config.quote)
                .flexible(true)
                .from_reader(bytes)
                .records()
                .next();
            match first_record {
                Some(Ok(record)) => (0..record.len())
                    .map(|i| format!("column_{}", i + 1))
                    .collect(),
                Some(Err(e)) => return Err(e.into()),
                None => {
                    return Err(ChartsmithError::EmptyData(
                        "No data rows found".to_string(),
                    ));
                }
            }
        };

        if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
            return Err(ChartsmithError::EmptyData("No columns found".to_string()));
        }

        let expected_cols = headers.len();
        let mut rows = Vec::new();

        for (row_idx, result) in reader.records().enumerate() {
            if let Some(max) = self.config.max_rows {
                if row_idx >= max {
                    break;
                }
            }

            let record = result?;
            let mut row: Vec<String> = record.iter().map(|s| s.to_string()).collect();

            // Pad short rows, drop extra cells
            while row.len() < expected_cols {
                row.push(String::new());
            }
            row.truncate(expected_cols);

            rows.push(row);
        }

        if rows.is_empty() {
            return Err(ChartsmithError::EmptyData("No data rows found".to_string()));
        }

        Ok(Dataset::from_text_rows(id, headers, rows))
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse JSON as either a full dataset snapshot or an array of records.
pub fn parse_json(bytes: &[u8], id: &str) -> Result<Dataset> {
    let value: serde_json::Value = serde_json::from_slice(bytes)?;

    match value {
        serde_json::Value::Array(_) => {
            let rows = records_from_json(value)?;
            let mut columns: Vec<String> = Vec::new();
            for row in &rows {
                for key in row.keys() {
                    if !columns.contains(key) {
                        columns.push(key.clone());
                    }
                }
            }
            Ok(Dataset::new(id, columns).with_rows(rows))
        }
        serde_json::Value::Object(_) => {
            let mut dataset: Dataset = serde_json::from_value(value)?;
            if dataset.id.is_empty() {
                dataset.id = id.to_string();
            }
            Ok(dataset)
        }
        _ => Err(ChartsmithError::UnsupportedFormat(
            "JSON input must be a dataset object or an array of records".to_string(),
        )),
    }
}

/// Decode a JSON array of objects into records.
pub fn records_from_json(value: serde_json::Value) -> Result<Vec<Record>> {
    let serde_json::Value::Array(items) = value else {
        return Err(ChartsmithError::UnsupportedFormat(
            "expected a JSON array of records".to_string(),
        ));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(row, item)| match item {
            serde_json::Value::Object(map) => Ok(map
                .into_iter()
                .map(|(k, v)| (k, CellValue::from(v)))
                .collect()),
            other => Err(ChartsmithError::Parse {
                row,
                column: 0,
                message: format!("expected an object, found {}", other),
            }),
        })
        .collect()
}

/// Detect the delimiter by analyzing the first few lines.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let reader = BufReader::new(bytes);
    let lines: Vec<String> = reader
        .lines()
        .take(10)
        .filter_map(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(ChartsmithError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        let consistent = counts.iter().all(|&c| c == first_count);
        let variance: f64 = if counts.len() > 1 {
            let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
            counts.iter().map(|&c| (c as f64 - mean).powi(2)).sum::<f64>() / counts.len() as f64
        } else {
            0.0
        };

        // Higher count with lower variance wins; tab breaks ties
        let score = if consistent {
            first_count * 1000 + (if delim == b'\t' { 100 } else { 0 })
        } else if variance < 1.0 {
            first_count * 100
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_detect_delimiter_csv() {
        let data = b"a,b,c\n1,2,3\n4,5,6";
        assert_eq!(detect_delimiter(data).unwrap(), b',');
    }

    #[test]
    fn test_detect_delimiter_tsv() {
        let data = b"a\tb\tc\n1\t2\t3\n4\t5\t6";
        assert_eq!(detect_delimiter(data).unwrap(), b'\t');
    }

    #[test]
    fn test_quoted_delimiters_ignored() {
        assert_eq!(count_delimiter_in_line(r#""a,b",c"#, b','), 1);
    }

    #[test]
    fn test_parse_csv() {
        let parser = Parser::new();
        let data = b"name,age,city\nAlice,30,NYC\nBob,25,LA";
        let ds = parser.parse_bytes(data, b',', "people").unwrap();

        assert_eq!(ds.columns, vec!["name", "age", "city"]);
        assert_eq!(ds.rows.len(), 2);
        assert_eq!(ds.rows[0]["name"], CellValue::Text("Alice".to_string()));
        assert_eq!(ds.rows[1]["age"], CellValue::Number(25.0));
    }

    #[test]
    fn test_parse_short_rows_padded() {
        let parser = Parser::new();
        let ds = parser.parse_bytes(b"a,b\n1\n2,3", b',', "t").unwrap();
        assert_eq!(ds.rows[0]["b"], CellValue::Null);
    }

    #[test]
    fn test_header_only_is_empty_data() {
        let parser = Parser::new();
        let err = parser.parse_bytes(b"a,b\n", b',', "t").unwrap_err();
        assert!(matches!(err, ChartsmithError::EmptyData(_)));
    }

    #[test]
    fn test_parse_file_sets_version_from_hash() {
        let mut file = NamedTempFile::with_suffix(".tsv").unwrap();
        file.write_all(b"region\tsales\nA\t10\nB\t20\n").unwrap();

        let (ds, meta) = Parser::new().parse_file(file.path()).unwrap();
        assert_eq!(meta.format, "tsv");
        assert_eq!(meta.row_count, 2);
        assert_eq!(ds.version.as_deref(), Some(meta.hash.as_str()));
    }

    #[test]
    fn test_parse_json_records() {
        let ds = parse_json(br#"[{"a":1,"b":"x"},{"a":2,"c":true}]"#, "j").unwrap();
        assert_eq!(ds.columns, vec!["a", "b", "c"]);
        assert_eq!(ds.rows.len(), 2);
        assert_eq!(ds.row_count, 2);
    }

    #[test]
    fn test_parse_json_records_keep_key_order() {
        let ds = parse_json(br#"[{"zone":"north","alpha":"beta","n":1}]"#, "j").unwrap();
        assert_eq!(ds.columns, vec!["zone", "alpha", "n"]);
        let keys: Vec<&str> = ds.rows[0].keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["zone", "alpha", "n"]);
    }

    #[test]
    fn test_parse_json_snapshot() {
        let ds = parse_json(br#"{"id":"","columns":["x"],"row_count":40}"#, "fallback").unwrap();
        assert_eq!(ds.id, "fallback");
        assert_eq!(ds.row_count, 40);
    }

    #[test]
    fn test_parse_json_rejects_scalars() {
        assert!(parse_json(b"42", "j").is_err());
        assert!(records_from_json(serde_json::json!([1, 2])).is_err());
    }
}
