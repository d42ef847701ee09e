//! Column profiles and their statistics.

use serde::{Deserialize, Serialize};

use super::types::ColumnType;

/// Descriptive statistics for numeric columns.
///
/// Quantiles use nearest rank without interpolation, so they are always
/// members of the column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NumericStats {
    pub mean: f64,
    pub median: f64,
    /// Population standard deviation.
    pub std: f64,
    pub min: f64,
    pub max: f64,
    /// First quartile.
    pub q1: f64,
    /// Third quartile.
    pub q3: f64,
    pub skewness: f64,
    /// Excess kurtosis.
    pub kurtosis: f64,
}

impl NumericStats {
    /// Calculate the interquartile range.
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Lower and upper Tukey fences.
    pub fn fences(&self, multiplier: f64) -> (f64, f64) {
        let iqr = self.iqr();
        (self.q1 - multiplier * iqr, self.q3 + multiplier * iqr)
    }

    /// Check if a value is an outlier using the IQR method.
    pub fn is_outlier_iqr(&self, value: f64, multiplier: f64) -> bool {
        let (lower, upper) = self.fences(multiplier);
        value < lower || value > upper
    }
}

/// A category label and how often it occurs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub value: String,
    pub count: usize,
}

/// Range covered by a temporal column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemporalStats {
    /// Earliest date, `YYYY-MM-DD`.
    pub min: String,
    /// Latest date, `YYYY-MM-DD`.
    pub max: String,
    pub span_days: i64,
}

/// Computed statistical summary of one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnProfile {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    /// Number of non-null values.
    pub count: usize,
    pub null_count: usize,
    pub null_percentage: f64,
    /// Distinct non-null values.
    pub unique_count: usize,
    pub unique_percentage: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric_stats: Option<NumericStats>,
    /// Values outside the Tukey fences, in column order. Numeric only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outliers: Option<Vec<f64>>,
    /// Most frequent labels. Categorical only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_categories: Option<Vec<CategoryCount>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temporal_stats: Option<TemporalStats>,
}

impl ColumnProfile {
    /// A zeroed profile for a column with no values.
    pub fn empty(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            count: 0,
            null_count: 0,
            null_percentage: 0.0,
            unique_count: 0,
            unique_percentage: 0.0,
            numeric_stats: None,
            outliers: None,
            top_categories: None,
            mode: None,
            temporal_stats: None,
        }
    }

    /// Total values including nulls.
    pub fn total(&self) -> usize {
        self.count + self.null_count
    }

    /// Number of detected outliers.
    pub fn outlier_count(&self) -> usize {
        self.outliers.as_ref().map_or(0, Vec::len)
    }
}
