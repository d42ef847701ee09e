//! Per-column descriptive statistics.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::input::CellValue;
use crate::schema::{CategoryCount, ColumnProfile, ColumnType, NumericStats, TemporalStats};

/// Configuration for the statistics engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatisticsConfig {
    /// Tukey fence multiplier for outlier detection.
    pub iqr_multiplier: f64,
    /// How many categories to keep in `top_categories`.
    pub top_categories: usize,
}

impl Default for StatisticsConfig {
    fn default() -> Self {
        Self {
            iqr_multiplier: 1.5,
            top_categories: 5,
        }
    }
}

/// Computes [`ColumnProfile`]s from classified columns.
pub struct StatisticsEngine {
    config: StatisticsConfig,
}

impl StatisticsEngine {
    /// Create an engine with default settings.
    pub fn new() -> Self {
        Self::with_config(StatisticsConfig::default())
    }

    /// Create an engine with custom settings.
    pub fn with_config(config: StatisticsConfig) -> Self {
        Self { config }
    }

    /// Profile a column. `values` includes nulls so they can be counted.
    pub fn profile(&self, name: &str, column_type: ColumnType, values: &[CellValue]) -> ColumnProfile {
        let mut profile = ColumnProfile::empty(name, column_type);
        let total = values.len();
        if total == 0 {
            return profile;
        }

        let non_null: Vec<&CellValue> = values.iter().filter(|v| !v.is_null()).collect();
        let count = non_null.len();
        let null_count = total - count;

        // First-seen order is kept by the IndexMap and relied on for ties
        let mut frequencies: IndexMap<String, usize> = IndexMap::new();
        for value in &non_null {
            *frequencies.entry(value.display_key()).or_insert(0) += 1;
        }
        let unique_count = frequencies.len();

        profile.count = count;
        profile.null_count = null_count;
        profile.null_percentage = null_count as f64 / total as f64 * 100.0;
        profile.unique_count = unique_count;
        profile.unique_percentage = if count == 0 {
            0.0
        } else {
            unique_count as f64 / count as f64 * 100.0
        };

        match column_type {
            ColumnType::Numeric => {
                let numbers: Vec<f64> = non_null.iter().filter_map(|v| v.as_f64()).collect();
                if let Some(stats) = numeric_stats(&numbers) {
                    profile.outliers = Some(self.outliers(&numbers, &stats));
                    profile.numeric_stats = Some(stats);
                }
            }
            ColumnType::Categorical => {
                let ranked = rank_categories(frequencies);
                profile.mode = ranked.first().map(|c| c.value.clone());
                profile.top_categories = Some(
                    ranked
                        .into_iter()
                        .take(self.config.top_categories)
                        .collect(),
                );
            }
            ColumnType::Temporal => {
                profile.temporal_stats = temporal_stats(&non_null);
            }
            ColumnType::Boolean | ColumnType::Unknown => {}
        }

        profile
    }

    /// Values outside the Tukey fences, in input order.
    pub fn outliers(&self, values: &[f64], stats: &NumericStats) -> Vec<f64> {
        values
            .iter()
            .copied()
            .filter(|v| stats.is_outlier_iqr(*v, self.config.iqr_multiplier))
            .collect()
    }
}

impl Default for StatisticsEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Descriptive statistics over a slice of finite numbers.
///
/// Quantiles are nearest rank with no interpolation: `median = sorted[n/2]`,
/// `q1 = sorted[floor(n*0.25)]`, `q3 = sorted[floor(n*0.75)]`. Variance is the
/// population variance. Returns `None` for an empty slice.
pub fn numeric_stats(values: &[f64]) -> Option<NumericStats> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let n = sorted.len();
    let nf = n as f64;
    let mean = sorted.iter().sum::<f64>() / nf;
    let variance = sorted.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / nf;
    let std = variance.sqrt();

    let (skewness, kurtosis) = if std == 0.0 {
        (0.0, 0.0)
    } else {
        let (m3, m4) = sorted.iter().fold((0.0, 0.0), |(m3, m4), x| {
            let z = (x - mean) / std;
            (m3 + z.powi(3), m4 + z.powi(4))
        });
        (m3 / nf, m4 / nf - 3.0)
    };

    let rank = |p: f64| sorted[((nf * p).floor() as usize).min(n - 1)];

    Some(NumericStats {
        mean,
        median: sorted[n / 2],
        std,
        min: sorted[0],
        max: sorted[n - 1],
        q1: rank(0.25),
        q3: rank(0.75),
        skewness,
        kurtosis,
    })
}

/// Sort frequencies by count descending; equal counts keep first-seen order.
pub fn rank_categories(frequencies: IndexMap<String, usize>) -> Vec<CategoryCount> {
    let mut ranked: Vec<CategoryCount> = frequencies
        .into_iter()
        .map(|(value, count)| CategoryCount { value, count })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked
}

fn temporal_stats(values: &[&CellValue]) -> Option<TemporalStats> {
    let mut dates = values.iter().filter_map(|v| v.as_date());
    let first = dates.next()?;
    let (min, max) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));

    Some(TemporalStats {
        min: min.format("%Y-%m-%d").to_string(),
        max: max.format("%Y-%m-%d").to_string(),
        span_days: (max - min).num_days(),
    })
}
