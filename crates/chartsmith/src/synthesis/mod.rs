//! Illustrative sample rows for when no real data is available.
//!
//! Everything produced here is fabricated. [`SyntheticRows`] always carries
//! `synthetic: true` and anything derived from it must keep that flag so a
//! presentation layer never shows these numbers as findings.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::inference::{hint_for, NameHint};
use crate::input::{CellValue, Record};

/// Configuration for the sample synthesizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    /// Upper bound on generated rows.
    pub max_rows: usize,
    /// Seed for generated measures.
    pub seed: u64,
    /// First date of generated date columns.
    pub epoch: NaiveDate,
    /// Labels cycled through by category columns.
    pub categories: Vec<String>,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            max_rows: 20,
            seed: 42,
            epoch: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
            categories: ["Category A", "Category B", "Category C", "Category D"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Rows generated from column names alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntheticRows {
    pub columns: Vec<String>,
    pub rows: Vec<Record>,
    /// Always true.
    pub synthetic: bool,
    pub seed: u64,
}

/// Generates illustrative rows from column names.
pub struct SampleDataSynthesizer {
    config: SynthesisConfig,
}

impl SampleDataSynthesizer {
    /// Create a synthesizer with default settings.
    pub fn new() -> Self {
        Self::with_config(SynthesisConfig::default())
    }

    /// Create a synthesizer with custom settings.
    pub fn with_config(config: SynthesisConfig) -> Self {
        Self { config }
    }

    /// Number of rows that would be generated for a requested count.
    pub fn row_limit(&self, requested: usize) -> usize {
        requested.min(self.config.max_rows)
    }

    /// Generate up to `min(max_rows, requested)` rows.
    pub fn synthesize(&self, columns: &[String], requested: usize) -> SyntheticRows {
        let n = self.row_limit(requested);
        let mut rng = fastrand::Rng::with_seed(self.config.seed);
        let hints: Vec<Option<NameHint>> = columns.iter().map(|c| hint_for(c)).collect();

        let rows = (0..n)
            .map(|row_index| {
                columns
                    .iter()
                    .zip(&hints)
                    .map(|(name, hint)| (name.clone(), self.cell(*hint, row_index, &mut rng)))
                    .collect()
            })
            .collect();

        SyntheticRows {
            columns: columns.to_vec(),
            rows,
            synthetic: true,
            seed: self.config.seed,
        }
    }

    fn cell(&self, hint: Option<NameHint>, row_index: usize, rng: &mut fastrand::Rng) -> CellValue {
        match hint {
            Some(NameHint::Temporal) => {
                let date = self
                    .config
                    .epoch
                    .checked_add_days(Days::new(row_index as u64))
                    .unwrap_or(self.config.epoch);
                CellValue::Date(date)
            }
            Some(NameHint::Category) if !self.config.categories.is_empty() => {
                let labels = &self.config.categories;
                CellValue::Text(labels[row_index % labels.len()].clone())
            }
            Some(NameHint::Measure) => CellValue::Number(rng.u32(20..120) as f64),
            _ => CellValue::Text(format!("Item {}", row_index + 1)),
        }
    }
}

impl Default for SampleDataSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(cols: &[&str]) -> Vec<String> {
        cols.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_dates_advance_one_day() {
        let out = SampleDataSynthesizer::new().synthesize(&names(&["order_date"]), 3);
        let dates: Vec<NaiveDate> = out
            .rows
            .iter()
            .filter_map(|r| r["order_date"].as_date())
            .collect();
        assert_eq!(dates.len(), 3);
        assert_eq!(dates[0], NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!((dates[2] - dates[1]).num_days(), 1);
    }

    #[test]
    fn test_categories_cycle() {
        let out = SampleDataSynthesizer::new().synthesize(&names(&["type"]), 6);
        let labels: Vec<String> = out.rows.iter().map(|r| r["type"].display_key()).collect();
        assert_eq!(labels[0], "Category A");
        assert_eq!(labels[3], "Category D");
        assert_eq!(labels[4], "Category A");
    }

    #[test]
    fn test_measures_in_range_and_reproducible() {
        let synth = SampleDataSynthesizer::new();
        let a = synth.synthesize(&names(&["score"]), 20);
        let b = synth.synthesize(&names(&["score"]), 20);
        assert_eq!(a, b);
        for row in &a.rows {
            let v = row["score"].as_f64().unwrap();
            assert!((20.0..120.0).contains(&v));
            assert_eq!(v.fract(), 0.0);
        }
    }

    #[test]
    fn test_fallback_labels() {
        let out = SampleDataSynthesizer::new().synthesize(&names(&["region"]), 2);
        assert_eq!(out.rows[1]["region"], CellValue::Text("Item 2".to_string()));
    }

    #[test]
    fn test_row_cap() {
        let synth = SampleDataSynthesizer::new();
        assert_eq!(synth.synthesize(&names(&["a"]), 500).rows.len(), 20);
        assert_eq!(synth.synthesize(&names(&["a"]), 0).rows.len(), 0);
        assert!(synth.synthesize(&names(&["a"]), 1).synthetic);
    }
}
