//! Column type classification.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::rules::{hint_for, NameHint};
use crate::input::CellValue;
use crate::schema::ColumnType;

/// Configuration for the column classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Number of leading non-null values the type decision is made from.
    pub sample_size: usize,
    /// Largest distinct-value count a boolean column may have.
    pub max_boolean_distinct: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            sample_size: 100,
            max_boolean_distinct: 2,
        }
    }
}

/// Per-variant value counts over a whole column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueSignals {
    pub numbers: usize,
    pub dates: usize,
    pub booleans: usize,
    pub texts: usize,
    pub nulls: usize,
}

impl ValueSignals {
    /// Count the variants present in a column.
    pub fn count(values: &[CellValue]) -> Self {
        let mut signals = Self::default();
        for value in values {
            match value {
                CellValue::Null => signals.nulls += 1,
                CellValue::Number(_) => signals.numbers += 1,
                CellValue::Date(_) => signals.dates += 1,
                CellValue::Boolean(_) => signals.booleans += 1,
                CellValue::Text(_) => signals.texts += 1,
            }
        }
        signals
    }

    /// Number of non-null values.
    pub fn non_null(&self) -> usize {
        self.numbers + self.dates + self.booleans + self.texts
    }
}

/// Outcome of classifying one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Decided type.
    pub column_type: ColumnType,
    /// Hint taken from the column name.
    pub name_hint: Option<NameHint>,
    /// Variant counts over all values.
    pub signals: ValueSignals,
    /// Numbers mixed with non-numbers; resolved to categorical.
    pub mixed: bool,
    /// The sample and the full column disagree, or a temporal column only
    /// partly parses as dates.
    pub inconsistent: bool,
}

impl Classification {
    /// Whether the decision deserves a quality issue.
    pub fn is_ambiguous(&self) -> bool {
        self.mixed || self.inconsistent
    }
}

/// Infers a semantic type per column from its values and name.
pub struct ColumnClassifier {
    config: ClassifierConfig,
}

impl ColumnClassifier {
    /// Create a classifier with default settings.
    pub fn new() -> Self {
        Self::with_config(ClassifierConfig::default())
    }

    /// Create a classifier with custom settings.
    pub fn with_config(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Classify a column. `values` may contain nulls.
    pub fn classify(&self, name: &str, values: &[CellValue]) -> Classification {
        let name_hint = hint_for(name);
        let non_null: Vec<&CellValue> = values.iter().filter(|v| !v.is_null()).collect();
        let sample_len = non_null.len().min(self.config.sample_size.max(1));

        let column_type = self.decide(&non_null[..sample_len], name_hint);
        let full_type = if sample_len < non_null.len() {
            self.decide(&non_null, name_hint)
        } else {
            column_type
        };

        let signals = ValueSignals::count(values);
        let non_null_count = signals.non_null();
        let mixed = signals.numbers > 0 && signals.numbers < non_null_count;
        let partial_dates = column_type == ColumnType::Temporal
            && signals.dates > 0
            && signals.dates < non_null_count;

        Classification {
            column_type,
            name_hint,
            signals,
            mixed,
            inconsistent: full_type != column_type || partial_dates,
        }
    }

    /// Classify a column, returning only its type.
    pub fn classify_type(&self, name: &str, values: &[CellValue]) -> ColumnType {
        self.classify(name, values).column_type
    }

    fn decide(&self, values: &[&CellValue], name_hint: Option<NameHint>) -> ColumnType {
        if values.is_empty() {
            return ColumnType::Unknown;
        }

        if values.iter().all(|v| matches!(v, CellValue::Number(_))) {
            return ColumnType::Numeric;
        }

        if name_hint == Some(NameHint::Temporal)
            || values.iter().all(|v| matches!(v, CellValue::Date(_)))
        {
            return ColumnType::Temporal;
        }

        if values.iter().all(|v| v.is_boolean_like()) {
            let distinct: HashSet<String> = values
                .iter()
                .map(|v| v.display_key().to_lowercase())
                .collect();
            if distinct.len() <= self.config.max_boolean_distinct {
                return ColumnType::Boolean;
            }
        }

        ColumnType::Categorical
    }
}

impl Default for ColumnClassifier {
    fn default() -> Self {
        Self::new()
    }
}
