//! Core type definitions for column classification.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Semantic type inferred for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// Every value is a finite number.
    Numeric,
    /// Discrete labels or free text.
    Categorical,
    /// Calendar dates, or a column whose name says it holds them.
    Temporal,
    /// Two-valued yes/no style column.
    Boolean,
    /// No non-null values to judge from.
    #[default]
    Unknown,
}

impl ColumnType {
    /// Returns true if this type is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Numeric)
    }

    /// Returns true if this type is categorical.
    pub fn is_categorical(&self) -> bool {
        matches!(self, ColumnType::Categorical)
    }

    /// Returns true if this type is temporal.
    pub fn is_temporal(&self) -> bool {
        matches!(self, ColumnType::Temporal)
    }

    /// Lowercase label.
    pub fn label(&self) -> &'static str {
        match self {
            ColumnType::Numeric => "numeric",
            ColumnType::Categorical => "categorical",
            ColumnType::Temporal => "temporal",
            ColumnType::Boolean => "boolean",
            ColumnType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
