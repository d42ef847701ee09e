//! Cell values and ingestion-time coercion.
//!
//! Every raw cell is coerced exactly once into a [`CellValue`]. Downstream
//! components match on the closed variant set instead of re-parsing strings.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Date-only formats tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y"];

/// Date-time formats whose time component is dropped.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// A single coerced cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum CellValue {
    /// Missing value.
    Null,
    /// Finite number.
    Number(f64),
    /// Boolean literal.
    Boolean(bool),
    /// Calendar date.
    Date(NaiveDate),
    /// Anything else.
    Text(String),
}

impl CellValue {
    /// Coerce a raw text cell (e.g. from a CSV file).
    pub fn from_text(raw: &str) -> Self {
        let trimmed = raw.trim();
        if is_null_token(trimmed) {
            return CellValue::Null;
        }

        if let Ok(n) = trimmed.parse::<f64>() {
            if n.is_finite() {
                return CellValue::Number(n);
            }
        }

        if trimmed.eq_ignore_ascii_case("true") {
            return CellValue::Boolean(true);
        }
        if trimmed.eq_ignore_ascii_case("false") {
            return CellValue::Boolean(false);
        }

        if let Some(date) = parse_date(trimmed) {
            return CellValue::Date(date);
        }

        CellValue::Text(trimmed.to_string())
    }

    /// Returns true for [`CellValue::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// The numeric payload, if this is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The date payload, if this is a date.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            CellValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Canonical display string, also used as the identity key for
    /// distinct-value and frequency counting.
    pub fn display_key(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Boolean(b) => b.to_string(),
            CellValue::Date(d) => d.format("%Y-%m-%d").to_string(),
            CellValue::Text(s) => s.clone(),
        }
    }

    /// Whether the value reads as a boolean literal.
    pub fn is_boolean_like(&self) -> bool {
        match self {
            CellValue::Boolean(_) => true,
            CellValue::Text(s) => matches!(
                s.to_lowercase().as_str(),
                "true" | "false" | "yes" | "no" | "y" | "n" | "t" | "f"
            ),
            _ => false,
        }
    }

    /// JSON form handed to the rendering layer.
    pub fn to_json(&self) -> Value {
        Value::from(self.clone())
    }
}

impl From<Value> for CellValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => CellValue::Null,
            Value::Bool(b) => CellValue::Boolean(b),
            Value::Number(n) => match n.as_f64() {
                Some(f) if f.is_finite() => CellValue::Number(f),
                _ => CellValue::Null,
            },
            Value::String(s) => CellValue::from_text(&s),
            other => CellValue::Text(other.to_string()),
        }
    }
}

impl From<CellValue> for Value {
    fn from(cell: CellValue) -> Self {
        match cell {
            CellValue::Null => Value::Null,
            CellValue::Number(n) => serde_json::Number::from_f64(n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            CellValue::Boolean(b) => Value::Bool(b),
            CellValue::Date(d) => Value::String(d.format("%Y-%m-%d").to_string()),
            CellValue::Text(s) => Value::String(s),
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        if n.is_finite() {
            CellValue::Number(n)
        } else {
            CellValue::Null
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::from_text(s)
    }
}

/// Check if a trimmed value represents a missing/null value.
pub fn is_null_token(trimmed: &str) -> bool {
    trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("na")
        || trimmed.eq_ignore_ascii_case("n/a")
        || trimmed.eq_ignore_ascii_case("null")
        || trimmed.eq_ignore_ascii_case("none")
        || trimmed.eq_ignore_ascii_case("nil")
        || trimmed == "."
        || trimmed == "-"
}

/// Parse a calendar date, dropping any time component.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Some(date);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|dt| dt.date())
}
