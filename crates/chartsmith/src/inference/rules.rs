//! Column-name heuristics.
//!
//! All substring checks on column names live in one ordered table. The first
//! rule whose pattern matches decides the hint. Both the classifier and the
//! sample synthesizer consult this table.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// What a column name suggests about its contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameHint {
    /// Dates or times.
    Temporal,
    /// A small set of labels.
    Category,
    /// A measured quantity.
    Measure,
}

/// Ordered `(pattern, hint)` pairs. Order matters: `created_date_type`
/// is temporal, not a category.
static NAME_RULES: Lazy<Vec<(Regex, NameHint)>> = Lazy::new(|| {
    vec![
        (Regex::new(r"(?i)(date|time)").unwrap(), NameHint::Temporal),
        (Regex::new(r"(?i)(category|type)").unwrap(), NameHint::Category),
        (Regex::new(r"(?i)(value|amount|score)").unwrap(), NameHint::Measure),
    ]
});

/// Look up the hint for a column name.
pub fn hint_for(name: &str) -> Option<NameHint> {
    NAME_RULES
        .iter()
        .find(|(pattern, _)| pattern.is_match(name))
        .map(|(_, hint)| *hint)
}

/// The rule table, in evaluation order, as `(pattern, hint)` pairs.
pub fn rules() -> impl Iterator<Item = (&'static str, NameHint)> {
    NAME_RULES.iter().map(|(pattern, hint)| (pattern.as_str(), *hint))
}
