//! Inference: column-name rules, type classification and statistics.

mod classifier;
pub mod rules;
mod statistical;

pub use classifier::{Classification, ClassifierConfig, ColumnClassifier, ValueSignals};
pub use rules::{hint_for, NameHint};
pub use statistical::{numeric_stats, rank_categories, StatisticsConfig, StatisticsEngine};
