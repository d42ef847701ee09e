//! Data quality scoring and dataset issues.

mod issue;
mod scorer;

pub use issue::{ColumnScore, DatasetQuality, IssueKind, QualityIssue, Severity};
pub use scorer::{QualityConfig, QualityScorer};
