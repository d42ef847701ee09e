//! Dataset quality issue types.

use serde::{Deserialize, Serialize};

/// Kind of issue detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Missing values anywhere in the dataset.
    MissingValues,
    /// A single column that is mostly empty.
    SparseColumn,
    /// Values outside the Tukey fences.
    Outliers,
    /// Numbers mixed with other values in one column.
    MixedTypes,
    /// Type signals disagree within one column.
    InconsistentType,
    /// A column with a single distinct value.
    ConstantColumn,
}

impl IssueKind {
    /// Get a human-readable label for the issue kind.
    pub fn label(&self) -> &'static str {
        match self {
            IssueKind::MissingValues => "Missing Values",
            IssueKind::SparseColumn => "Sparse Column",
            IssueKind::Outliers => "Outliers",
            IssueKind::MixedTypes => "Mixed Types",
            IssueKind::InconsistentType => "Inconsistent Type",
            IssueKind::ConstantColumn => "Constant Column",
        }
    }
}

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational only, may not require action.
    Info,
    /// Potential issue that should be reviewed.
    Warning,
    /// Definite issue that should be addressed.
    Error,
}

impl Severity {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Info => "Info",
            Severity::Warning => "Warning",
            Severity::Error => "Error",
        }
    }
}

/// One dataset-level issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityIssue {
    pub severity: Severity,
    pub kind: IssueKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    /// Affected column, for column-scoped issues.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
}

impl QualityIssue {
    /// Create a new issue.
    pub fn new(severity: Severity, kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            severity,
            kind,
            message: message.into(),
            count: None,
            column: None,
        }
    }

    /// Set the count.
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    /// Set the affected column.
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }
}

/// Score for a single column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnScore {
    pub column: String,
    pub score: u8,
}

/// Dataset score and issues, most severe first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetQuality {
    /// 0-100.
    pub score: u8,
    pub issues: Vec<QualityIssue>,
    pub column_scores: Vec<ColumnScore>,
}

impl DatasetQuality {
    /// Issues of one kind.
    pub fn issues_of(&self, kind: IssueKind) -> impl Iterator<Item = &QualityIssue> {
        self.issues.iter().filter(move |i| i.kind == kind)
    }

    /// Count issues at a severity.
    pub fn count_at(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }
}
