//! Quality scoring over column profiles.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use super::issue::{ColumnScore, DatasetQuality, IssueKind, QualityIssue, Severity};
use crate::inference::Classification;
use crate::schema::{ColumnProfile, ColumnType};

/// Penalty weights and thresholds for quality scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityConfig {
    /// Points lost per percent of missing values.
    pub null_weight: f64,
    /// Unique percentage below which a column is penalized.
    pub low_uniqueness_threshold: f64,
    pub low_uniqueness_penalty: f64,
    /// Outlier share of non-null values above which a numeric column is penalized.
    pub outlier_ratio: f64,
    pub outlier_penalty: f64,
    /// Null percentage above which a column gets its own warning.
    pub sparse_column_threshold: f64,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            null_weight: 0.5,
            low_uniqueness_threshold: 10.0,
            low_uniqueness_penalty: 20.0,
            outlier_ratio: 0.1,
            outlier_penalty: 15.0,
            sparse_column_threshold: 50.0,
        }
    }
}

/// Turns column profiles into a dataset score and issue list.
pub struct QualityScorer {
    config: QualityConfig,
}

impl QualityScorer {
    /// Create a scorer with default weights.
    pub fn new() -> Self {
        Self::with_config(QualityConfig::default())
    }

    /// Create a scorer with custom weights.
    pub fn with_config(config: QualityConfig) -> Self {
        Self { config }
    }

    /// Score one column, 0-100.
    pub fn column_score(&self, profile: &ColumnProfile) -> u8 {
        let mut score = 100.0;
        score -= profile.null_percentage * self.config.null_weight;

        if profile.unique_percentage < self.config.low_uniqueness_threshold {
            score -= self.config.low_uniqueness_penalty;
        }

        if profile.column_type == ColumnType::Numeric
            && profile.outlier_count() as f64 > self.config.outlier_ratio * profile.count as f64
        {
            score -= self.config.outlier_penalty;
        }

        score.clamp(0.0, 100.0).round() as u8
    }

    /// Score profiles without classification signals.
    pub fn score_profiles(&self, profiles: &[ColumnProfile]) -> DatasetQuality {
        self.score(profiles, &[])
    }

    /// Score a dataset.
    ///
    /// `classifications` runs parallel to `profiles`; it may be shorter (or
    /// empty), in which case type-signal issues are only raised for the
    /// columns it covers.
    pub fn score(
        &self,
        profiles: &[ColumnProfile],
        classifications: &[Classification],
    ) -> DatasetQuality {
        if profiles.is_empty() {
            return DatasetQuality::default();
        }

        let column_scores: Vec<ColumnScore> = profiles
            .iter()
            .map(|p| ColumnScore {
                column: p.name.clone(),
                score: self.column_score(p),
            })
            .collect();

        let mean = column_scores.iter().map(|c| c.score as f64).sum::<f64>()
            / column_scores.len() as f64;

        let mut issues = self.dataset_issues(profiles);
        for (profile, classification) in profiles.iter().zip(classifications) {
            issues.extend(self.classification_issues(profile, classification));
        }

        // Stable sort keeps detection order within a severity
        issues.sort_by_key(|issue| Reverse(issue.severity));

        DatasetQuality {
            score: mean.round().clamp(0.0, 100.0) as u8,
            issues,
            column_scores,
        }
    }

    fn dataset_issues(&self, profiles: &[ColumnProfile]) -> Vec<QualityIssue> {
        let mut issues = Vec::new();

        let total_missing: usize = profiles.iter().map(|p| p.null_count).sum();
        if total_missing > 0 {
            let affected = profiles.iter().filter(|p| p.null_count > 0).count();
            issues.push(
                QualityIssue::new(
                    Severity::Warning,
                    IssueKind::MissingValues,
                    format!(
                        "{} missing values across {} column{}",
                        total_missing,
                        affected,
                        plural(affected)
                    ),
                )
                .with_count(total_missing),
            );
        }

        for profile in profiles {
            if profile.null_count > 0
                && profile.null_percentage > self.config.sparse_column_threshold
            {
                issues.push(
                    QualityIssue::new(
                        Severity::Warning,
                        IssueKind::SparseColumn,
                        format!(
                            "Column '{}' is {:.1}% empty",
                            profile.name, profile.null_percentage
                        ),
                    )
                    .with_count(profile.null_count)
                    .with_column(&profile.name),
                );
            }
        }

        let total_outliers: usize = profiles.iter().map(|p| p.outlier_count()).sum();
        if total_outliers > 0 {
            let affected = profiles.iter().filter(|p| p.outlier_count() > 0).count();
            issues.push(
                QualityIssue::new(
                    Severity::Info,
                    IssueKind::Outliers,
                    format!(
                        "{} outliers detected in {} numeric column{}",
                        total_outliers,
                        affected,
                        plural(affected)
                    ),
                )
                .with_count(total_outliers),
            );
        }

        for profile in profiles {
            if profile.unique_count == 1 && profile.count > 1 {
                issues.push(
                    QualityIssue::new(
                        Severity::Info,
                        IssueKind::ConstantColumn,
                        format!("Column '{}' holds a single distinct value", profile.name),
                    )
                    .with_count(profile.count)
                    .with_column(&profile.name),
                );
            }
        }

        issues
    }

    fn classification_issues(
        &self,
        profile: &ColumnProfile,
        classification: &Classification,
    ) -> Vec<QualityIssue> {
        let mut issues = Vec::new();
        let signals = &classification.signals;

        if classification.inconsistent {
            let detail = if classification.column_type == ColumnType::Temporal
                && signals.dates > 0
                && signals.dates < signals.non_null()
            {
                format!(
                    "only {} of {} values parse as dates",
                    signals.dates,
                    signals.non_null()
                )
            } else {
                "sampled values disagree with the rest of the column".to_string()
            };
            issues.push(
                QualityIssue::new(
                    Severity::Error,
                    IssueKind::InconsistentType,
                    format!(
                        "Column '{}' classified as {} but {}",
                        profile.name, classification.column_type, detail
                    ),
                )
                .with_count(signals.non_null())
                .with_column(&profile.name),
            );
        }

        if classification.mixed {
            issues.push(
                QualityIssue::new(
                    Severity::Warning,
                    IssueKind::MixedTypes,
                    format!(
                        "Column '{}' mixes {} numeric and {} non-numeric values",
                        profile.name,
                        signals.numbers,
                        signals.non_null() - signals.numbers
                    ),
                )
                .with_count(signals.numbers)
                .with_column(&profile.name),
            );
        }

        issues
    }
}

impl Default for QualityScorer {
    fn default() -> Self {
        Self::new()
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::{ColumnClassifier, StatisticsEngine};
    use crate::input::CellValue;

    fn profile_of(name: &str, raw: &[&str]) -> (ColumnProfile, Classification) {
        let values: Vec<CellValue> = raw.iter().map(|s| CellValue::from_text(s)).collect();
        let classification = ColumnClassifier::new().classify(name, &values);
        let profile =
            StatisticsEngine::new().profile(name, classification.column_type, &values);
        (profile, classification)
    }

    #[test]
    fn test_clean_column_scores_100() {
        let (profile, _) = profile_of("id", &["1", "2", "3", "4"]);
        assert_eq!(QualityScorer::new().column_score(&profile), 100);
    }

    #[test]
    fn test_null_and_uniqueness_penalties() {
        let scorer = QualityScorer::new();
        let mut profile = ColumnProfile::empty("x", ColumnType::Categorical);
        profile.count = 50;
        profile.null_count = 50;
        profile.null_percentage = 50.0;
        profile.unique_count = 2;
        profile.unique_percentage = 4.0;
        // 100 - 25 - 20
        assert_eq!(scorer.column_score(&profile), 55);
    }

    #[test]
    fn test_outlier_penalty() {
        let scorer = QualityScorer::new();
        let mut profile = ColumnProfile::empty("x", ColumnType::Numeric);
        profile.count = 10;
        profile.unique_count = 10;
        profile.unique_percentage = 100.0;
        profile.outliers = Some(vec![1.0, 2.0]);
        assert_eq!(scorer.column_score(&profile), 85);

        profile.outliers = Some(vec![1.0]);
        assert_eq!(scorer.column_score(&profile), 100);
    }

    #[test]
    fn test_score_clamps_at_zero() {
        let scorer = QualityScorer::with_config(QualityConfig {
            null_weight: 5.0,
            ..QualityConfig::default()
        });
        let (profile, _) = profile_of("x", &["", "", "1"]);
        assert_eq!(scorer.column_score(&profile), 0);
    }

    #[test]
    fn test_missing_values_issue_counts_every_null() {
        let (a, _) = profile_of("a", &["1", "", "3"]);
        let (b, _) = profile_of("b", &["", "", "x"]);
        let quality = QualityScorer::new().score_profiles(&[a, b]);

        let missing: Vec<_> = quality.issues_of(IssueKind::MissingValues).collect();
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].count, Some(3));
        assert_eq!(missing[0].severity, Severity::Warning);
    }

    #[test]
    fn test_issues_ordered_by_severity() {
        let (mixed, mixed_c) = profile_of("code", &["1", "2", "x", ""]);
        let (dates, dates_c) = profile_of("due_date", &["2024-01-01", "tomorrow"]);
        let (nums, nums_c) = profile_of("n", &["1", "2", "3", "4", "5", "100"]);

        let quality = QualityScorer::new().score(
            &[mixed, dates, nums],
            &[mixed_c, dates_c, nums_c],
        );

        let severities: Vec<Severity> = quality.issues.iter().map(|i| i.severity).collect();
        let mut sorted = severities.clone();
        sorted.sort_by_key(|s| Reverse(*s));
        assert_eq!(severities, sorted);
        assert_eq!(quality.issues[0].severity, Severity::Error);
        assert_eq!(quality.issues[0].column.as_deref(), Some("due_date"));
        assert_eq!(quality.issues_of(IssueKind::MixedTypes).count(), 1);
        assert_eq!(quality.issues_of(IssueKind::Outliers).count(), 1);
    }

    #[test]
    fn test_constant_column_info() {
        let (profile, _) = profile_of("status", &["ok", "ok", "ok"]);
        let quality = QualityScorer::new().score_profiles(&[profile]);
        assert_eq!(quality.issues_of(IssueKind::ConstantColumn).count(), 1);
    }

    #[test]
    fn test_empty_dataset_is_zeroed() {
        let quality = QualityScorer::new().score_profiles(&[]);
        assert_eq!(quality.score, 0);
        assert!(quality.issues.is_empty());
    }

    #[test]
    fn test_dataset_score_is_mean_of_columns() {
        let (a, _) = profile_of("a", &["1", "2", "3", "4"]);
        let (b, _) = profile_of("b", &["1", "2", "3", ""]);
        let quality = QualityScorer::new().score_profiles(&[a, b]);
        // 100 and 87.5 -> 88; mean 94
        assert_eq!(quality.column_scores[1].score, 88);
        assert_eq!(quality.score, 94);
    }
}
