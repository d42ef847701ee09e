//! Property-based tests for chartsmith.
//!
//! These tests use proptest to generate random datasets and verify that the
//! engine keeps its invariants under all conditions.
//!
//! # Testing Philosophy
//!
//! Property-based tests verify:
//! 1. **No panics**: Analysis never crashes on any input
//! 2. **Determinism**: Same snapshot always produces same output
//! 3. **Invariants**: Profile, quality and chart bounds always hold
//!
//! # Running Property Tests
//!
//! ```bash
//! # Run all property tests
//! cargo test -p chartsmith --test property_tests
//!
//! # Run with more cases (slower but more thorough)
//! PROPTEST_CASES=10000 cargo test -p chartsmith --test property_tests
//! ```

use proptest::prelude::*;

use chartsmith::chart::histogram_bins;
use chartsmith::quality::QualityScorer;
use chartsmith::{CellValue, ColumnProfile, ColumnType, Dataset, Engine, IssueKind};

// =============================================================================
// Test Strategies
// =============================================================================

/// Raw cell text: numbers, labels, dates, booleans and nulls.
fn cell_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "-?[0-9]{1,4}(\\.[0-9]{1,2})?",
        "[a-d]",
        "2024-0[1-9]-[12][0-9]",
        "(true|false)",
        "(NA|null)?",
        "[a-zA-Z ]{0,12}",
    ]
}

fn column_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("amount".to_string()),
        Just("category".to_string()),
        Just("order_date".to_string()),
        Just("region".to_string()),
        "[a-z]{1,8}",
    ]
}

/// A dataset with 0-5 uniquely named columns and 0-40 rows.
fn dataset() -> impl Strategy<Value = Dataset> {
    prop::collection::vec(column_name(), 0..5).prop_flat_map(|names| {
        let mut columns: Vec<String> = Vec::new();
        for name in names {
            if !columns.contains(&name) {
                columns.push(name);
            }
        }
        let width = columns.len();
        (
            Just(columns),
            prop::collection::vec(prop::collection::vec(cell_text(), width), 0..40),
            0usize..60,
        )
            .prop_map(|(columns, rows, declared)| {
                Dataset::from_text_rows("prop", columns, rows).with_row_count(declared)
            })
    })
}

// =============================================================================
// Engine Properties
// =============================================================================

proptest! {
    #[test]
    fn analysis_never_panics_and_is_deterministic(ds in dataset()) {
        let engine = Engine::new();
        let first = engine.analyze(&ds);
        let second = engine.analyze(&ds);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn chart_count_bounds(ds in dataset()) {
        let result = Engine::new().analyze(&ds);
        prop_assert!((3..=4).contains(&result.charts.len()));
        for chart in &result.charts {
            prop_assert!(chart.fields_consistent());
            prop_assert!((0.0..=1.0).contains(&chart.confidence));
        }
    }

    #[test]
    fn profile_invariants(ds in dataset()) {
        let result = Engine::new().analyze(&ds);
        for profile in &result.profiles {
            prop_assert!(profile.unique_count <= profile.count);
            prop_assert!((0.0..=100.0).contains(&profile.null_percentage));
            prop_assert!((0.0..=100.0).contains(&profile.unique_percentage));
            prop_assert!(profile.outliers.is_none() || profile.column_type == ColumnType::Numeric);
            prop_assert!(
                profile.top_categories.is_none() || profile.column_type == ColumnType::Categorical
            );
            if let Some(stats) = &profile.numeric_stats {
                prop_assert!(stats.min <= stats.q1);
                prop_assert!(stats.q1 <= stats.median);
                prop_assert!(stats.median <= stats.q3);
                prop_assert!(stats.q3 <= stats.max);
            }
        }
    }

    #[test]
    fn missing_issue_matches_null_counts(ds in dataset()) {
        let result = Engine::new().analyze(&ds);
        let nulls: usize = result.profiles.iter().map(|p| p.null_count).sum();
        let reported: usize = result
            .quality
            .issues_of(IssueKind::MissingValues)
            .filter_map(|i| i.count)
            .sum();
        prop_assert_eq!(nulls, reported);
        prop_assert!(result.quality.score <= 100);
    }

    #[test]
    fn score_non_increasing_in_nulls(
        count in 1usize..200,
        unique in 1usize..200,
        low in 0.0f64..100.0,
        delta in 0.0f64..100.0,
    ) {
        let unique = unique.min(count);
        let scorer = QualityScorer::new();
        let mut profile = ColumnProfile::empty("x", ColumnType::Categorical);
        profile.count = count;
        profile.unique_count = unique;
        profile.unique_percentage = unique as f64 / count as f64 * 100.0;

        profile.null_percentage = low;
        let better = scorer.column_score(&profile);
        profile.null_percentage = (low + delta).min(100.0);
        let worse = scorer.column_score(&profile);
        prop_assert!(worse <= better);
    }

    #[test]
    fn histogram_conserves_values(values in prop::collection::vec(-1e6f64..1e6, 0..200)) {
        let bins = histogram_bins(&values, 8);
        let total: usize = bins.iter().map(|b| b.count).sum();
        prop_assert_eq!(total, values.len());
        prop_assert!(bins.is_empty() || bins.len() == 8);
    }

    #[test]
    fn coercion_never_panics(raw in "\\PC{0,20}") {
        let cell = CellValue::from_text(&raw);
        if let CellValue::Number(n) = cell {
            prop_assert!(n.is_finite());
        }
    }
}
