//! Rule-based chart recommendation.
//!
//! Rules fire in a fixed priority order, each only when the column types it
//! needs are present. When too few fire the list is padded with charts built
//! from synthesized rows, and those are always flagged `synthetic`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::histogram::histogram_bins;
use super::spec::{ChartRecord, ChartSize, ChartSpec, ChartType};
use crate::inference::rank_categories;
use crate::input::Record;
use crate::schema::{ColumnProfile, ColumnType};
use crate::synthesis::SampleDataSynthesizer;

const BAR_CONFIDENCE: f64 = 0.9;
const LINE_CONFIDENCE: f64 = 0.8;
const PIE_CONFIDENCE: f64 = 0.75;
const SCATTER_CONFIDENCE: f64 = 0.7;
const HISTOGRAM_CONFIDENCE: f64 = 0.8;
const FALLBACK_CONFIDENCE: f64 = 0.3;

/// Order in which fallback chart types are tried.
const FALLBACK_ORDER: [ChartType; 4] = [
    ChartType::BarChart,
    ChartType::PieChart,
    ChartType::LineChart,
    ChartType::Histogram,
];

/// Limits for chart recommendation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommenderConfig {
    /// Pad with synthetic charts up to this many.
    pub min_charts: usize,
    /// Truncate to this many.
    pub max_charts: usize,
    /// Produce fallback charts for a dataset with no columns at all.
    pub synthesize_fallback: bool,
    pub bar_limit: usize,
    pub line_rows: usize,
    pub pie_limit: usize,
    pub scatter_rows: usize,
    pub histogram_bins: usize,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            min_charts: 3,
            max_charts: 4,
            synthesize_fallback: true,
            bar_limit: 10,
            line_rows: 20,
            pie_limit: 6,
            scatter_rows: 50,
            histogram_bins: 8,
        }
    }
}

/// Produces chart specifications from column profiles and rows.
pub struct ChartRecommender {
    config: RecommenderConfig,
    synthesizer: SampleDataSynthesizer,
}

impl ChartRecommender {
    /// Create a recommender with default limits.
    pub fn new() -> Self {
        Self::with_config(RecommenderConfig::default())
    }

    /// Create a recommender with custom limits.
    pub fn with_config(config: RecommenderConfig) -> Self {
        Self::with_synthesizer(config, SampleDataSynthesizer::new())
    }

    /// Create a recommender whose fallback charts use `synthesizer`.
    pub fn with_synthesizer(config: RecommenderConfig, synthesizer: SampleDataSynthesizer) -> Self {
        Self {
            config,
            synthesizer,
        }
    }

    /// Generator behind the fallback charts.
    pub fn synthesizer(&self) -> &SampleDataSynthesizer {
        &self.synthesizer
    }

    /// Recommend charts for profiled columns.
    ///
    /// `rows` may be empty. For a non-empty profile list the result always
    /// holds between `min_charts` and `max_charts` entries.
    pub fn recommend(&self, profiles: &[ColumnProfile], rows: &[Record]) -> Vec<ChartSpec> {
        if profiles.is_empty() {
            if !self.config.synthesize_fallback {
                return Vec::new();
            }
            return self.fallback_charts(&[], self.config.min_charts);
        }

        let mut charts = self.fire_rules(profiles, rows);
        charts.truncate(self.config.max_charts);

        if charts.len() < self.config.min_charts {
            let present: Vec<ChartType> = charts.iter().map(|c| c.chart_type).collect();
            let needed = self.config.min_charts - charts.len();
            debug!(fired = charts.len(), needed, "Padding with fallback charts");
            charts.extend(self.fallback_charts(&present, needed));
        }

        charts
    }

    fn fire_rules(&self, profiles: &[ColumnProfile], rows: &[Record]) -> Vec<ChartSpec> {
        let numeric: Vec<&str> = columns_of(profiles, ColumnType::Numeric);
        let categorical: Vec<&str> = columns_of(profiles, ColumnType::Categorical);

        let mut charts = Vec::new();

        if let Some(category) = categorical.first() {
            charts.push(self.bar_chart(category, numeric.first().copied(), rows));
        }
        if !numeric.is_empty() {
            charts.push(self.line_chart(&numeric, rows));
        }
        if let Some(category) = categorical.first() {
            charts.push(self.pie_chart(category, rows));
        }
        if numeric.len() >= 2 {
            charts.push(self.scatter_plot(numeric[0], numeric[1], rows));
        }
        if let Some(column) = numeric.first() {
            charts.push(self.histogram(column, rows));
        }

        charts
    }

    /// Sum of `measure` per category, or row counts when there is no measure.
    pub fn bar_chart(&self, category: &str, measure: Option<&str>, rows: &[Record]) -> ChartSpec {
        let mut totals: IndexMap<String, f64> = IndexMap::new();
        for row in rows {
            let Some(label) = label_of(row, category) else {
                continue;
            };
            let amount = match measure {
                Some(m) => match row.get(m).and_then(|v| v.as_f64()) {
                    Some(v) => v,
                    None => continue,
                },
                None => 1.0,
            };
            *totals.entry(label).or_insert(0.0) += amount;
        }

        let mut ranked: Vec<(String, f64)> = totals.into_iter().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(self.config.bar_limit);

        let value_key = derived_key("value", "total", category);
        let data = ranked
            .into_iter()
            .map(|(label, total)| {
                record([(category, Value::String(label)), (value_key, number(total))])
            })
            .collect();

        let (title, description) = match measure {
            Some(m) => (
                format!("{} by {}", m, category),
                format!(
                    "Total {} for each {}, largest first (top {})",
                    m, category, self.config.bar_limit
                ),
            ),
            None => (
                format!("Rows by {}", category),
                format!(
                    "Number of rows for each {}, largest first (top {})",
                    category, self.config.bar_limit
                ),
            ),
        };

        ChartSpec {
            chart_type: ChartType::BarChart,
            title,
            description,
            fields: vec![category.to_string(), value_key.to_string()],
            data,
            size: ChartSize::Large,
            confidence: BAR_CONFIDENCE,
            rationale: "A categorical column paired with a measure compares totals across groups."
                .to_string(),
            synthetic: false,
        }
    }

    /// First rows in their original order, plotted against the row index
    /// when only one numeric column exists.
    pub fn line_chart(&self, numeric: &[&str], rows: &[Record]) -> ChartSpec {
        let window = rows.iter().take(self.config.line_rows);

        let (x, y, data): (String, String, Vec<ChartRecord>) = match numeric {
            [x, y, ..] => (
                x.to_string(),
                y.to_string(),
                window
                    .map(|row| record([(*x, cell_json(row, x)), (*y, cell_json(row, y))]))
                    .collect(),
            ),
            [only] => {
                let index_key = derived_key("index", "row_index", only);
                (
                    index_key.to_string(),
                    only.to_string(),
                    window
                        .enumerate()
                        .map(|(i, row)| {
                            record([(index_key, Value::from(i + 1)), (*only, cell_json(row, only))])
                        })
                        .collect(),
                )
            }
            [] => ("index".to_string(), "value".to_string(), Vec::new()),
        };

        ChartSpec {
            chart_type: ChartType::LineChart,
            title: format!("{} over {}", y, x),
            description: format!("First {} rows in original order", self.config.line_rows),
            fields: vec![x, y],
            data,
            size: ChartSize::Large,
            confidence: LINE_CONFIDENCE,
            rationale: "Numeric values in row order show how a measure moves through the sequence."
                .to_string(),
            synthetic: false,
        }
    }

    /// Category frequencies.
    pub fn pie_chart(&self, category: &str, rows: &[Record]) -> ChartSpec {
        let mut frequencies: IndexMap<String, usize> = IndexMap::new();
        for label in rows.iter().filter_map(|row| label_of(row, category)) {
            *frequencies.entry(label).or_insert(0) += 1;
        }

        let count_key = derived_key("count", "frequency", category);
        let data = rank_categories(frequencies)
            .into_iter()
            .take(self.config.pie_limit)
            .map(|c| record([(category, Value::String(c.value)), (count_key, Value::from(c.count))]))
            .collect();

        ChartSpec {
            chart_type: ChartType::PieChart,
            title: format!("{} distribution", category),
            description: format!(
                "Share of rows per {} (top {})",
                category, self.config.pie_limit
            ),
            fields: vec![category.to_string(), count_key.to_string()],
            data,
            size: ChartSize::Small,
            confidence: PIE_CONFIDENCE,
            rationale: "Category frequencies show each group's share of the whole.".to_string(),
            synthetic: false,
        }
    }

    /// Unaggregated pairs from rows where both values are present.
    pub fn scatter_plot(&self, x: &str, y: &str, rows: &[Record]) -> ChartSpec {
        let data = rows
            .iter()
            .filter_map(|row| {
                let xv = row.get(x)?.as_f64()?;
                let yv = row.get(y)?.as_f64()?;
                Some(record([(x, number(xv)), (y, number(yv))]))
            })
            .take(self.config.scatter_rows)
            .collect();

        ChartSpec {
            chart_type: ChartType::ScatterPlot,
            title: format!("{} vs {}", x, y),
            description: format!(
                "Up to {} rows with both {} and {}",
                self.config.scatter_rows, x, y
            ),
            fields: vec![x.to_string(), y.to_string()],
            data,
            size: ChartSize::Medium,
            confidence: SCATTER_CONFIDENCE,
            rationale: "Plotting two numeric columns against each other exposes correlation and clusters."
                .to_string(),
            synthetic: false,
        }
    }

    /// Equal-width distribution of one numeric column.
    pub fn histogram(&self, column: &str, rows: &[Record]) -> ChartSpec {
        let values: Vec<f64> = rows
            .iter()
            .filter_map(|row| row.get(column).and_then(|v| v.as_f64()))
            .collect();

        let data = histogram_bins(&values, self.config.histogram_bins)
            .into_iter()
            .map(|bin| {
                record([
                    ("bin", Value::String(bin.label())),
                    ("start", number(bin.start)),
                    ("end", number(bin.end)),
                    ("count", Value::from(bin.count)),
                ])
            })
            .collect();

        ChartSpec {
            chart_type: ChartType::Histogram,
            title: format!("{} distribution", column),
            description: format!(
                "{} split into {} equal-width bins",
                column, self.config.histogram_bins
            ),
            fields: vec!["bin".to_string(), "count".to_string()],
            data,
            size: ChartSize::Medium,
            confidence: HISTOGRAM_CONFIDENCE,
            rationale: "Equal-width bins show the shape and spread of a numeric column.".to_string(),
            synthetic: false,
        }
    }

    /// Charts over a synthesized `category`/`value` frame, skipping types
    /// already in `present`.
    fn fallback_charts(&self, present: &[ChartType], needed: usize) -> Vec<ChartSpec> {
        if needed == 0 {
            return Vec::new();
        }

        let columns = vec!["category".to_string(), "value".to_string()];
        let sample = self.synthesizer.synthesize(&columns, usize::MAX);
        let rows = &sample.rows;

        FALLBACK_ORDER
            .iter()
            .filter(|t| !present.contains(*t))
            .take(needed)
            .map(|chart_type| {
                let mut chart = match chart_type {
                    ChartType::BarChart => self.bar_chart("category", Some("value"), rows),
                    ChartType::PieChart => self.pie_chart("category", rows),
                    ChartType::LineChart => self.line_chart(&["value"], rows),
                    _ => self.histogram("value", rows),
                };
                chart.title = format!("Sample: {}", chart.title);
                chart.confidence = FALLBACK_CONFIDENCE;
                chart.rationale =
                    "Illustrative sample data; no real columns support this chart.".to_string();
                chart.synthetic = true;
                chart
            })
            .collect()
    }
}

impl Default for ChartRecommender {
    fn default() -> Self {
        Self::new()
    }
}

fn columns_of(profiles: &[ColumnProfile], column_type: ColumnType) -> Vec<&str> {
    profiles
        .iter()
        .filter(|p| p.column_type == column_type)
        .map(|p| p.name.as_str())
        .collect()
}

fn label_of(row: &Record, column: &str) -> Option<String> {
    row.get(column)
        .filter(|v| !v.is_null())
        .map(|v| v.display_key())
}

fn cell_json(row: &Record, column: &str) -> Value {
    row.get(column).map_or(Value::Null, |v| v.to_json())
}

fn number(value: f64) -> Value {
    serde_json::Number::from_f64(value).map_or(Value::Null, Value::Number)
}

/// Key for a generated field, switching to `alternate` when the data column
/// already uses `preferred`.
fn derived_key<'a>(preferred: &'a str, alternate: &'a str, column: &str) -> &'a str {
    if preferred == column { alternate } else { preferred }
}

fn record<const N: usize>(pairs: [(&str, Value); N]) -> ChartRecord {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::{ColumnClassifier, StatisticsEngine};
    use crate::input::{CellValue, Dataset};
    use serde_json::json;

    fn analyze(columns: &[&str], rows: &[&[&str]]) -> (Vec<ColumnProfile>, Vec<Record>) {
        let dataset = Dataset::from_text_rows(
            "t",
            columns.iter().map(|c| c.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|v| v.to_string()).collect())
                .collect(),
        );
        let profiles: Vec<ColumnProfile> = dataset
            .columns
            .iter()
            .map(|c| {
                let values = dataset.column_values(c);
                let t = ColumnClassifier::new().classify_type(c, &values);
                StatisticsEngine::new().profile(c, t, &values)
            })
            .collect();
        (profiles, dataset.rows)
    }

    #[test]
    fn test_bar_sums_and_sorts() {
        let (profiles, rows) = analyze(
            &["region", "sales"],
            &[&["A", "10"], &["B", "20"], &["A", "5"]],
        );
        let charts = ChartRecommender::new().recommend(&profiles, &rows);
        let bar = &charts[0];

        assert_eq!(bar.chart_type, ChartType::BarChart);
        assert_eq!(bar.data[0]["region"], json!("B"));
        assert_eq!(bar.data[0]["value"], json!(20.0));
        assert_eq!(bar.data[1]["region"], json!("A"));
        assert_eq!(bar.data[1]["value"], json!(15.0));
    }

    #[test]
    fn test_bar_counts_without_measure() {
        let rows: Vec<Record> = ["x", "y", "x", ""]
            .iter()
            .map(|v| {
                let mut r = Record::new();
                r.insert("kind".to_string(), CellValue::from_text(v));
                r
            })
            .collect();
        let bar = ChartRecommender::new().bar_chart("kind", None, &rows);
        assert_eq!(bar.data.len(), 2);
        assert_eq!(bar.data[0]["kind"], json!("x"));
        assert_eq!(bar.data[0]["value"], json!(2.0));
        assert!(bar.fields_consistent());
    }

    #[test]
    fn test_line_keeps_row_order_and_nulls() {
        let (profiles, rows) = analyze(&["reading"], &[&["3"], &[""], &["1"]]);
        let charts = ChartRecommender::new().recommend(&profiles, &rows);
        let line = charts
            .iter()
            .find(|c| c.chart_type == ChartType::LineChart)
            .unwrap();

        assert_eq!(line.fields, vec!["index", "reading"]);
        assert_eq!(line.data[0]["index"], json!(1));
        assert_eq!(line.data[0]["reading"], json!(3.0));
        assert_eq!(line.data[1]["reading"], Value::Null);
        assert_eq!(line.data[2]["index"], json!(3));
    }

    #[test]
    fn test_bar_keeps_labels_for_value_column() {
        let (_, rows) = analyze(&["value", "n"], &[&["x", "1"], &["y", "2"], &["x", "1"]]);
        let bar = ChartRecommender::new().bar_chart("value", Some("n"), &rows);

        assert_eq!(bar.fields, vec!["value", "total"]);
        assert!(bar.fields_consistent());
        assert_eq!(bar.data[0]["value"], json!("x"));
        assert_eq!(bar.data[0]["total"], json!(2.0));
        assert_eq!(bar.data[1]["value"], json!("y"));
    }

    #[test]
    fn test_line_keeps_index_for_index_column() {
        let (_, rows) = analyze(&["index", "label"], &[&["100", "a"], &["200", "b"], &["300", "c"]]);
        let line = ChartRecommender::new().line_chart(&["index"], &rows);

        assert_eq!(line.fields, vec!["row_index", "index"]);
        assert!(line.fields_consistent());
        assert_eq!(line.data[0]["row_index"], json!(1));
        assert_eq!(line.data[0]["index"], json!(100.0));
        assert_eq!(line.data[2]["row_index"], json!(3));
    }

    #[test]
    fn test_pie_keeps_labels_for_count_column() {
        let (_, rows) = analyze(&["count"], &[&["low"], &["high"], &["low"]]);
        let pie = ChartRecommender::new().pie_chart("count", &rows);

        assert_eq!(pie.fields, vec!["count", "frequency"]);
        assert!(pie.fields_consistent());
        assert_eq!(pie.data[0]["count"], json!("low"));
        assert_eq!(pie.data[0]["frequency"], json!(2));
    }

    #[test]
    fn test_pie_top_six() {
        let labels = ["a", "b", "c", "d", "e", "f", "g", "a"];
        let rows: Vec<Vec<&str>> = labels.iter().map(|l| vec![*l]).collect();
        let row_refs: Vec<&[&str]> = rows.iter().map(|r| r.as_slice()).collect();
        let (_, rows) = analyze(&["kind"], &row_refs);

        let pie = ChartRecommender::new().pie_chart("kind", &rows);
        assert_eq!(pie.data.len(), 6);
        assert_eq!(pie.data[0]["kind"], json!("a"));
        assert_eq!(pie.data[0]["count"], json!(2));
    }

    #[test]
    fn test_scatter_skips_incomplete_rows() {
        let (_, rows) = analyze(&["x", "y"], &[&["1", "2"], &["", "3"], &["4", "5"]]);
        let scatter = ChartRecommender::new().scatter_plot("x", "y", &rows);
        assert_eq!(scatter.data.len(), 2);
        assert_eq!(scatter.data[1]["x"], json!(4.0));
    }

    #[test]
    fn test_histogram_records() {
        let raw: Vec<String> = (1..=8).map(|i| (i * 10).to_string()).collect();
        let rows: Vec<Vec<&str>> = raw.iter().map(|v| vec![v.as_str()]).collect();
        let row_refs: Vec<&[&str]> = rows.iter().map(|r| r.as_slice()).collect();
        let (_, rows) = analyze(&["amount"], &row_refs);

        let histogram = ChartRecommender::new().histogram("amount", &rows);
        assert_eq!(histogram.data.len(), 8);
        assert!(histogram.data.iter().all(|r| r["count"] == json!(1)));
        assert_eq!(histogram.data[1]["start"], json!(18.75));
    }

    #[test]
    fn test_histogram_empty_is_not_error() {
        let histogram = ChartRecommender::new().histogram("amount", &[]);
        assert!(histogram.data.is_empty());
    }

    #[test]
    fn test_truncates_to_four() {
        let (profiles, rows) = analyze(
            &["kind", "x", "y"],
            &[&["a", "1", "2"], &["b", "3", "4"], &["a", "5", "6"]],
        );
        let charts = ChartRecommender::new().recommend(&profiles, &rows);
        assert_eq!(charts.len(), 4);
        assert!(charts.iter().all(|c| !c.synthetic));
        assert_eq!(charts[3].chart_type, ChartType::ScatterPlot);
    }

    #[test]
    fn test_pads_with_synthetic_charts() {
        let (profiles, rows) = analyze(&["kind"], &[&["a"], &["b"], &["a"]]);
        let charts = ChartRecommender::new().recommend(&profiles, &rows);

        assert_eq!(charts.len(), 3);
        assert_eq!(charts[0].chart_type, ChartType::BarChart);
        assert_eq!(charts[1].chart_type, ChartType::PieChart);
        assert_eq!(charts[2].chart_type, ChartType::LineChart);
        assert!(charts[2].synthetic);
        assert_eq!(charts[2].confidence, FALLBACK_CONFIDENCE);
    }

    #[test]
    fn test_empty_columns() {
        let charts = ChartRecommender::new().recommend(&[], &[]);
        assert_eq!(charts.len(), 3);
        assert!(charts.iter().all(|c| c.synthetic && c.fields_consistent()));

        let quiet = ChartRecommender::with_config(RecommenderConfig {
            synthesize_fallback: false,
            ..RecommenderConfig::default()
        });
        assert!(quiet.recommend(&[], &[]).is_empty());
    }
}
