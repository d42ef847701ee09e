//! Chart specifications handed to a rendering layer.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One data point of a chart, field name to JSON value.
pub type ChartRecord = IndexMap<String, Value>;

/// Kind of chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartType {
    BarChart,
    LineChart,
    PieChart,
    ScatterPlot,
    Histogram,
}

impl ChartType {
    /// Wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartType::BarChart => "bar_chart",
            ChartType::LineChart => "line_chart",
            ChartType::PieChart => "pie_chart",
            ChartType::ScatterPlot => "scatter_plot",
            ChartType::Histogram => "histogram",
        }
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Suggested display size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartSize {
    Small,
    Medium,
    Large,
}

/// A recommended chart: type, data and field mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    pub chart_type: ChartType,
    pub title: String,
    pub description: String,
    /// Field names, each present in every record of `data`.
    pub fields: Vec<String>,
    pub data: Vec<ChartRecord>,
    pub size: ChartSize,
    /// Static heuristic weight in `[0, 1]`.
    pub confidence: f64,
    pub rationale: String,
    /// Data was fabricated and must not be presented as a finding.
    pub synthetic: bool,
}

impl ChartSpec {
    /// Whether the fields are distinct and every record carries each one.
    pub fn fields_consistent(&self) -> bool {
        let distinct = self
            .fields
            .iter()
            .enumerate()
            .all(|(i, f)| !self.fields[..i].contains(f));
        distinct
            && self
                .data
                .iter()
                .all(|record| self.fields.iter().all(|f| record.contains_key(f)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_names() {
        assert_eq!(
            serde_json::to_value(ChartType::ScatterPlot).unwrap(),
            json!("scatter_plot")
        );
        assert_eq!(ChartType::BarChart.to_string(), "bar_chart");
    }

    #[test]
    fn test_fields_consistent() {
        let mut record = ChartRecord::new();
        record.insert("x".to_string(), json!(1));
        let mut spec = ChartSpec {
            chart_type: ChartType::LineChart,
            title: String::new(),
            description: String::new(),
            fields: vec!["x".to_string()],
            data: vec![record],
            size: ChartSize::Large,
            confidence: 0.5,
            rationale: String::new(),
            synthetic: false,
        };
        assert!(spec.fields_consistent());

        spec.fields.push("y".to_string());
        assert!(!spec.fields_consistent());

        spec.fields = vec!["x".to_string(), "x".to_string()];
        assert!(!spec.fields_consistent());
    }
}
