//! Charts command - show chart recommendations.

use std::path::PathBuf;

use colored::Colorize;

use super::{build_engine, load_dataset, CommandResult};

pub fn run(file: PathBuf, json: bool, config: Option<PathBuf>) -> CommandResult {
    let dataset = load_dataset(&file)?;
    let result = build_engine(config)?.analyze(&dataset);

    if json {
        println!("{}", serde_json::to_string_pretty(&result.charts)?);
        return Ok(());
    }

    for (idx, chart) in result.charts.iter().enumerate() {
        if idx > 0 {
            println!();
        }
        println!(
            "{}. {} {}",
            idx + 1,
            chart.title.white().bold(),
            format!("[{}]", chart.chart_type).cyan()
        );
        println!("   {}", chart.description);
        println!(
            "   fields: {}  points: {}  confidence: {:.2}",
            chart.fields.join(", "),
            chart.data.len(),
            chart.confidence
        );
        println!("   {}", chart.rationale.dimmed());
        if chart.synthetic {
            println!("   {}", "Built from sample data, not a finding".yellow());
        }
    }

    Ok(())
}
