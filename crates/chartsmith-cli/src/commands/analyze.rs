//! Analyze command - profile, score and recommend charts for a data file.

use std::path::PathBuf;

use chartsmith::{AnalysisFlag, AnalysisResult, HttpRowSource, Severity};
use colored::Colorize;
use tracing::debug;

use super::{build_engine, load_dataset, CommandResult};

pub fn run(
    file: PathBuf,
    json: bool,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
    rows_url: Option<String>,
    verbose: bool,
) -> CommandResult {
    let dataset = load_dataset(&file)?;
    let engine = build_engine(config)?;

    let result = match rows_url {
        Some(url) => {
            debug!(url = %url, "Using HTTP row source");
            let source = HttpRowSource::new(url)?;
            engine.analyze_with_source(&dataset, &source)
        }
        None => engine.analyze(&dataset),
    };

    if let Some(ref path) = output {
        std::fs::write(path, serde_json::to_string_pretty(&result)?)?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Analyzing".cyan().bold(),
        file.display().to_string().white()
    );
    println!();

    print_summary(&result, verbose);

    if let Some(path) = output {
        println!();
        println!(
            "{} {}",
            "Saved to".green().bold(),
            path.display().to_string().white()
        );
    }

    Ok(())
}

fn print_summary(result: &AnalysisResult, verbose: bool) {
    println!(
        "{} columns, quality score {}",
        result.profiles.len().to_string().white().bold(),
        score_label(result.quality.score)
    );

    if verbose {
        println!();
        println!("{}", "Columns:".yellow().bold());
        for profile in &result.profiles {
            println!(
                "  {:24} {:12} {:>5.1}% null  {} unique",
                profile.name,
                profile.column_type.label(),
                profile.null_percentage,
                profile.unique_count
            );
        }
    }

    if !result.quality.issues.is_empty() {
        println!(
            "Found {} issues ({} errors, {} warnings, {} info)",
            result.quality.issues.len().to_string().white().bold(),
            result.quality.count_at(Severity::Error).to_string().red(),
            result.quality.count_at(Severity::Warning).to_string().yellow(),
            result.quality.count_at(Severity::Info).to_string().blue()
        );
        println!();
        println!("{}", "Issues:".yellow().bold());
        for issue in &result.quality.issues {
            let tag = match issue.severity {
                Severity::Error => "error".red().bold(),
                Severity::Warning => "warning".yellow(),
                Severity::Info => "info".blue(),
            };
            if verbose {
                println!("  {:>8} [{}] {}", tag, issue.kind.label(), issue.message);
            } else {
                println!("  {:>8} {}", tag, issue.message);
            }
        }
    }

    println!();
    println!("{}", "Charts:".yellow().bold());
    for chart in &result.charts {
        let marker = if chart.synthetic {
            " (sample data)".dimmed().to_string()
        } else {
            String::new()
        };
        println!(
            "  {:14} {}{}",
            chart.chart_type.as_str().cyan(),
            chart.title,
            marker
        );
    }

    if !result.flags.is_empty() {
        println!();
        for flag in &result.flags {
            println!("  {} {}", "!".yellow().bold(), describe_flag(flag));
        }
    }
}

fn score_label(score: u8) -> colored::ColoredString {
    let text = format!("{}/100", score);
    match score {
        80..=100 => text.green().bold(),
        50..=79 => text.yellow().bold(),
        _ => text.red().bold(),
    }
}

fn describe_flag(flag: &AnalysisFlag) -> String {
    match flag {
        AnalysisFlag::EmptyDataset => "Dataset has no data to analyze".to_string(),
        AnalysisFlag::PartialData { declared, supplied } => {
            format!("Only {} of {} declared rows were available", supplied, declared)
        }
        AnalysisFlag::FetchFailed { reason } => format!("Row fetch failed: {}", reason),
        AnalysisFlag::SyntheticData { rows } => {
            format!("Results describe {} synthesized rows, not real data", rows)
        }
        AnalysisFlag::AmbiguousColumn { column } => {
            format!("Column '{}' has conflicting value types", column)
        }
        AnalysisFlag::FallbackCharts { count } => {
            format!("{} chart(s) use illustrative sample data", count)
        }
    }
}
