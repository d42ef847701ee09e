//! Example: Profile a data file and print chart recommendations.
//!
//! Usage:
//!   cargo run --example analyze -- <file_path>

use std::env;
use std::path::Path;

use chartsmith::{Engine, Parser};

fn main() -> chartsmith::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example analyze -- <file_path>");
        std::process::exit(1);
    }

    let path = Path::new(&args[1]);
    if !path.exists() {
        eprintln!("Error: File not found: {}", path.display());
        std::process::exit(1);
    }

    let (dataset, source) = Parser::new().parse_file(path)?;
    let result = Engine::new().analyze(&dataset);

    let separator = "=".repeat(80);
    println!("{}", separator);
    println!("Chartsmith Analysis: {}", source.file);
    println!("{}", separator);
    println!();

    println!("## Columns");
    for profile in &result.profiles {
        println!(
            "  {:<24} {:<12} {:>6} values  {:>5.1}% null",
            profile.name,
            profile.column_type.label(),
            profile.count,
            profile.null_percentage
        );
    }
    println!();

    println!("## Quality: {}/100", result.quality.score);
    for issue in &result.quality.issues {
        println!("  [{}] {}", issue.severity.label(), issue.message);
    }
    println!();

    println!("## Charts");
    for chart in &result.charts {
        println!(
            "  {:<14} {} ({} points, confidence {:.2}{})",
            chart.chart_type.as_str(),
            chart.title,
            chart.data.len(),
            chart.confidence,
            if chart.synthetic { ", sample data" } else { "" }
        );
    }

    Ok(())
}
