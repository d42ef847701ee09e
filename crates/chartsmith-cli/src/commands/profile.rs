//! Profile command - show per-column profiles.

use std::path::PathBuf;

use colored::Colorize;

use super::{build_engine, load_dataset, CommandResult};

pub fn run(file: PathBuf, json: bool, config: Option<PathBuf>) -> CommandResult {
    let dataset = load_dataset(&file)?;
    let result = build_engine(config)?.analyze(&dataset);

    if json {
        println!("{}", serde_json::to_string_pretty(&result.profiles)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Profiles for".cyan().bold(),
        file.display().to_string().white()
    );

    for profile in &result.profiles {
        println!();
        println!(
            "{} {}",
            profile.name.white().bold(),
            format!("({})", profile.column_type.label()).dimmed()
        );
        println!(
            "  count {}  null {} ({:.1}%)  unique {} ({:.1}%)",
            profile.count,
            profile.null_count,
            profile.null_percentage,
            profile.unique_count,
            profile.unique_percentage
        );

        if let Some(stats) = &profile.numeric_stats {
            println!(
                "  min {:.2}  q1 {:.2}  median {:.2}  q3 {:.2}  max {:.2}",
                stats.min, stats.q1, stats.median, stats.q3, stats.max
            );
            println!(
                "  mean {:.2}  std {:.2}  skew {:.2}  kurtosis {:.2}",
                stats.mean, stats.std, stats.skewness, stats.kurtosis
            );
        }
        if let Some(outliers) = profile.outliers.as_ref().filter(|o| !o.is_empty()) {
            println!("  {} {:?}", "outliers".yellow(), outliers);
        }
        if let Some(categories) = &profile.top_categories {
            let top: Vec<String> = categories
                .iter()
                .map(|c| format!("{} ({})", c.value, c.count))
                .collect();
            println!("  top {}", top.join(", "));
        }
        if let Some(range) = &profile.temporal_stats {
            println!(
                "  {} to {} ({} days)",
                range.min, range.max, range.span_days
            );
        }
    }

    Ok(())
}
