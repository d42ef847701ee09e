//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Chartsmith: dataset profiling and chart recommendation
#[derive(Parser)]
#[command(name = "chartsmith")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output and debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Profile a data file, score its quality and recommend charts
    Analyze {
        /// Path to the data file (CSV/TSV/JSON)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,

        /// Also write the JSON result to this path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Engine configuration file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Fetch rows from <URL>/<id>/rows when the file carries none
        #[arg(long, value_name = "URL")]
        rows_url: Option<String>,
    },

    /// Show column profiles only
    Profile {
        /// Path to the data file (CSV/TSV/JSON)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Engine configuration file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Show chart recommendations only
    Charts {
        /// Path to the data file (CSV/TSV/JSON)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Engine configuration file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Generate illustrative sample rows as JSON
    Synth {
        /// Column names, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        columns: Vec<String>,

        /// Number of rows (capped at 20)
        #[arg(long, default_value = "20")]
        rows: usize,

        /// Seed for generated measures
        #[arg(long, default_value = "42")]
        seed: u64,
    },
}
