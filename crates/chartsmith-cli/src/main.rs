//! Chartsmith CLI - dataset profiling and chart recommendation.

mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Analyze {
            file,
            json,
            output,
            config,
            rows_url,
        } => commands::analyze::run(file, json, output, config, rows_url, cli.verbose),

        Commands::Profile { file, json, config } => commands::profile::run(file, json, config),

        Commands::Charts { file, json, config } => commands::charts::run(file, json, config),

        Commands::Synth {
            columns,
            rows,
            seed,
        } => commands::synth::run(columns, rows, seed),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
