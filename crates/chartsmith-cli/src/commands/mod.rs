//! CLI command implementations.

pub mod analyze;
pub mod charts;
pub mod profile;
pub mod synth;

use std::path::{Path, PathBuf};

use chartsmith::{Dataset, Engine, EngineConfig, Parser};

type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Load a data file into a snapshot.
fn load_dataset(file: &Path) -> Result<Dataset, Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }
    let (dataset, _) = Parser::new().parse_file(file)?;
    Ok(dataset)
}

/// Build an engine from an optional configuration file.
fn build_engine(config: Option<PathBuf>) -> Result<Engine, Box<dyn std::error::Error>> {
    let config = match config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    Ok(Engine::with_config(config))
}
