//! Synth command - print illustrative rows for a set of column names.

use chartsmith::synthesis::SynthesisConfig;
use chartsmith::SampleDataSynthesizer;

use super::CommandResult;

pub fn run(columns: Vec<String>, rows: usize, seed: u64) -> CommandResult {
    let columns: Vec<String> = columns
        .into_iter()
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect();
    if columns.is_empty() {
        return Err("At least one column name is required".into());
    }

    let synthesizer = SampleDataSynthesizer::with_config(SynthesisConfig {
        seed,
        ..SynthesisConfig::default()
    });
    let sample = synthesizer.synthesize(&columns, rows);

    println!("{}", serde_json::to_string_pretty(&sample)?);
    Ok(())
}
