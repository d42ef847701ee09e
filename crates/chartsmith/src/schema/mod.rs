//! Schema types describing classified and profiled columns.

mod profile;
mod types;

pub use profile::{CategoryCount, ColumnProfile, NumericStats, TemporalStats};
pub use types::ColumnType;
