//! Input handling: cell coercion, dataset snapshots, file loading and row
//! sources.

mod cell;
mod fetch;
mod parser;
mod source;

pub use cell::{is_null_token, parse_date, CellValue};
pub use fetch::{DirectorySource, HttpRowSource, RowSource};
pub use parser::{parse_json, records_from_json, Parser, ParserConfig};
pub use source::{Dataset, Record, SourceMetadata};
