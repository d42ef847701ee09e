//! Chartsmith: dataset profiling and chart recommendation.
//!
//! Chartsmith takes a tabular dataset snapshot and derives everything a
//! presentation layer needs to describe it: a semantic type and statistical
//! profile per column, a quality score with ranked issues, and a short list
//! of chart specifications ready to render.
//!
//! # Core Principles
//!
//! - **Never fails on data**: empty, partial or mixed input degrades to
//!   best-effort output plus an [`AnalysisFlag`]
//! - **Deterministic**: the same snapshot always yields the same result
//! - **Honest about fabrication**: anything built from synthesized rows is
//!   marked `synthetic`
//!
//! # Example
//!
//! ```no_run
//! use chartsmith::{Engine, Parser};
//!
//! let (dataset, _source) = Parser::new().parse_file("sales.csv").unwrap();
//! let result = Engine::new().analyze(&dataset);
//!
//! println!("Quality: {}", result.quality.score);
//! for chart in &result.charts {
//!     println!("{}: {}", chart.chart_type, chart.title);
//! }
//! ```

pub mod cache;
pub mod chart;
pub mod error;
pub mod inference;
pub mod input;
pub mod quality;
pub mod schema;
pub mod synthesis;

mod engine;

pub use crate::engine::{AnalysisFlag, AnalysisResult, DataOrigin, Engine, EngineConfig};
pub use cache::{AnalysisCache, CacheStats};
pub use chart::{ChartRecommender, ChartSize, ChartSpec, ChartType, RecommenderConfig};
pub use error::{ChartsmithError, Result};
pub use inference::{ColumnClassifier, StatisticsEngine};
pub use input::{
    CellValue, Dataset, DirectorySource, HttpRowSource, Parser, Record, RowSource, SourceMetadata,
};
pub use quality::{DatasetQuality, IssueKind, QualityIssue, QualityScorer, Severity};
pub use schema::{ColumnProfile, ColumnType};
pub use synthesis::{SampleDataSynthesizer, SyntheticRows};
