//! Chart specifications and the rules that recommend them.

mod histogram;
mod recommender;
mod spec;

pub use histogram::{histogram_bins, HistogramBin};
pub use recommender::{ChartRecommender, RecommenderConfig};
pub use spec::{ChartRecord, ChartSize, ChartSpec, ChartType};
