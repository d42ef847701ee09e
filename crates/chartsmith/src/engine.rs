//! The analysis engine and its public result types.

use std::borrow::Cow;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::cache::AnalysisCache;
use crate::chart::{ChartRecommender, ChartSpec, RecommenderConfig};
use crate::error::{ChartsmithError, Result};
use crate::inference::{Classification, ClassifierConfig, ColumnClassifier, StatisticsConfig, StatisticsEngine};
use crate::input::{CellValue, Dataset, Record, RowSource};
use crate::quality::{DatasetQuality, QualityConfig, QualityScorer};
use crate::schema::ColumnProfile;
use crate::synthesis::{SampleDataSynthesizer, SynthesisConfig};

/// Configuration for every analysis stage.
///
/// Every section defaults independently, so a partial JSON file only
/// overrides what it names.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub classifier: ClassifierConfig,
    pub statistics: StatisticsConfig,
    pub quality: QualityConfig,
    pub recommender: RecommenderConfig,
    pub synthesis: SynthesisConfig,
}

impl EngineConfig {
    /// Load and validate a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ChartsmithError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values no analysis can run with.
    pub fn validate(&self) -> Result<()> {
        if self.classifier.sample_size == 0 {
            return Err(ChartsmithError::Config(
                "classifier.sample_size must be at least 1".to_string(),
            ));
        }
        if !self.statistics.iqr_multiplier.is_finite() || self.statistics.iqr_multiplier < 0.0 {
            return Err(ChartsmithError::Config(format!(
                "statistics.iqr_multiplier must be a non-negative number, got {}",
                self.statistics.iqr_multiplier
            )));
        }
        if self.quality.null_weight < 0.0 {
            return Err(ChartsmithError::Config(
                "quality.null_weight must not be negative".to_string(),
            ));
        }
        for (name, value) in [
            ("low_uniqueness_threshold", self.quality.low_uniqueness_threshold),
            ("sparse_column_threshold", self.quality.sparse_column_threshold),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(ChartsmithError::Config(format!(
                    "quality.{} must be within 0-100, got {}",
                    name, value
                )));
            }
        }
        let recommender = &self.recommender;
        if recommender.max_charts == 0 || recommender.min_charts > recommender.max_charts {
            return Err(ChartsmithError::Config(format!(
                "recommender chart bounds are invalid: min {} max {}",
                recommender.min_charts, recommender.max_charts
            )));
        }
        if recommender.histogram_bins == 0 {
            return Err(ChartsmithError::Config(
                "recommender.histogram_bins must be at least 1".to_string(),
            ));
        }
        if self.synthesis.categories.is_empty() {
            return Err(ChartsmithError::Config(
                "synthesis.categories must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Where the analyzed rows came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataOrigin {
    /// Rows arrived with the snapshot.
    Supplied,
    /// Rows came from a row source.
    Fetched,
    /// Rows were fabricated.
    Synthetic,
    /// No rows at all.
    None,
}

/// A degradation the presentation layer should disclose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisFlag {
    EmptyDataset,
    PartialData { declared: usize, supplied: usize },
    FetchFailed { reason: String },
    SyntheticData { rows: usize },
    AmbiguousColumn { column: String },
    FallbackCharts { count: usize },
}

/// Everything one analysis produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub dataset_id: String,
    pub version_token: String,
    pub profiles: Vec<ColumnProfile>,
    pub quality: DatasetQuality,
    pub charts: Vec<ChartSpec>,
    pub data_origin: DataOrigin,
    pub flags: Vec<AnalysisFlag>,
}

impl AnalysisResult {
    /// Whether the profiles and charts describe fabricated rows.
    pub fn is_synthetic(&self) -> bool {
        self.data_origin == DataOrigin::Synthetic
    }

    /// Look up a column profile by name.
    pub fn profile(&self, name: &str) -> Option<&ColumnProfile> {
        self.profiles.iter().find(|p| p.name == name)
    }
}

/// Rows resolved for one analysis.
struct ResolvedRows<'a> {
    rows: Cow<'a, [Record]>,
    origin: DataOrigin,
}

/// The profiling and recommendation engine.
///
/// Holds only configuration, so one instance can serve concurrent callers.
pub struct Engine {
    config: EngineConfig,
    classifier: ColumnClassifier,
    statistics: StatisticsEngine,
    quality: QualityScorer,
    recommender: ChartRecommender,
}

impl Engine {
    /// Create an engine with default configuration.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create an engine with custom configuration.
    pub fn with_config(config: EngineConfig) -> Self {
        let classifier = ColumnClassifier::with_config(config.classifier.clone());
        let statistics = StatisticsEngine::with_config(config.statistics.clone());
        let quality = QualityScorer::with_config(config.quality.clone());
        let recommender = ChartRecommender::with_synthesizer(
            config.recommender.clone(),
            SampleDataSynthesizer::with_config(config.synthesis.clone()),
        );
        Self {
            config,
            classifier,
            statistics,
            quality,
            recommender,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Analyze a snapshot. Missing rows are synthesized.
    pub fn analyze(&self, dataset: &Dataset) -> AnalysisResult {
        self.run(dataset, None)
    }

    /// Analyze a snapshot, asking `source` for rows when none were supplied.
    pub fn analyze_with_source(&self, dataset: &Dataset, source: &dyn RowSource) -> AnalysisResult {
        self.run(dataset, Some(source))
    }

    /// Analyze through a cache keyed by dataset id and version token.
    pub fn analyze_cached(&self, dataset: &Dataset, cache: &AnalysisCache) -> Arc<AnalysisResult> {
        let token = dataset.version_token();
        if let Some(hit) = cache.get(&dataset.id, &token) {
            debug!(dataset_id = %dataset.id, "Analysis cache hit");
            return hit;
        }
        cache.insert(self.analyze(dataset))
    }

    fn run(&self, dataset: &Dataset, source: Option<&dyn RowSource>) -> AnalysisResult {
        let version_token = dataset.version_token();
        let mut flags = Vec::new();

        if dataset.columns.is_empty() {
            flags.push(AnalysisFlag::EmptyDataset);
            let charts = self.recommender.recommend(&[], &[]);
            if !charts.is_empty() {
                flags.push(AnalysisFlag::FallbackCharts {
                    count: charts.len(),
                });
            }
            info!(dataset_id = %dataset.id, "Dataset has no columns");
            return AnalysisResult {
                dataset_id: dataset.id.clone(),
                version_token,
                profiles: Vec::new(),
                quality: DatasetQuality::default(),
                charts,
                data_origin: DataOrigin::None,
                flags,
            };
        }

        let resolved = self.resolve_rows(dataset, source, &mut flags);
        let rows: &[Record] = &resolved.rows;
        debug!(
            dataset_id = %dataset.id,
            rows = rows.len(),
            origin = ?resolved.origin,
            "Resolved rows"
        );

        let (classifications, profiles) = self.profile_columns(&dataset.columns, rows);
        for (name, classification) in dataset.columns.iter().zip(&classifications) {
            if classification.is_ambiguous() {
                flags.push(AnalysisFlag::AmbiguousColumn {
                    column: name.clone(),
                });
            }
        }

        // No observed rows leaves quality zeroed.
        let quality = if resolved.origin == DataOrigin::None {
            DatasetQuality::default()
        } else {
            self.quality.score(&profiles, &classifications)
        };

        let mut charts = self.recommender.recommend(&profiles, rows);
        let fallback = charts.iter().filter(|c| c.synthetic).count();
        if fallback > 0 {
            flags.push(AnalysisFlag::FallbackCharts { count: fallback });
        }
        if resolved.origin == DataOrigin::Synthetic {
            for chart in &mut charts {
                chart.synthetic = true;
            }
        }

        info!(
            dataset_id = %dataset.id,
            columns = profiles.len(),
            charts = charts.len(),
            score = quality.score,
            flags = flags.len(),
            "Analysis complete"
        );

        AnalysisResult {
            dataset_id: dataset.id.clone(),
            version_token,
            profiles,
            quality,
            charts,
            data_origin: resolved.origin,
            flags,
        }
    }

    fn resolve_rows<'a>(
        &self,
        dataset: &'a Dataset,
        source: Option<&dyn RowSource>,
        flags: &mut Vec<AnalysisFlag>,
    ) -> ResolvedRows<'a> {
        if dataset.has_rows() {
            if dataset.row_count > dataset.rows.len() {
                flags.push(AnalysisFlag::PartialData {
                    declared: dataset.row_count,
                    supplied: dataset.rows.len(),
                });
            }
            return ResolvedRows {
                rows: Cow::Borrowed(&dataset.rows),
                origin: DataOrigin::Supplied,
            };
        }

        if let Some(source) = source {
            match source.fetch_rows(&dataset.id) {
                Ok(rows) if !rows.is_empty() => {
                    debug!(source = source.name(), rows = rows.len(), "Fetched rows");
                    if dataset.row_count > rows.len() {
                        flags.push(AnalysisFlag::PartialData {
                            declared: dataset.row_count,
                            supplied: rows.len(),
                        });
                    }
                    return ResolvedRows {
                        rows: Cow::Owned(rows),
                        origin: DataOrigin::Fetched,
                    };
                }
                Ok(_) => {
                    warn!(source = source.name(), dataset_id = %dataset.id, "Row source returned no rows");
                    flags.push(AnalysisFlag::FetchFailed {
                        reason: format!("{} returned no rows", source.name()),
                    });
                }
                Err(e) => {
                    warn!(source = source.name(), dataset_id = %dataset.id, error = %e, "Row fetch failed");
                    flags.push(AnalysisFlag::FetchFailed {
                        reason: e.to_string(),
                    });
                }
            }
        }

        let synthesizer = self.recommender.synthesizer();
        let requested = synthesizer.row_limit(dataset.row_count);
        if requested == 0 {
            flags.push(AnalysisFlag::EmptyDataset);
            return ResolvedRows {
                rows: Cow::Owned(Vec::new()),
                origin: DataOrigin::None,
            };
        }

        let sample = synthesizer.synthesize(&dataset.columns, requested);
        flags.push(AnalysisFlag::SyntheticData {
            rows: sample.rows.len(),
        });
        ResolvedRows {
            rows: Cow::Owned(sample.rows),
            origin: DataOrigin::Synthetic,
        }
    }

    fn profile_columns(
        &self,
        columns: &[String],
        rows: &[Record],
    ) -> (Vec<Classification>, Vec<ColumnProfile>) {
        columns
            .iter()
            .map(|name| {
                let values: Vec<CellValue> = rows
                    .iter()
                    .map(|row| row.get(name).cloned().unwrap_or(CellValue::Null))
                    .collect();
                let classification = self.classifier.classify(name, &values);
                let profile = self
                    .statistics
                    .profile(name, classification.column_type, &values);
                (classification, profile)
            })
            .unzip()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
