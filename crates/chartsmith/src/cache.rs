//! Caller-owned memoization of analysis results.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::AnalysisResult;

type CacheKey = (String, String);

/// Hit and miss counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Results keyed by `(dataset id, version token)`.
///
/// Readers share the lock. A poisoned lock is recovered rather than
/// propagated since entries are immutable once inserted.
#[derive(Debug, Default)]
pub struct AnalysisCache {
    entries: RwLock<HashMap<CacheKey, Arc<AnalysisResult>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl AnalysisCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a result.
    pub fn get(&self, dataset_id: &str, version_token: &str) -> Option<Arc<AnalysisResult>> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        let found = entries
            .get(&(dataset_id.to_string(), version_token.to_string()))
            .cloned();

        if found.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
        found
    }

    /// Store a result under its own dataset id and version token.
    pub fn insert(&self, result: AnalysisResult) -> Arc<AnalysisResult> {
        let key = (result.dataset_id.clone(), result.version_token.clone());
        let result = Arc::new(result);
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        // First writer wins so concurrent callers share one Arc
        entries.entry(key).or_insert(result).clone()
    }

    /// Drop every version of a dataset. Returns how many entries were removed.
    pub fn invalidate(&self, dataset_id: &str) -> usize {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        let before = entries.len();
        entries.retain(|(id, _), _| id != dataset_id);
        let removed = before - entries.len();
        debug!(dataset_id, removed, "Invalidated cached analyses");
        removed
    }

    /// Drop everything.
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }

    /// Number of cached results.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Whether the cache holds nothing.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Engine;
    use crate::input::Dataset;

    fn dataset(id: &str, version: &str) -> Dataset {
        Dataset::from_text_rows(
            id,
            vec!["region".to_string(), "sales".to_string()],
            vec![
                vec!["A".to_string(), "10".to_string()],
                vec!["B".to_string(), "20".to_string()],
            ],
        )
        .with_version(version)
    }

    #[test]
    fn test_hit_returns_same_arc() {
        let cache = AnalysisCache::new();
        let engine = Engine::new();
        let first = engine.analyze_cached(&dataset("d1", "v1"), &cache);
        let second = engine.analyze_cached(&dataset("d1", "v1"), &cache);

        assert!(Arc::ptr_eq(&first, &second));
        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries, 1);
    }

    #[test]
    fn test_versions_are_separate_entries() {
        let cache = AnalysisCache::new();
        let engine = Engine::new();
        engine.analyze_cached(&dataset("d1", "v1"), &cache);
        engine.analyze_cached(&dataset("d1", "v2"), &cache);
        engine.analyze_cached(&dataset("d2", "v1"), &cache);
        assert_eq!(cache.len(), 3);

        assert_eq!(cache.invalidate("d1"), 2);
        assert!(cache.get("d1", "v1").is_none());
        assert!(cache.get("d2", "v1").is_some());

        cache.clear();
        assert!(cache.is_empty());
    }
}
