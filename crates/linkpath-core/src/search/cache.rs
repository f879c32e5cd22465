//! Shared expansion cache
//!
//! Memoizes oracle results per node for both search directions. No lock is held
//! across an oracle call: two threads missing on the same node may both ask the
//! oracle, and whichever inserts first keeps the entry (insert-if-absent).

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use serde::Serialize;
use tracing::debug;

use crate::oracle::{ExpansionError, ExpansionOracle, NeighborSet};

/// Cached outcome of expanding one node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheEntry {
    Resolved(Arc<NeighborSet>),
    /// The oracle reported the node does not exist
    Unknown,
    /// The oracle failed transiently or could not extract mentions
    Failed,
}

impl CacheEntry {
    fn from_expansion(result: Result<NeighborSet, ExpansionError>) -> Self {
        match result {
            Ok(neighbors) => CacheEntry::Resolved(Arc::new(neighbors)),
            Err(e) if e.is_unknown_node() => CacheEntry::Unknown,
            Err(_) => CacheEntry::Failed,
        }
    }

    /// Neighbors as seen by the search; failures expand to nothing
    pub fn neighbors(&self) -> Arc<NeighborSet> {
        match self {
            CacheEntry::Resolved(neighbors) => Arc::clone(neighbors),
            CacheEntry::Unknown | CacheEntry::Failed => Arc::new(NeighborSet::new()),
        }
    }

    pub fn is_failure(&self) -> bool {
        !matches!(self, CacheEntry::Resolved(_))
    }
}

/// Hit/miss counters. All operations are atomic and lock-free.
#[derive(Debug, Default)]
pub struct CacheMetrics {
    hits: AtomicU64,
    misses: AtomicU64,
    failures: AtomicU64,
}

impl CacheMetrics {
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Lookups that called the oracle
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Oracle calls that returned an error
    pub fn failures(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }

    /// Hit rate as a percentage (0.0-100.0)
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits();
        let total = hits + self.misses();
        if total == 0 {
            0.0
        } else {
            (hits as f64 / total as f64) * 100.0
        }
    }

    pub fn snapshot(&self) -> CacheSnapshot {
        CacheSnapshot {
            hits: self.hits(),
            misses: self.misses(),
            failures: self.failures(),
        }
    }

    /// Counters accumulated since `earlier`
    pub fn since(&self, earlier: &CacheSnapshot) -> CacheSnapshot {
        let now = self.snapshot();
        CacheSnapshot {
            hits: now.hits.saturating_sub(earlier.hits),
            misses: now.misses.saturating_sub(earlier.misses),
            failures: now.failures.saturating_sub(earlier.failures),
        }
    }
}

/// Point-in-time copy of [`CacheMetrics`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheSnapshot {
    pub hits: u64,
    pub misses: u64,
    pub failures: u64,
}

pub struct ExpansionCache {
    oracle: Arc<dyn ExpansionOracle>,
    entries: DashMap<String, CacheEntry>,
    metrics: CacheMetrics,
}

impl ExpansionCache {
    pub fn new(oracle: Arc<dyn ExpansionOracle>) -> Self {
        Self {
            oracle,
            entries: DashMap::new(),
            metrics: CacheMetrics::default(),
        }
    }

    pub fn from_oracle(oracle: impl ExpansionOracle + 'static) -> Self {
        Self::new(Arc::new(oracle))
    }

    /// Neighbors of `node`, asking the oracle on a miss.
    ///
    /// Oracle failures resolve to an empty set and are not retried while the
    /// entry stays cached.
    pub fn get_or_compute(&self, node: &str) -> Arc<NeighborSet> {
        if let Some(entry) = self.entries.get(node) {
            self.metrics.hits.fetch_add(1, Ordering::Relaxed);
            return entry.neighbors();
        }

        self.metrics.misses.fetch_add(1, Ordering::Relaxed);
        let result = self.oracle.expand(node);
        if let Err(e) = &result {
            self.metrics.failures.fetch_add(1, Ordering::Relaxed);
            debug!(node, error = %e, "expansion_failed");
        }

        let computed = CacheEntry::from_expansion(result);
        self.entries
            .entry(node.to_string())
            .or_insert(computed)
            .neighbors()
    }

    pub fn entry(&self, node: &str) -> Option<CacheEntry> {
        self.entries.get(node).map(|entry| entry.clone())
    }

    pub fn contains(&self, node: &str) -> bool {
        self.entries.contains_key(node)
    }

    /// Drop `Failed` entries so a later search asks the oracle again.
    /// Returns how many entries were dropped.
    pub fn evict_failures(&self) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| !matches!(entry, CacheEntry::Failed));
        before.saturating_sub(self.entries.len())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn metrics(&self) -> &CacheMetrics {
        &self.metrics
    }
}

impl std::fmt::Debug for ExpansionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpansionCache")
            .field("entries", &self.entries.len())
            .field("metrics", &self.metrics)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::AdjacencyOracle;
    use std::sync::atomic::AtomicUsize;

    fn cache_for(edges: &[(&str, &str)]) -> (Arc<AdjacencyOracle>, ExpansionCache) {
        let oracle = Arc::new(AdjacencyOracle::from_edges(edges.iter().copied()));
        let cache = ExpansionCache::new(oracle.clone());
        (oracle, cache)
    }

    #[test]
    fn test_hit_returns_same_neighbors_without_oracle_call() {
        let (oracle, cache) = cache_for(&[("A", "B"), ("A", "C")]);

        let first = cache.get_or_compute("A");
        let second = cache.get_or_compute("A");

        assert_eq!(first, second);
        assert_eq!(oracle.call_count(), 1);
        assert_eq!(cache.metrics().hits(), 1);
        assert_eq!(cache.metrics().misses(), 1);
        assert_eq!(cache.metrics().hit_rate(), 50.0);
    }

    #[test]
    fn test_unknown_node_resolves_to_empty_and_is_kept() {
        let (oracle, cache) = cache_for(&[("A", "B")]);

        assert!(cache.get_or_compute("Nobody").is_empty());
        assert_eq!(cache.entry("Nobody"), Some(CacheEntry::Unknown));
        assert_eq!(cache.evict_failures(), 0);

        assert!(cache.get_or_compute("Nobody").is_empty());
        assert_eq!(oracle.call_count(), 1);
        assert_eq!(cache.metrics().failures(), 1);
    }

    #[test]
    fn test_transient_failure_is_not_retried_until_evicted() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let cache = ExpansionCache::from_oracle(
            move |node: &str| -> Result<NeighborSet, ExpansionError> {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(ExpansionError::transient(node, "connection reset"))
            },
        );

        assert!(cache.get_or_compute("A").is_empty());
        assert!(cache.get_or_compute("A").is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(cache.entry("A").unwrap().is_failure());

        assert_eq!(cache.evict_failures(), 1);
        assert!(!cache.contains("A"));
        cache.get_or_compute("A");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_concurrent_misses_converge_on_one_entry() {
        let (_, cache) = cache_for(&[("A", "B"), ("A", "C"), ("B", "C")]);
        let expected = cache_for(&[("A", "B"), ("A", "C")]).1.get_or_compute("A");

        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    assert_eq!(cache.get_or_compute("A"), expected);
                });
            }
        });

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.entry("A"), Some(CacheEntry::Resolved(expected)));
        assert_eq!(cache.metrics().hits() + cache.metrics().misses(), 8);
    }

    #[test]
    fn test_since_reports_delta() {
        let (_, cache) = cache_for(&[("A", "B")]);
        cache.get_or_compute("A");
        let before = cache.metrics().snapshot();
        cache.get_or_compute("A");
        cache.get_or_compute("B");

        let delta = cache.metrics().since(&before);
        assert_eq!(delta.hits, 1);
        assert_eq!(delta.misses, 1);
        assert_eq!(delta.failures, 0);
    }

    #[test]
    fn test_clear() {
        let (_, cache) = cache_for(&[("A", "B")]);
        cache.get_or_compute("A");
        assert!(!cache.is_empty());
        cache.clear();
        assert!(cache.is_empty());
    }
}
