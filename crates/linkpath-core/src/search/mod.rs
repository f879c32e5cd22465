//! Bidirectional breadth-first search
//!
//! Two frontier workers grow from the source and the target over an implicit
//! graph whose edges come from an [`ExpansionOracle`]. Expansions go through a
//! shared [`ExpansionCache`]; the first path joining the two frontiers is
//! published through a [`MeetingCoordinator`].
//!
//! Two scheduling modes are available (see [`SearchMode`]):
//!
//! - `Level` (default): both directions drain one depth level, join, then look
//!   for meetings among the nodes found that round. Returns a shortest path
//!   within the depth bound when the oracle is symmetric.
//! - `Racing`: each direction runs freely and checks the opposite visited map
//!   after every discovery. The first meeting wins; the path is valid but not
//!   necessarily shortest.

pub mod cache;
pub mod coordinator;
mod level;
pub mod types;
mod visited;
mod worker;


use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use crate::config::{SearchConfig, SearchMode};
use crate::error::{LinkpathError, Result};
use crate::log_cache_metrics;
use crate::oracle::ExpansionOracle;

pub use cache::{CacheEntry, CacheMetrics, CacheSnapshot, ExpansionCache};
pub use coordinator::{Meeting, MeetingCoordinator};
pub use types::{
    CancelToken, Direction, NodePath, SearchOutcome, SearchStats, WorkerReport, WorkerState,
};

use visited::VisitedMap;
use worker::{FrontierWorker, SearchContext};

/// Search engine bound to one oracle, cache and expansion pool.
///
/// The cache outlives individual calls, so repeated searches against the same
/// engine reuse earlier expansions.
pub struct BidirectionalSearch {
    cache: Arc<ExpansionCache>,
    config: SearchConfig,
    pool: rayon::ThreadPool,
    cancel: CancelToken,
}

impl BidirectionalSearch {
    pub fn new(oracle: Arc<dyn ExpansionOracle>, config: SearchConfig) -> Result<Self> {
        Self::with_cache(Arc::new(ExpansionCache::new(oracle)), config)
    }

    /// Build an engine over an existing cache, sharing it with other engines
    pub fn with_cache(cache: Arc<ExpansionCache>, config: SearchConfig) -> Result<Self> {
        config.validate()?;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.concurrency)
            .thread_name(|i| format!("linkpath-expand-{}", i))
            .build()
            .map_err(|e| LinkpathError::failed("build expansion pool", e))?;

        Ok(Self {
            cache,
            config,
            pool,
            cancel: CancelToken::new(),
        })
    }

    pub fn cache(&self) -> &Arc<ExpansionCache> {
        &self.cache
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Token that stops searches running on this engine. Cancellation is
    /// sticky: later calls return without expanding anything.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Source-to-target path, or `None` when the frontiers never met within
    /// the depth bound.
    pub fn search(&self, source: &str, target: &str) -> Option<NodePath> {
        self.search_with_outcome(source, target).path
    }

    /// Like [`search`](Self::search), with per-direction counters and timing
    #[tracing::instrument(
        skip(self),
        fields(mode = %self.config.mode, max_depth = self.config.max_depth)
    )]
    pub fn search_with_outcome(&self, source: &str, target: &str) -> SearchOutcome {
        let start = Instant::now();
        let before = self.cache.metrics().snapshot();

        if source == target {
            debug!(node = source, "source_is_target");
            return SearchOutcome {
                path: Some(vec![source.to_string()]),
                meeting: Some(source.to_string()),
                stats: SearchStats {
                    mode: self.config.mode,
                    forward: WorkerReport::idle(Direction::Forward),
                    backward: WorkerReport::idle(Direction::Backward),
                    cache: self.cache.metrics().since(&before),
                    elapsed: start.elapsed(),
                },
            };
        }

        let coordinator = MeetingCoordinator::new();
        let forward_map = VisitedMap::with_root(source);
        let backward_map = VisitedMap::with_root(target);
        let ctx = SearchContext {
            cache: &self.cache,
            coordinator: &coordinator,
            pool: &self.pool,
            config: &self.config,
            cancel: &self.cancel,
            deadline: self.config.timeout().map(|timeout| start + timeout),
        };

        let forward = FrontierWorker::new(
            Direction::Forward,
            source,
            &forward_map,
            &backward_map,
            &ctx,
        );
        let backward = FrontierWorker::new(
            Direction::Backward,
            target,
            &backward_map,
            &forward_map,
            &ctx,
        );

        let (forward_report, backward_report) = match self.config.mode {
            SearchMode::Level => {
                level::run_levels(&ctx, forward, backward, &forward_map, &backward_map)
            }
            SearchMode::Racing => run_racing(forward, backward),
        };

        let meeting = coordinator.into_meeting();
        let elapsed = start.elapsed();
        log_cache_metrics!(self.cache.metrics(), "search");
        info!(
            found = meeting.is_some(),
            hops = meeting.as_ref().map(|m| m.path.len().saturating_sub(1)),
            forward_state = %forward_report.state,
            backward_state = %backward_report.state,
            elapsed_ms = elapsed.as_millis() as u64,
            "search_finished"
        );

        let (path, meeting) = match meeting {
            Some(Meeting { node, path }) => (Some(path), Some(node)),
            None => (None, None),
        };

        SearchOutcome {
            path,
            meeting,
            stats: SearchStats {
                mode: self.config.mode,
                forward: forward_report,
                backward: backward_report,
                cache: self.cache.metrics().since(&before),
                elapsed,
            },
        }
    }
}

impl std::fmt::Debug for BidirectionalSearch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BidirectionalSearch")
            .field("config", &self.config)
            .field("cache", &self.cache)
            .field("cancelled", &self.cancel.is_cancelled())
            .finish()
    }
}

/// Run both workers on their own threads and wait for both to finish
fn run_racing(
    forward: FrontierWorker<'_>,
    backward: FrontierWorker<'_>,
) -> (WorkerReport, WorkerReport) {
    std::thread::scope(|s| {
        let forward = s.spawn(move || forward.run());
        let backward = s.spawn(move || backward.run());
        let forward = forward
            .join()
            .unwrap_or_else(|panic| std::panic::resume_unwind(panic));
        let backward = backward
            .join()
            .unwrap_or_else(|panic| std::panic::resume_unwind(panic));
        (forward, backward)
    })
}

/// One-shot search with default settings and the given depth bound
pub fn find_path(
    oracle: impl ExpansionOracle + 'static,
    source: &str,
    target: &str,
    max_depth: usize,
) -> Result<Option<NodePath>> {
    let config = SearchConfig::default().with_max_depth(max_depth);
    let engine = BidirectionalSearch::new(Arc::new(oracle), config)?;
    Ok(engine.search(source, target))
}
