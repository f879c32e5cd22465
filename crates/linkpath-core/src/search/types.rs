use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::{Serialize, Serializer};

use super::cache::CacheSnapshot;
use crate::config::SearchMode;

/// A path from a search root, root first
pub type NodePath = Vec<String>;

/// Which root a frontier grows from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Grows from the source
    Forward,
    /// Grows from the target
    Backward,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Forward => write!(f, "forward"),
            Direction::Backward => write!(f, "backward"),
        }
    }
}

/// Frontier worker state. Everything but `Running` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkerState {
    Running,
    /// Frontier is empty
    Exhausted,
    /// The next node sits at the depth bound
    Bounded,
    /// Completion, cancellation or deadline observed
    Stopped,
}

impl WorkerState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, WorkerState::Running)
    }
}

impl fmt::Display for WorkerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkerState::Running => write!(f, "running"),
            WorkerState::Exhausted => write!(f, "exhausted"),
            WorkerState::Bounded => write!(f, "bounded"),
            WorkerState::Stopped => write!(f, "stopped"),
        }
    }
}

/// Shared flag that asks a running search to stop.
///
/// Cloning shares the flag. Once cancelled it stays cancelled; searches started
/// afterwards stop before their first expansion.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// What one direction did during a search
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkerReport {
    pub direction: Direction,
    pub state: WorkerState,
    /// Nodes whose neighbors were requested
    pub expanded: usize,
    /// Nodes in this direction's visited map, root included
    pub discovered: usize,
    /// Deepest level discovered
    pub depth_reached: usize,
}

impl WorkerReport {
    /// Report for a direction that never had to expand anything
    pub(crate) fn idle(direction: Direction) -> Self {
        Self {
            direction,
            state: WorkerState::Stopped,
            expanded: 0,
            discovered: 1,
            depth_reached: 0,
        }
    }
}

/// Counters for one search call
#[derive(Debug, Clone, Serialize)]
pub struct SearchStats {
    pub mode: SearchMode,
    pub forward: WorkerReport,
    pub backward: WorkerReport,
    pub cache: CacheSnapshot,
    #[serde(rename = "elapsed_ms", serialize_with = "serialize_millis")]
    pub elapsed: Duration,
}

fn serialize_millis<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(elapsed.as_millis().min(u64::MAX as u128) as u64)
}

/// Result of a search call with diagnostics
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    /// Source-to-target path, if the frontiers met
    pub path: Option<NodePath>,
    /// The node where the frontiers met
    pub meeting: Option<String>,
    pub stats: SearchStats,
}

impl SearchOutcome {
    pub fn found(&self) -> bool {
        self.path.is_some()
    }

    /// Number of hops in the found path
    pub fn hops(&self) -> Option<usize> {
        self.path.as_ref().map(|p| p.len().saturating_sub(1))
    }
}
