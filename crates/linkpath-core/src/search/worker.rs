//! Frontier workers
//!
//! A worker owns one direction's FIFO frontier and is the only writer of that
//! direction's visited map. In racing mode it runs until a terminal state and
//! checks the opposite map after every discovery; in level mode the orchestrator
//! drives it one depth level at a time.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use tracing::debug;

use super::cache::ExpansionCache;
use super::coordinator::{Meeting, MeetingCoordinator};
use super::types::{CancelToken, Direction, NodePath, WorkerReport, WorkerState};
use super::visited::VisitedMap;
use crate::config::SearchConfig;
use crate::oracle::NeighborSet;

/// State shared by both directions for one search call
pub(crate) struct SearchContext<'a> {
    pub(crate) cache: &'a ExpansionCache,
    pub(crate) coordinator: &'a MeetingCoordinator,
    pub(crate) pool: &'a rayon::ThreadPool,
    pub(crate) config: &'a SearchConfig,
    pub(crate) cancel: &'a CancelToken,
    pub(crate) deadline: Option<Instant>,
}

impl SearchContext<'_> {
    /// Completion, cancellation or deadline reached
    pub(crate) fn should_stop(&self) -> bool {
        self.coordinator.is_complete()
            || self.cancel.is_cancelled()
            || self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// Expand a batch through the cache, fanning out on the expansion pool.
    /// Results come back in batch order.
    fn expand_batch(&self, batch: &[Arc<NodePath>]) -> Vec<Arc<NeighborSet>> {
        if batch.len() <= 1 || self.pool.current_num_threads() <= 1 {
            return batch
                .iter()
                .map(|path| self.cache.get_or_compute(tip(path)))
                .collect();
        }

        self.pool.install(|| {
            batch
                .par_iter()
                .map(|path| self.cache.get_or_compute(tip(path)))
                .collect()
        })
    }
}

fn tip(path: &NodePath) -> &str {
    path.last().map(String::as_str).unwrap_or_default()
}

fn depth(path: &NodePath) -> usize {
    path.len().saturating_sub(1)
}

pub(crate) struct FrontierWorker<'a> {
    direction: Direction,
    frontier: VecDeque<Arc<NodePath>>,
    own: &'a VisitedMap,
    opposite: &'a VisitedMap,
    ctx: &'a SearchContext<'a>,
    expanded: usize,
    depth_reached: usize,
}

impl<'a> FrontierWorker<'a> {
    pub(crate) fn new(
        direction: Direction,
        root: &str,
        own: &'a VisitedMap,
        opposite: &'a VisitedMap,
        ctx: &'a SearchContext<'a>,
    ) -> Self {
        let mut frontier = VecDeque::new();
        frontier.push_back(Arc::new(vec![root.to_string()]));
        Self {
            direction,
            frontier,
            own,
            opposite,
            ctx,
            expanded: 0,
            depth_reached: 0,
        }
    }

    pub(crate) fn report(&self, state: WorkerState) -> WorkerReport {
        WorkerReport {
            direction: self.direction,
            state,
            expanded: self.expanded,
            discovered: self.own.len(),
            depth_reached: self.depth_reached,
        }
    }

    /// Why the worker cannot take another node, if it cannot
    fn blocked_state(&self) -> Option<WorkerState> {
        match self.frontier.front() {
            None => Some(WorkerState::Exhausted),
            Some(head) if depth(head) >= self.ctx.config.max_depth => Some(WorkerState::Bounded),
            Some(_) => None,
        }
    }

    /// Pop up to `concurrency` expandable entries. The frontier is level-ordered,
    /// so the first entry at the depth bound ends the batch.
    fn next_batch(&mut self) -> Vec<Arc<NodePath>> {
        let limit = self.ctx.config.concurrency.max(1);
        let mut batch = Vec::with_capacity(limit);
        while batch.len() < limit {
            match self.frontier.front() {
                Some(head) if depth(head) < self.ctx.config.max_depth => {
                    if let Some(path) = self.frontier.pop_front() {
                        batch.push(path);
                    }
                }
                _ => break,
            }
        }
        batch
    }

    /// Record `neighbor` as reached through `path` unless already seen.
    /// Returns the new path when the node was new to this direction.
    fn discover(&mut self, path: &Arc<NodePath>, neighbor: &str) -> Option<Arc<NodePath>> {
        let mut extended = Vec::with_capacity(path.len() + 1);
        extended.extend(path.iter().cloned());
        extended.push(neighbor.to_string());
        let extended = Arc::new(extended);

        if !self.own.insert_if_absent(neighbor, Arc::clone(&extended)) {
            return None;
        }
        self.depth_reached = self.depth_reached.max(depth(&extended));
        self.frontier.push_back(Arc::clone(&extended));
        Some(extended)
    }

    /// Assemble and try to publish the path through `node`, whose path in this
    /// direction is `own_path`.
    fn try_meet(&self, node: &str, own_path: &NodePath) -> bool {
        let Some(other_path) = self.opposite.get(node) else {
            return false;
        };
        let meeting = match self.direction {
            Direction::Forward => Meeting::assemble(own_path, &other_path),
            Direction::Backward => Meeting::assemble(&other_path, own_path),
        };
        // A repeated node means a shorter meeting exists through it; the worker
        // that inserted that node second will publish it.
        if !meeting.is_simple() {
            return false;
        }
        let hops = meeting.path.len().saturating_sub(1);
        let published = self.ctx.coordinator.try_publish(meeting);
        if published {
            debug!(direction = %self.direction, node, hops, "meeting_published");
        }
        published
    }

    /// Racing mode: expand batches until a terminal state.
    #[tracing::instrument(skip(self), fields(direction = %self.direction))]
    pub(crate) fn run(mut self) -> WorkerReport {
        let state = loop {
            if self.ctx.should_stop() {
                break WorkerState::Stopped;
            }
            if let Some(state) = self.blocked_state() {
                break state;
            }

            let batch = self.next_batch();
            let expansions = self.ctx.expand_batch(&batch);
            self.expanded += batch.len();

            // Expansions that finished after a stop are dropped.
            if self.ctx.should_stop() {
                break WorkerState::Stopped;
            }

            'batch: for (path, neighbors) in batch.iter().zip(expansions) {
                for neighbor in neighbors.iter() {
                    let Some(extended) = self.discover(path, neighbor) else {
                        continue;
                    };
                    if self.try_meet(neighbor, &extended) || self.ctx.coordinator.is_complete() {
                        break 'batch;
                    }
                }
            }
        };

        debug!(
            direction = %self.direction,
            state = %state,
            expanded = self.expanded,
            discovered = self.own.len(),
            "worker_finished"
        );
        self.report(state)
    }

    /// Level mode: expand every node of the current depth, without looking at
    /// the opposite direction. Returns the state after the level and the nodes
    /// first discovered during it.
    pub(crate) fn expand_level(&mut self) -> (WorkerState, Vec<String>) {
        if let Some(state) = self.blocked_state() {
            return (state, Vec::new());
        }

        let level: Vec<Arc<NodePath>> = self.frontier.drain(..).collect();
        let mut discovered = Vec::new();
        for chunk in level.chunks(self.ctx.config.concurrency.max(1)) {
            if self.ctx.should_stop() {
                return (WorkerState::Stopped, discovered);
            }
            let expansions = self.ctx.expand_batch(chunk);
            self.expanded += chunk.len();
            if self.ctx.should_stop() {
                return (WorkerState::Stopped, discovered);
            }
            for (path, neighbors) in chunk.iter().zip(expansions) {
                for neighbor in neighbors.iter() {
                    if self.discover(path, neighbor).is_some() {
                        discovered.push(neighbor.clone());
                    }
                }
            }
        }

        (WorkerState::Running, discovered)
    }
}
