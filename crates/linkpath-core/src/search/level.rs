//! Level-synchronized rounds
//!
//! Each round both workers drain exactly one depth level, concurrently, and join
//! before anything looks across directions. Meetings are only evaluated after the
//! join, over the nodes discovered in that round, so the shortest candidate of
//! the first meeting round is the one published.

use tracing::debug;

use super::coordinator::Meeting;
use super::types::{WorkerReport, WorkerState};
use super::visited::VisitedMap;
use super::worker::{FrontierWorker, SearchContext};

/// Shortest meeting among `fresh` nodes present in both maps. Ties go to the
/// lexicographically smallest path so repeated searches agree.
pub(crate) fn best_meeting<'n>(
    forward: &VisitedMap,
    backward: &VisitedMap,
    fresh: impl IntoIterator<Item = &'n String>,
) -> Option<Meeting> {
    fresh
        .into_iter()
        .filter_map(|node| {
            let forward_path = forward.get(node)?;
            let backward_path = backward.get(node)?;
            Some(Meeting::assemble(&forward_path, &backward_path))
        })
        .min_by(|a, b| {
            a.path
                .len()
                .cmp(&b.path.len())
                .then_with(|| a.path.cmp(&b.path))
        })
}

fn settle(state: WorkerState) -> WorkerState {
    if state.is_terminal() {
        state
    } else {
        WorkerState::Stopped
    }
}

fn advance(worker: &mut FrontierWorker<'_>, state: WorkerState) -> (WorkerState, Vec<String>) {
    if state.is_terminal() {
        (state, Vec::new())
    } else {
        worker.expand_level()
    }
}

pub(crate) fn run_levels(
    ctx: &SearchContext<'_>,
    mut forward: FrontierWorker<'_>,
    mut backward: FrontierWorker<'_>,
    forward_map: &VisitedMap,
    backward_map: &VisitedMap,
) -> (WorkerReport, WorkerReport) {
    let mut forward_state = WorkerState::Running;
    let mut backward_state = WorkerState::Running;
    let mut round = 0usize;

    while !ctx.should_stop() {
        round += 1;
        let ((f_state, f_fresh), (b_state, b_fresh)) = ctx.pool.join(
            || advance(&mut forward, forward_state),
            || advance(&mut backward, backward_state),
        );
        forward_state = f_state;
        backward_state = b_state;

        debug!(
            round,
            forward_new = f_fresh.len(),
            backward_new = b_fresh.len(),
            forward_state = %forward_state,
            backward_state = %backward_state,
            "level_round"
        );

        let fresh = f_fresh.iter().chain(&b_fresh);
        if let Some(meeting) = best_meeting(forward_map, backward_map, fresh) {
            let node = meeting.node.clone();
            let hops = meeting.path.len().saturating_sub(1);
            if ctx.coordinator.try_publish(meeting) {
                debug!(round, node = %node, hops, "meeting_published");
            }
            break;
        }

        if forward_state.is_terminal() && backward_state.is_terminal() {
            break;
        }
    }

    (
        forward.report(settle(forward_state)),
        backward.report(settle(backward_state)),
    )
}
