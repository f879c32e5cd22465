use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use super::types::NodePath;

/// A published source-to-target path and the node where it was joined
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meeting {
    pub node: String,
    pub path: NodePath,
}

impl Meeting {
    /// Join a forward path (source..node) with a backward path (target..node).
    ///
    /// The backward path is reversed and its copy of the meeting node dropped,
    /// so the result runs source..target with the meeting node once.
    pub fn assemble(forward: &[String], backward: &[String]) -> Self {
        debug_assert_eq!(forward.last(), backward.last());
        let node = forward.last().cloned().unwrap_or_default();
        let path = forward
            .iter()
            .chain(backward.iter().rev().skip(1))
            .cloned()
            .collect();
        Self { node, path }
    }

    /// Whether no node appears twice in the joined path
    pub fn is_simple(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.path.len());
        self.path.iter().all(|node| seen.insert(node.as_str()))
    }
}

/// First-writer-wins slot for the found path.
///
/// The completion flag is also readable without the lock so workers can poll it
/// between expansions.
#[derive(Debug, Default)]
pub struct MeetingCoordinator {
    found: Mutex<Option<Meeting>>,
    complete: AtomicBool,
}

impl MeetingCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `meeting` if nothing was published yet. Returns whether it was kept.
    pub fn try_publish(&self, meeting: Meeting) -> bool {
        let mut found = self.found.lock();
        if self.complete.load(Ordering::Acquire) {
            return false;
        }
        *found = Some(meeting);
        self.complete.store(true, Ordering::Release);
        true
    }

    pub fn is_complete(&self) -> bool {
        self.complete.load(Ordering::Acquire)
    }

    pub fn meeting(&self) -> Option<Meeting> {
        self.found.lock().clone()
    }

    pub fn into_meeting(self) -> Option<Meeting> {
        self.found.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(nodes: &[&str]) -> Vec<String> {
        nodes.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_assemble_drops_duplicate_meeting_node() {
        let meeting = Meeting::assemble(&path(&["A", "B", "D"]), &path(&["E", "D"]));
        assert_eq!(meeting.node, "D");
        assert_eq!(meeting.path, path(&["A", "B", "D", "E"]));
    }

    #[test]
    fn test_assemble_at_target_root() {
        let meeting = Meeting::assemble(&path(&["A", "B", "E"]), &path(&["E"]));
        assert_eq!(meeting.node, "E");
        assert_eq!(meeting.path, path(&["A", "B", "E"]));
    }

    #[test]
    fn test_assemble_at_source_root() {
        let meeting = Meeting::assemble(&path(&["A"]), &path(&["E", "C", "A"]));
        assert_eq!(meeting.node, "A");
        assert_eq!(meeting.path, path(&["A", "C", "E"]));
    }

    #[test]
    fn test_is_simple() {
        assert!(Meeting::assemble(&path(&["A", "B", "D"]), &path(&["E", "D"])).is_simple());
        assert!(!Meeting::assemble(&path(&["A", "X", "D"]), &path(&["E", "X", "D"])).is_simple());
    }

    #[test]
    fn test_first_publish_wins() {
        let coordinator = MeetingCoordinator::new();
        assert!(!coordinator.is_complete());

        let first = Meeting::assemble(&path(&["A", "B"]), &path(&["C", "B"]));
        let second = Meeting::assemble(&path(&["A", "X"]), &path(&["C", "X"]));
        assert!(coordinator.try_publish(first.clone()));
        assert!(!coordinator.try_publish(second));

        assert!(coordinator.is_complete());
        assert_eq!(coordinator.into_meeting(), Some(first));
    }

    #[test]
    fn test_concurrent_publishers_keep_exactly_one() {
        let coordinator = MeetingCoordinator::new();
        let winners: usize = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|i| {
                    let coordinator = &coordinator;
                    s.spawn(move || {
                        let mid = format!("M{}", i);
                        let meeting = Meeting::assemble(
                            &["A".to_string(), mid.clone()],
                            &["Z".to_string(), mid],
                        );
                        coordinator.try_publish(meeting) as usize
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).sum()
        });

        assert_eq!(winners, 1);
        assert!(coordinator.meeting().is_some());
    }
}
