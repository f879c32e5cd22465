use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use super::types::NodePath;

/// One direction's record of first-discovered paths.
///
/// Written only by the owning worker, read by the opposite one. A node's path
/// never changes once inserted.
#[derive(Debug, Default)]
pub(crate) struct VisitedMap {
    paths: RwLock<HashMap<String, Arc<NodePath>>>,
}

impl VisitedMap {
    pub(crate) fn with_root(root: &str) -> Self {
        let map = Self::default();
        map.insert_if_absent(root, Arc::new(vec![root.to_string()]));
        map
    }

    /// Record `path` for `node` unless the node was already discovered.
    /// Returns whether the insert happened.
    pub(crate) fn insert_if_absent(&self, node: &str, path: Arc<NodePath>) -> bool {
        let mut paths = self.paths.write();
        if paths.contains_key(node) {
            return false;
        }
        paths.insert(node.to_string(), path);
        true
    }

    pub(crate) fn get(&self, node: &str) -> Option<Arc<NodePath>> {
        self.paths.read().get(node).cloned()
    }

    pub(crate) fn len(&self) -> usize {
        self.paths.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_discovery_wins() {
        let visited = VisitedMap::with_root("A");
        let via_b = Arc::new(vec!["A".to_string(), "B".to_string(), "D".to_string()]);
        let via_c = Arc::new(vec!["A".to_string(), "C".to_string(), "D".to_string()]);

        assert!(visited.insert_if_absent("D", via_b.clone()));
        assert!(!visited.insert_if_absent("D", via_c));
        assert_eq!(visited.get("D"), Some(via_b));
        assert_eq!(visited.len(), 2);
    }

    #[test]
    fn test_root_maps_to_itself() {
        let visited = VisitedMap::with_root("A");
        assert_eq!(visited.get("A").unwrap().as_slice(), ["A".to_string()]);
        assert!(visited.get("a").is_none());
    }
}
