//! In-memory adjacency oracle
//!
//! Backs the implicit graph with a fixed adjacency list. Graph files are JSON or
//! TOML maps from node name to the names it mentions:
//!
//! ```json
//! { "A": ["B", "C"], "B": ["D"] }
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{ExpansionError, ExpansionOracle, NeighborSet};
use crate::error::{LinkpathError, Result};

#[derive(Debug, Default)]
pub struct AdjacencyOracle {
    edges: HashMap<String, NeighborSet>,
    calls: AtomicUsize,
}

impl AdjacencyOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(from, to)` pairs. Both endpoints become known nodes.
    pub fn from_edges<I, A, B>(edges: I) -> Self
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<String>,
        B: Into<String>,
    {
        let mut oracle = Self::new();
        for (from, to) in edges {
            oracle.add_edge(from, to);
        }
        oracle
    }

    /// Add a directed mention `from -> to`
    pub fn add_edge(&mut self, from: impl Into<String>, to: impl Into<String>) {
        let to = to.into();
        self.edges.entry(to.clone()).or_default();
        self.edges.entry(from.into()).or_default().insert(to);
    }

    /// Register a node without outbound mentions
    pub fn add_node(&mut self, node: impl Into<String>) {
        self.edges.entry(node.into()).or_default();
    }

    /// Make every mention mutual
    pub fn symmetric(mut self) -> Self {
        let reversed: Vec<(String, String)> = self
            .edges
            .iter()
            .flat_map(|(from, tos)| tos.iter().map(move |to| (to.clone(), from.clone())))
            .collect();
        for (from, to) in reversed {
            self.add_edge(from, to);
        }
        self
    }

    /// Load a graph file; `.toml` files are parsed as TOML, everything else as JSON
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                LinkpathError::not_found("graph file", path.display())
            } else {
                LinkpathError::Io(e)
            }
        })?;

        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        let adjacency: BTreeMap<String, Vec<String>> = if is_toml {
            toml::from_str(&content).map_err(|e| LinkpathError::invalid_graph(path, e))?
        } else {
            serde_json::from_str(&content).map_err(|e| LinkpathError::invalid_graph(path, e))?
        };

        let mut oracle = Self::new();
        for (node, neighbors) in adjacency {
            oracle.add_node(node.clone());
            for neighbor in neighbors {
                oracle.add_edge(node.clone(), neighbor);
            }
        }

        tracing::debug!(path = %path.display(), nodes = oracle.node_count(), "graph_loaded");
        Ok(oracle)
    }

    pub fn node_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of `expand` calls served so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl ExpansionOracle for AdjacencyOracle {
    fn expand(&self, node: &str) -> std::result::Result<NeighborSet, ExpansionError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.edges
            .get(node)
            .cloned()
            .ok_or_else(|| ExpansionError::unknown(node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_from_edges_registers_both_endpoints() {
        let oracle = AdjacencyOracle::from_edges([("A", "B")]);
        assert_eq!(oracle.node_count(), 2);
        assert!(oracle.expand("B").unwrap().is_empty());
        assert!(oracle.expand("C").unwrap_err().is_unknown_node());
        assert_eq!(oracle.call_count(), 2);
    }

    #[test]
    fn test_symmetric_adds_reverse_mentions() {
        let oracle = AdjacencyOracle::from_edges([("A", "B"), ("B", "C")]).symmetric();
        let b = oracle.expand("B").unwrap();
        assert!(b.contains("A"));
        assert!(b.contains("C"));
        assert!(oracle.expand("C").unwrap().contains("B"));
    }

    #[test]
    fn test_load_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("graph.json");
        fs::write(&path, r#"{"A": ["B", "C"], "B": ["D"]}"#).unwrap();

        let oracle = AdjacencyOracle::load(&path).unwrap();
        assert_eq!(oracle.node_count(), 4);
        let a = oracle.expand("A").unwrap();
        assert_eq!(a.into_iter().collect::<Vec<_>>(), vec!["B", "C"]);
    }

    #[test]
    fn test_load_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("graph.toml");
        fs::write(&path, "\"Ada Lovelace\" = [\"Charles Babbage\"]\n").unwrap();

        let oracle = AdjacencyOracle::load(&path).unwrap();
        assert!(oracle
            .expand("Ada Lovelace")
            .unwrap()
            .contains("Charles Babbage"));
    }

    #[test]
    fn test_load_invalid_graph() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("graph.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        let err = AdjacencyOracle::load(&path).unwrap_err();
        assert!(matches!(err, LinkpathError::InvalidGraph { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let err = AdjacencyOracle::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, LinkpathError::NotFound { .. }));
    }
}
