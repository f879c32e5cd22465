//! Expansion oracles
//!
//! An oracle turns a node name into the set of entity names it mentions. The
//! search engine only depends on [`ExpansionOracle`]; the concrete oracles here
//! cover an in-memory adjacency list, a directory of wiki-linked documents and a
//! MediaWiki link query.

pub mod adjacency;
pub mod documents;
pub mod mention;
pub mod wiki;

use std::collections::BTreeSet;

use thiserror::Error;

pub use adjacency::AdjacencyOracle;
pub use documents::DocumentOracle;
pub use mention::MentionFilter;
pub use wiki::WikiOracle;

/// Neighbors produced by one expansion. Ordered so that discovery order is
/// deterministic for a deterministic oracle.
pub type NeighborSet = BTreeSet<String>;

/// Reasons an oracle could not expand a node
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExpansionError {
    /// The oracle has no document for this node
    #[error("unknown node: {node}")]
    UnknownNode { node: String },

    /// Fetching the document failed; a later attempt may succeed
    #[error("transient failure expanding {node}: {reason}")]
    Transient { node: String, reason: String },

    /// The document was fetched but mentions could not be extracted from it
    #[error("failed to extract mentions for {node}: {reason}")]
    Extraction { node: String, reason: String },
}

impl ExpansionError {
    pub fn unknown(node: &str) -> Self {
        ExpansionError::UnknownNode {
            node: node.to_string(),
        }
    }

    pub fn transient(node: &str, reason: impl std::fmt::Display) -> Self {
        ExpansionError::Transient {
            node: node.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn extraction(node: &str, reason: impl std::fmt::Display) -> Self {
        ExpansionError::Extraction {
            node: node.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Whether the node is known not to exist (as opposed to a failed lookup)
    pub fn is_unknown_node(&self) -> bool {
        matches!(self, ExpansionError::UnknownNode { .. })
    }
}

/// Source of outbound edges for the implicit graph.
///
/// Implementations must be safe to call from several threads at once; the
/// search expands both directions concurrently and may fan out within a batch.
pub trait ExpansionOracle: Send + Sync {
    fn expand(&self, node: &str) -> Result<NeighborSet, ExpansionError>;
}

impl<F> ExpansionOracle for F
where
    F: Fn(&str) -> Result<NeighborSet, ExpansionError> + Send + Sync,
{
    fn expand(&self, node: &str) -> Result<NeighborSet, ExpansionError> {
        self(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_is_an_oracle() {
        let oracle = |node: &str| -> Result<NeighborSet, ExpansionError> {
            if node == "A" {
                Ok(["B".to_string()].into_iter().collect())
            } else {
                Err(ExpansionError::unknown(node))
            }
        };

        let neighbors = oracle.expand("A").unwrap();
        assert!(neighbors.contains("B"));
        assert!(oracle.expand("Z").unwrap_err().is_unknown_node());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ExpansionError::transient("A", "timed out").to_string(),
            "transient failure expanding A: timed out"
        );
        assert!(!ExpansionError::extraction("A", "bad json").is_unknown_node());
    }
}
