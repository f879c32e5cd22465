//! Linkpath Core Library
//!
//! Concurrent bidirectional breadth-first search over graphs whose edges are
//! discovered lazily through an expansion oracle.

pub mod config;
pub mod error;
pub mod logging;
pub mod oracle;
pub mod search;

pub use config::{LinkpathConfig, SearchConfig, SearchMode};
pub use error::{LinkpathError, Result};
pub use oracle::{ExpansionError, ExpansionOracle, NeighborSet};
pub use search::{find_path, BidirectionalSearch, CancelToken, NodePath, SearchOutcome};
