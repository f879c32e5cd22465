//! Configuration type definitions

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::LinkpathError;
use crate::oracle::MentionFilter;

/// Default per-direction depth bound (six degrees)
pub const DEFAULT_MAX_DEPTH: usize = 6;

/// Default size of the expansion pool and of each racing batch
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Default MediaWiki API endpoint
pub const DEFAULT_WIKI_ENDPOINT: &str = "https://en.wikipedia.org/w/api.php";

/// Default timeout for one MediaWiki request
pub const DEFAULT_WIKI_TIMEOUT_SECONDS: u64 = 30;

/// How the two frontiers advance relative to each other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Both directions drain one depth level, then meet at a barrier
    #[default]
    Level,
    /// Directions advance independently; the first meeting wins
    Racing,
}

impl FromStr for SearchMode {
    type Err = LinkpathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "level" => Ok(SearchMode::Level),
            "racing" => Ok(SearchMode::Racing),
            other => Err(LinkpathError::invalid_value("search mode", other)),
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchMode::Level => write!(f, "level"),
            SearchMode::Racing => write!(f, "racing"),
        }
    }
}

/// Search engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Deepest level either direction may discover
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Expansion pool size; also the racing batch size
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    #[serde(default)]
    pub mode: SearchMode,

    /// Wall-clock limit for one search (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            concurrency: DEFAULT_CONCURRENCY,
            mode: SearchMode::default(),
            timeout_ms: None,
        }
    }
}

impl SearchConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn with_mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(timeout.as_millis().min(u64::MAX as u128) as u64);
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

/// MediaWiki oracle configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WikiConfig {
    #[serde(default = "default_wiki_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_wiki_timeout")]
    pub timeout_seconds: u64,

    /// Continuation pages fetched per node at most
    #[serde(default = "default_max_link_pages")]
    pub max_link_pages: usize,

    #[serde(default)]
    pub filter: MentionFilter,
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_wiki_endpoint(),
            user_agent: default_user_agent(),
            timeout_seconds: default_wiki_timeout(),
            max_link_pages: default_max_link_pages(),
            filter: MentionFilter::default(),
        }
    }
}

/// Top-level configuration file (`linkpath.toml`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkpathConfig {
    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub wiki: WikiConfig,
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_concurrency() -> usize {
    DEFAULT_CONCURRENCY
}

fn default_wiki_endpoint() -> String {
    DEFAULT_WIKI_ENDPOINT.to_string()
}

fn default_user_agent() -> String {
    format!(
        "linkpath/{} ({})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS
    )
}

fn default_wiki_timeout() -> u64 {
    DEFAULT_WIKI_TIMEOUT_SECONDS
}

fn default_max_link_pages() -> usize {
    20
}
