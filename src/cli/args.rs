use std::path::PathBuf;

use clap::Args;

use super::parse::{parse_mention_filter, parse_search_mode};
use linkpath_core::config::SearchMode;
use linkpath_core::oracle::MentionFilter;

/// Where node expansions come from. Exactly one source must be given.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct OracleArgs {
    /// Adjacency graph file (JSON or TOML map of node -> mentions)
    #[arg(long, value_name = "FILE")]
    pub graph: Option<PathBuf>,

    /// Directory of markdown documents linked with [[Mention]]
    #[arg(long, value_name = "DIR")]
    pub docs: Option<PathBuf>,

    /// Query a MediaWiki API (endpoint from config or LINKPATH_WIKI_ENDPOINT)
    #[arg(long)]
    pub wiki: bool,
}

#[derive(Args, Debug, Clone)]
pub struct OracleOptions {
    /// Treat every mention in the graph file as mutual
    #[arg(long, requires = "graph")]
    pub symmetric: bool,

    /// Which wiki link titles count as mentions (all, person-name)
    #[arg(long, value_parser = parse_mention_filter, requires = "wiki")]
    pub mentions: Option<MentionFilter>,
}

#[derive(Args, Debug, Clone)]
pub struct FindArgs {
    /// Entity to start from
    pub source: String,

    /// Entity to reach
    pub target: String,

    #[command(flatten)]
    pub oracle: OracleArgs,

    #[command(flatten)]
    pub options: OracleOptions,

    /// Deepest level either side may reach
    #[arg(long, short = 'd')]
    pub max_depth: Option<usize>,

    /// Number of expansions run in parallel
    #[arg(long, short = 'j')]
    pub concurrency: Option<usize>,

    /// Scheduling mode (level, racing)
    #[arg(long, value_parser = parse_search_mode)]
    pub mode: Option<SearchMode>,

    /// Give up after this many milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Exit with an error when no path is found
    #[arg(long)]
    pub require: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ExpandArgs {
    /// Node to expand
    pub node: String,

    #[command(flatten)]
    pub oracle: OracleArgs,

    #[command(flatten)]
    pub options: OracleOptions,
}
