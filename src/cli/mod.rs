//! CLI argument parsing for linkpath
//!
//! Supports global flags: --format, --quiet, --verbose, --log-level, --log-json, --config

pub mod args;
pub mod output;
pub mod parse;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use args::{ExpandArgs, FindArgs, OracleArgs, OracleOptions};
pub use output::OutputFormat;

/// Linkpath - find how two entities are connected through the things they mention
#[derive(Parser, Debug)]
#[command(name = "linkpath")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level or filter directive (e.g. `debug`, `linkpath_core=trace`)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Configuration file (defaults to ./linkpath.toml when present)
    #[arg(long, global = true, env = "LINKPATH_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Find a path of mentions from SOURCE to TARGET
    Find(FindArgs),

    /// List the entities a node mentions
    Expand(ExpandArgs),
}
