//! Command trait and context for dispatching commands

use std::env;
use std::path::PathBuf;
use std::time::Instant;

use crate::cli::Cli;
use linkpath_core::config::LinkpathConfig;
use linkpath_core::error::Result;

/// Read `--config` when given, otherwise `linkpath.toml` in the working
/// directory, then apply environment overrides.
pub fn load_config(cli: &Cli) -> Result<LinkpathConfig> {
    let mut config = match &cli.config {
        Some(path) => LinkpathConfig::load(path)?,
        None => {
            let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            LinkpathConfig::discover(&cwd)?
        }
    };
    config.apply_env();
    Ok(config)
}

/// Shared context for command execution
pub struct CommandContext<'a> {
    pub cli: &'a Cli,
    pub config: LinkpathConfig,
    pub start: Instant,
}

impl<'a> CommandContext<'a> {
    pub fn new(cli: &'a Cli, config: LinkpathConfig, start: Instant) -> Self {
        Self { cli, config, start }
    }

    pub fn load(cli: &'a Cli, start: Instant) -> Result<Self> {
        Ok(Self::new(cli, load_config(cli)?, start))
    }
}

/// Trait for commands that can be executed
pub trait Command {
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// No-op command (when no subcommand is provided)
pub struct NoCommand;

impl Command for NoCommand {
    fn execute(&self, _ctx: &CommandContext) -> Result<()> {
        println!("linkpath {}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("Find how two entities are connected through the things they mention.");
        println!();
        println!("Run `linkpath --help` for usage information.");
        Ok(())
    }
}
