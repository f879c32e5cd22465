//! Command dispatch logic for linkpath

use std::time::Instant;

use crate::cli::{Cli, Commands};
use linkpath_core::error::Result;
use tracing::debug;

mod command;

pub use command::{Command, CommandContext, NoCommand};

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    let ctx = CommandContext::load(cli, start)?;

    debug!(elapsed = ?start.elapsed(), "load_config");

    match &cli.command {
        None => NoCommand.execute(&ctx),
        Some(cmd) => cmd.execute(&ctx),
    }
}

impl Command for Commands {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Commands::Find(args) => crate::commands::find::execute(ctx, args),
            Commands::Expand(args) => crate::commands::expand::execute(ctx, args),
        }
    }
}
