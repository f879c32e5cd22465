//! `linkpath expand` command

use serde_json::json;

use crate::cli::{ExpandArgs, OutputFormat};
use crate::commands::dispatch::CommandContext;
use crate::commands::oracle::build_oracle;
use linkpath_core::error::{LinkpathError, Result};
use linkpath_core::oracle::ExpansionError;

pub fn execute(ctx: &CommandContext, args: &ExpandArgs) -> Result<()> {
    let oracle = build_oracle(ctx, &args.oracle, &args.options)?;

    let neighbors = oracle.expand(&args.node).map_err(|e| match e {
        ExpansionError::UnknownNode { node } => LinkpathError::not_found("node", node),
        other => LinkpathError::failed("expand node", other),
    })?;

    match ctx.cli.format {
        OutputFormat::Json => {
            let output = json!({
                "node": args.node,
                "count": neighbors.len(),
                "neighbors": neighbors,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            if neighbors.is_empty() && !ctx.cli.quiet {
                println!("{} mentions nothing", args.node);
            }
            for neighbor in &neighbors {
                println!("{}", neighbor);
            }
        }
    }
    Ok(())
}
