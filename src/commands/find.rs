//! `linkpath find` command

use serde::Serialize;
use tracing::debug;

use crate::cli::{FindArgs, OutputFormat};
use crate::commands::dispatch::CommandContext;
use crate::commands::oracle::build_oracle;
use linkpath_core::config::SearchConfig;
use linkpath_core::error::{LinkpathError, Result};
use linkpath_core::search::{BidirectionalSearch, SearchOutcome, SearchStats};

/// Machine-readable result of a find
#[derive(Debug, Serialize)]
struct FindReport<'a> {
    source: &'a str,
    target: &'a str,
    found: bool,
    path: Option<&'a [String]>,
    length: Option<usize>,
    meeting: Option<&'a str>,
    elapsed_ms: u64,
    stats: &'a SearchStats,
}

/// Configured search settings with command-line flags applied on top
fn search_config(ctx: &CommandContext, args: &FindArgs) -> SearchConfig {
    let mut config = ctx.config.search.clone();
    if let Some(depth) = args.max_depth {
        config.max_depth = depth;
    }
    if let Some(concurrency) = args.concurrency {
        config.concurrency = concurrency;
    }
    if let Some(mode) = args.mode {
        config.mode = mode;
    }
    if let Some(timeout_ms) = args.timeout_ms {
        config.timeout_ms = Some(timeout_ms);
    }
    config
}

pub fn execute(ctx: &CommandContext, args: &FindArgs) -> Result<()> {
    let config = search_config(ctx, args);
    let oracle = build_oracle(ctx, &args.oracle, &args.options)?;
    let engine = BidirectionalSearch::new(oracle, config)?;

    let cancel = engine.cancel_token();
    let _ = ctrlc::set_handler(move || {
        cancel.cancel();
    });

    debug!(elapsed = ?ctx.start.elapsed(), "search_start");
    let outcome = engine.search_with_outcome(&args.source, &args.target);

    if engine.cancel_token().is_cancelled() && !outcome.found() {
        return Err(LinkpathError::Interrupted);
    }

    output_outcome(ctx, args, &outcome)?;

    if args.require && !outcome.found() {
        return Err(LinkpathError::NoPathFound {
            source_node: args.source.clone(),
            target_node: args.target.clone(),
        });
    }
    Ok(())
}

fn output_outcome(ctx: &CommandContext, args: &FindArgs, outcome: &SearchOutcome) -> Result<()> {
    let elapsed = outcome.stats.elapsed;

    match ctx.cli.format {
        OutputFormat::Json => {
            let report = FindReport {
                source: &args.source,
                target: &args.target,
                found: outcome.found(),
                path: outcome.path.as_deref(),
                length: outcome.hops(),
                meeting: outcome.meeting.as_deref(),
                elapsed_ms: elapsed.as_millis() as u64,
                stats: &outcome.stats,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Human => {
            match &outcome.path {
                Some(path) => println!("{}", path.join(" -> ")),
                None => println!("no path found"),
            }
            if !ctx.cli.quiet {
                println!("Run time: {:.3}s", elapsed.as_secs_f64());
            }
        }
    }
    Ok(())
}
