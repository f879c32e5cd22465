//! Oracle construction from command-line selection

use std::sync::Arc;
use std::time::Instant;

use tracing::info;

use crate::cli::{OracleArgs, OracleOptions};
use crate::commands::dispatch::CommandContext;
use linkpath_core::bail_usage;
use linkpath_core::error::Result;
use linkpath_core::oracle::{AdjacencyOracle, DocumentOracle, ExpansionOracle, WikiOracle};
use linkpath_core::trace_time;

pub fn build_oracle(
    ctx: &CommandContext,
    args: &OracleArgs,
    options: &OracleOptions,
) -> Result<Arc<dyn ExpansionOracle>> {
    let start = Instant::now();

    if let Some(path) = &args.graph {
        let mut oracle = AdjacencyOracle::load(path)?;
        if options.symmetric {
            oracle = oracle.symmetric();
        }
        info!(path = %path.display(), nodes = oracle.node_count(), "graph_loaded");
        trace_time!(start, "load_graph");
        return Ok(Arc::new(oracle));
    }

    if let Some(dir) = &args.docs {
        let oracle = DocumentOracle::open(dir)?;
        info!(root = %oracle.root().display(), documents = oracle.document_count(), "docs_loaded");
        trace_time!(start, "index_documents");
        return Ok(Arc::new(oracle));
    }

    if args.wiki {
        let mut config = ctx.config.wiki.clone();
        if let Some(filter) = options.mentions {
            config.filter = filter;
        }
        info!(endpoint = %config.endpoint, filter = %config.filter, "wiki_oracle");
        return Ok(Arc::new(WikiOracle::new(config)));
    }

    bail_usage!("one of --graph, --docs or --wiki is required")
}
