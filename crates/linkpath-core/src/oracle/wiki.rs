//! MediaWiki link oracle
//!
//! Expands a page title into the titles of the articles it links to, using the
//! `action=query&prop=links` API and following `plcontinue` continuation. Link
//! titles pass through a [`MentionFilter`] before they become neighbors.

use std::collections::HashMap;
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use super::{ExpansionError, ExpansionOracle, NeighborSet};
use crate::config::WikiConfig;

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    query: Option<QueryBody>,
    #[serde(rename = "continue", default)]
    continuation: Option<Continuation>,
}

#[derive(Debug, Deserialize)]
struct QueryBody {
    #[serde(default)]
    pages: HashMap<String, Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    #[serde(default)]
    missing: Option<serde_json::Value>,
    #[serde(default)]
    invalid: Option<serde_json::Value>,
    #[serde(default)]
    links: Vec<PageLink>,
}

#[derive(Debug, Deserialize)]
struct PageLink {
    title: String,
}

#[derive(Debug, Deserialize)]
struct Continuation {
    plcontinue: Option<String>,
}

/// One page of API results
#[derive(Debug, Default, PartialEq)]
struct LinkBatch {
    missing: bool,
    titles: Vec<String>,
    next: Option<String>,
}

fn parse_link_batch(body: &str) -> Result<LinkBatch, serde_json::Error> {
    let response: QueryResponse = serde_json::from_str(body)?;
    let mut batch = LinkBatch {
        next: response.continuation.and_then(|c| c.plcontinue),
        ..LinkBatch::default()
    };

    for page in response
        .query
        .map(|q| q.pages.into_values())
        .into_iter()
        .flatten()
    {
        if page.missing.is_some() || page.invalid.is_some() {
            batch.missing = true;
        }
        batch
            .titles
            .extend(page.links.into_iter().map(|link| link.title));
    }

    Ok(batch)
}

pub struct WikiOracle {
    agent: ureq::Agent,
    config: WikiConfig,
}

impl WikiOracle {
    pub fn new(config: WikiConfig) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_seconds)))
            .build()
            .into();

        Self { agent, config }
    }

    pub fn config(&self) -> &WikiConfig {
        &self.config
    }

    fn fetch_batch(
        &self,
        node: &str,
        continuation: Option<&str>,
    ) -> Result<LinkBatch, ExpansionError> {
        let mut request = self
            .agent
            .get(self.config.endpoint.as_str())
            .header("User-Agent", self.config.user_agent.as_str())
            .query("action", "query")
            .query("format", "json")
            .query("prop", "links")
            .query("plnamespace", "0")
            .query("pllimit", "max")
            .query("redirects", "1")
            .query("titles", node);
        if let Some(token) = continuation {
            request = request.query("plcontinue", token);
        }

        let body = match request.call() {
            Ok(mut response) => response
                .body_mut()
                .read_to_string()
                .map_err(|e| ExpansionError::transient(node, e))?,
            Err(ureq::Error::StatusCode(404)) => return Err(ExpansionError::unknown(node)),
            Err(e) => return Err(ExpansionError::transient(node, e)),
        };

        parse_link_batch(&body).map_err(|e| ExpansionError::extraction(node, e))
    }
}

impl ExpansionOracle for WikiOracle {
    fn expand(&self, node: &str) -> Result<NeighborSet, ExpansionError> {
        let mut neighbors = NeighborSet::new();
        let mut continuation: Option<String> = None;

        for _ in 0..self.config.max_link_pages.max(1) {
            let batch = self.fetch_batch(node, continuation.as_deref())?;
            if batch.missing {
                return Err(ExpansionError::unknown(node));
            }

            neighbors.extend(
                batch
                    .titles
                    .into_iter()
                    .filter(|title| title != node && self.config.filter.accepts(title)),
            );

            match batch.next {
                Some(next) => continuation = Some(next),
                None => break,
            }
        }

        debug!(node, neighbors = neighbors.len(), "wiki_expanded");
        Ok(neighbors)
    }
}
