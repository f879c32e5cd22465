//! Document directory oracle
//!
//! Each document under the root directory stands for the entity named by its file
//! stem (`Ada Lovelace.md` is the node `Ada Lovelace`). Expanding a node reads
//! its document and extracts `[[Mention]]` or `[[Mention|label]]` wiki links.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::warn;
use walkdir::WalkDir;

use super::{ExpansionError, ExpansionOracle, NeighborSet};
use crate::error::{LinkpathError, Result};

const DOCUMENT_EXTENSIONS: &[&str] = &["md", "markdown", "txt"];

pub struct DocumentOracle {
    root: PathBuf,
    index: HashMap<String, PathBuf>,
    mention_re: Regex,
}

impl DocumentOracle {
    /// Index every document under `root`
    pub fn open(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(LinkpathError::not_found("document directory", root.display()));
        }

        let mention_re = Regex::new(r"\[\[([^\]|]+)(?:\|[^\]]+)?\]\]")
            .map_err(|e| LinkpathError::failed("compile mention pattern", e))?;

        let mut index = HashMap::new();
        for entry in WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !entry.file_type().is_file() || !is_document(path) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if let Some(existing) = index.get(stem) {
                warn!(
                    node = stem,
                    kept = ?existing,
                    skipped = ?path,
                    "duplicate document for node"
                );
                continue;
            }
            index.insert(stem.to_string(), path.to_path_buf());
        }

        tracing::debug!(root = %root.display(), documents = index.len(), "documents_indexed");

        Ok(Self {
            root: root.to_path_buf(),
            index,
            mention_re,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn document_count(&self) -> usize {
        self.index.len()
    }

    /// Extract the distinct entity names mentioned in `text`
    pub fn extract_mentions(&self, text: &str) -> NeighborSet {
        self.mention_re
            .captures_iter(text)
            .map(|cap| cap[1].trim().to_string())
            .filter(|mention| !mention.is_empty())
            .collect()
    }
}

fn is_document(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            DOCUMENT_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

impl ExpansionOracle for DocumentOracle {
    fn expand(&self, node: &str) -> std::result::Result<NeighborSet, ExpansionError> {
        let path = self
            .index
            .get(node)
            .ok_or_else(|| ExpansionError::unknown(node))?;

        let text = fs::read_to_string(path).map_err(|e| ExpansionError::transient(node, e))?;

        let mut mentions = self.extract_mentions(&text);
        mentions.remove(node);
        Ok(mentions)
    }
}
