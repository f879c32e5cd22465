//! Configuration for linkpath
//!
//! Configuration is read from `linkpath.toml` (or an explicit `--config` path),
//! then environment overrides are applied, then command-line flags.

pub mod types;

use std::fs;
use std::path::Path;

use crate::bail_invalid;
use crate::error::{LinkpathError, Result};

pub use types::{
    LinkpathConfig, SearchConfig, SearchMode, WikiConfig, DEFAULT_CONCURRENCY, DEFAULT_MAX_DEPTH,
    DEFAULT_WIKI_ENDPOINT,
};

/// Default configuration file name, looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "linkpath.toml";

impl SearchConfig {
    /// Reject settings the engine cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.concurrency == 0 {
            bail_invalid!("concurrency", "0 (must be at least 1)");
        }
        if self.timeout_ms == Some(0) {
            bail_invalid!("timeout", "0ms");
        }
        Ok(())
    }
}

impl LinkpathConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                LinkpathError::not_found("config file", path.display())
            } else {
                LinkpathError::Io(e)
            }
        })?;
        let config: LinkpathConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load `linkpath.toml` from `dir` when present, defaults otherwise
    pub fn discover(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.is_file() {
            tracing::debug!(path = %path.display(), "config_discovered");
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| LinkpathError::failed("serialize config", e))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Apply `LINKPATH_*` environment overrides
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(depth) = lookup("LINKPATH_MAX_DEPTH").and_then(|v| v.parse::<usize>().ok()) {
            self.search.max_depth = depth.min(64);
        }

        if let Some(count) = lookup("LINKPATH_CONCURRENCY").and_then(|v| v.parse::<usize>().ok())
        {
            self.search.concurrency = count.clamp(1, 256);
        }

        if let Some(endpoint) = lookup("LINKPATH_WIKI_ENDPOINT").filter(|s| !s.is_empty()) {
            self.wiki.endpoint = endpoint;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::MentionFilter;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = LinkpathConfig::default();
        assert_eq!(config.search.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(config.search.concurrency, DEFAULT_CONCURRENCY);
        assert_eq!(config.search.mode, SearchMode::Level);
        assert!(config.search.timeout().is_none());
        assert_eq!(config.wiki.endpoint, DEFAULT_WIKI_ENDPOINT);
        assert_eq!(config.wiki.filter, MentionFilter::PersonName);
        assert!(config.wiki.user_agent.starts_with("linkpath/"));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        let mut config = LinkpathConfig::default();
        config.search.max_depth = 3;
        config.search.mode = SearchMode::Racing;
        config.search.timeout_ms = Some(1500);
        config.wiki.filter = MentionFilter::All;
        config.save(&path).unwrap();

        let loaded = LinkpathConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[search]\nmode = \"racing\"\n",
        )
        .unwrap();

        let config = LinkpathConfig::discover(dir.path()).unwrap();
        assert_eq!(config.search.mode, SearchMode::Racing);
        assert_eq!(config.search.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(config.wiki, WikiConfig::default());
    }

    #[test]
    fn test_discover_without_file() {
        let dir = tempdir().unwrap();
        let config = LinkpathConfig::discover(dir.path()).unwrap();
        assert_eq!(config, LinkpathConfig::default());
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[search\nmax_depth = ").unwrap();
        assert!(matches!(
            LinkpathConfig::load(&path),
            Err(LinkpathError::Toml(_))
        ));
    }

    #[test]
    fn test_env_overrides_are_clamped() {
        let env: HashMap<&str, &str> = [
            ("LINKPATH_MAX_DEPTH", "500"),
            ("LINKPATH_CONCURRENCY", "0"),
            ("LINKPATH_WIKI_ENDPOINT", "http://localhost:8080/api.php"),
        ]
        .into_iter()
        .collect();

        let mut config = LinkpathConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.search.max_depth, 64);
        assert_eq!(config.search.concurrency, 1);
        assert_eq!(config.wiki.endpoint, "http://localhost:8080/api.php");
    }

    #[test]
    fn test_env_overrides_ignore_garbage() {
        let mut config = LinkpathConfig::default();
        config.apply_overrides(|key| (key == "LINKPATH_MAX_DEPTH").then(|| "deep".to_string()));
        assert_eq!(config.search.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_validate() {
        assert!(SearchConfig::default().validate().is_ok());
        assert!(SearchConfig::default()
            .with_concurrency(0)
            .validate()
            .is_err());
        assert!(SearchConfig {
            timeout_ms: Some(0),
            ..SearchConfig::default()
        }
        .validate()
        .is_err());
    }

    #[test]
    fn test_search_mode_parse() {
        assert_eq!("racing".parse::<SearchMode>().unwrap(), SearchMode::Racing);
        assert_eq!("Level".parse::<SearchMode>().unwrap(), SearchMode::Level);
        assert!("sideways".parse::<SearchMode>().is_err());
    }
}
