use linkpath_core::config::SearchMode;
use linkpath_core::oracle::MentionFilter;

/// Parse search mode from string
pub fn parse_search_mode(s: &str) -> std::result::Result<SearchMode, String> {
    s.parse::<SearchMode>().map_err(|e| e.to_string())
}

/// Parse mention filter from string
pub fn parse_mention_filter(s: &str) -> std::result::Result<MentionFilter, String> {
    s.parse::<MentionFilter>().map_err(|e| e.to_string())
}
