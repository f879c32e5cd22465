//! Mention filters applied to raw link titles

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LinkpathError;

/// Lowercase name particles allowed between capitalized words ("Ludwig van Beethoven")
const NAME_PARTICLES: &[&str] = &[
    "al", "bin", "da", "de", "del", "della", "der", "di", "du", "la", "le", "van", "von",
];

/// Which link titles count as entity mentions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MentionFilter {
    /// Every linked title is a mention
    All,
    /// Only titles shaped like a person's name
    #[default]
    PersonName,
}

impl MentionFilter {
    pub fn accepts(&self, title: &str) -> bool {
        match self {
            MentionFilter::All => !title.trim().is_empty(),
            MentionFilter::PersonName => looks_like_person_name(title),
        }
    }
}

/// Two to five words, capitalized at both ends, no qualifiers such as
/// `(disambiguation)` or `List of:`.
fn looks_like_person_name(title: &str) -> bool {
    if title.contains(['(', ')', ':', ',', '/']) || title.chars().any(|c| c.is_ascii_digit()) {
        return false;
    }

    let words: Vec<&str> = title.split_whitespace().collect();
    if !(2..=5).contains(&words.len()) {
        return false;
    }

    let last = words.len() - 1;
    words.iter().enumerate().all(|(i, word)| {
        let capitalized = word.chars().next().is_some_and(char::is_uppercase);
        capitalized || (i != 0 && i != last && NAME_PARTICLES.contains(word))
    })
}

impl FromStr for MentionFilter {
    type Err = LinkpathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(MentionFilter::All),
            "person-name" | "person" => Ok(MentionFilter::PersonName),
            other => Err(LinkpathError::invalid_value("mention filter", other)),
        }
    }
}

impl fmt::Display for MentionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MentionFilter::All => write!(f, "all"),
            MentionFilter::PersonName => write!(f, "person-name"),
        }
    }
}
