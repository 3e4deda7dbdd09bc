use serde::{Deserialize, Serialize};

/// A (title, link) pair produced by an extractor or ATS adapter. Titles are
/// already sanitized; links are absolute but not normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub title: String,
    pub link: String,
}

impl Candidate {
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
        }
    }
}

/// One job listing in the final result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    pub company: String,
    pub title: String,
    /// The link as found on the page, not the normalized dedup key.
    pub link: String,
    /// Country guessed from the title or link, empty when nothing matched.
    pub location: String,
}

/// Collapses every whitespace run to a single space and trims the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(
            collapse_whitespace("  Senior\n\t Engineer \u{a0} Berlin  "),
            "Senior Engineer Berlin"
        );
        assert_eq!(collapse_whitespace(" \n "), "");
    }
}
