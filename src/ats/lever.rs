//! Lever postings API: a root array of postings.

use serde_json::Value;

use crate::ats::{candidate, first_text};
use crate::extractor::Candidate;

const TITLE_FIELDS: &[&str] = &["text", "title"];
const LINK_FIELDS: &[&str] = &["hostedUrl", "applyUrl"];

pub fn parse_postings(document: &Value) -> Vec<Candidate> {
    let Some(postings) = document.as_array() else {
        return Vec::new();
    };

    postings
        .iter()
        .filter(|entry| entry.is_object())
        .filter_map(|entry| {
            candidate(
                first_text(entry, TITLE_FIELDS).unwrap_or_default(),
                first_text(entry, LINK_FIELDS).unwrap_or_default(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn maps_postings_with_fallback_fields() {
        let doc = json!([
            {"id": "a", "text": "Senior Developer", "hostedUrl": "https://jobs.lever.co/acme/a"},
            {"id": "b", "title": "Product Manager", "applyUrl": "https://jobs.lever.co/acme/b/apply"},
            {"id": "c", "text": "", "title": "Intern", "hostedUrl": "", "applyUrl": "https://jobs.lever.co/acme/c/apply"}
        ]);

        assert_eq!(
            parse_postings(&doc),
            vec![
                Candidate::new("Senior Developer", "https://jobs.lever.co/acme/a"),
                Candidate::new("Product Manager", "https://jobs.lever.co/acme/b/apply"),
                Candidate::new("Intern", "https://jobs.lever.co/acme/c/apply"),
            ]
        );
    }

    #[test]
    fn skips_entries_without_link() {
        let doc = json!([{"text": "Analyst"}, null, 3]);
        assert!(parse_postings(&doc).is_empty());
    }

    #[test]
    fn error_object_is_empty() {
        let doc = json!({"ok": false, "error": "Document not found"});
        assert!(parse_postings(&doc).is_empty());
    }
}
