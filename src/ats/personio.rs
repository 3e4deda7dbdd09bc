//! Personio job listings. The endpoint has shipped several shapes over time:
//! a bare array, or an object wrapping the array under one of a few keys.

use serde::Deserialize;
use serde_json::{Map, Value};
use url::Url;

use crate::ats::{candidate, first_text};
use crate::extractor::Candidate;

const TITLE_FIELDS: &[&str] = &["name", "title", "position"];
const LINK_FIELDS: &[&str] = &["url", "postingUrl"];

/// Wrapper keys, checked in this order; the first non-empty list wins.
const WRAPPER_KEYS: &[&str] = &["jobPostings", "items", "postings"];

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PersonioListing {
    Bare(Vec<Value>),
    Wrapped(Map<String, Value>),
}

impl PersonioListing {
    fn into_entries(self) -> Vec<Value> {
        match self {
            Self::Bare(entries) => entries,
            // keys resolve independently; a mistyped sibling is ignored
            Self::Wrapped(mut envelope) => WRAPPER_KEYS
                .iter()
                .filter_map(|key| match envelope.remove(*key) {
                    Some(Value::Array(entries)) if !entries.is_empty() => Some(entries),
                    _ => None,
                })
                .next()
                .unwrap_or_default(),
        }
    }
}

pub fn careers_host(subdomain: &str) -> String {
    format!("https://{}.jobs.personio.de/", subdomain.trim())
}

pub fn parse_postings(subdomain: &str, document: &Value) -> Vec<Candidate> {
    let Ok(listing) = PersonioListing::deserialize(document) else {
        return Vec::new();
    };
    let host = Url::parse(&careers_host(subdomain)).ok();

    listing
        .into_entries()
        .iter()
        .filter(|entry| entry.is_object())
        .filter_map(|entry| {
            let title = first_text(entry, TITLE_FIELDS).unwrap_or_default();
            let link = posting_link(entry).unwrap_or_default();
            candidate(title, &absolutize(host.as_ref(), link))
        })
        .collect()
}

fn posting_link(entry: &Value) -> Option<&str> {
    first_text(entry, LINK_FIELDS).or_else(|| {
        entry
            .pointer("/urls/careers")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|link| !link.is_empty())
    })
}

fn absolutize(host: Option<&Url>, link: &str) -> String {
    if link.is_empty() || link.starts_with("http://") || link.starts_with("https://") {
        return link.to_string();
    }
    crate::extractor::urls::resolve(host, link)
}
