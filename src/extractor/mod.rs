//! Static extraction of postings from careers page markup.
//!
//! Two passes over the document feed one candidate list: every anchor with
//! an `href`, then every element whose class names look like a job card.
//! Candidates are cleaned, filtered and merged by normalized link.

pub mod generic;
pub mod location;
pub mod model;
pub mod rules;
pub mod title;
pub mod urls;

#[cfg(test)]
mod tests;

pub use model::{Candidate, Posting};
pub use rules::RuleSet;

use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::debug;
use url::Url;

use crate::extractor::{
    generic::{is_generic_href, is_generic_title},
    model::collapse_whitespace,
    title::Preference,
};

static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").unwrap());

static CARD_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("[class*='job'], [class*='career'], [class*='position']").unwrap()
});

/// Extract postings from raw page markup.
pub fn extract_postings(base_url: &str, html: &str, rules: &RuleSet) -> Vec<Candidate> {
    let document = Html::parse_document(html);
    extract_from_document(base_url, &document, rules)
}

/// Extract postings from an already parsed document. Output holds one entry
/// per normalized link, in first-seen order.
pub fn extract_from_document(base_url: &str, document: &Html, rules: &RuleSet) -> Vec<Candidate> {
    let base = Url::parse(base_url.trim()).ok();

    let raw = anchor_candidates(document, base.as_ref())
        .chain(card_candidates(document, base.as_ref(), base_url))
        .collect::<Vec<_>>();
    let total = raw.len();

    let accepted = raw.into_iter().filter_map(|candidate| {
        let title = title::clean(&candidate.title);
        if title.is_empty()
            || is_generic_title(&title)
            || is_generic_href(&candidate.link, base_url)
            || !rules.matches(&title)
        {
            return None;
        }
        Some(Candidate::new(title, candidate.link))
    });

    let merged = merge_by_link(accepted);
    debug!(base_url, total, kept = merged.len(), "static extraction");
    merged
}

fn anchor_candidates<'a>(
    document: &'a Html,
    base: Option<&'a Url>,
) -> impl Iterator<Item = Candidate> + 'a {
    document.select(&ANCHOR_SELECTOR).filter_map(move |anchor| {
        let href = anchor.value().attr("href")?.trim();
        if href.is_empty() {
            return None;
        }
        Some(Candidate::new(element_text(anchor), urls::resolve(base, href)))
    })
}

fn card_candidates<'a>(
    document: &'a Html,
    base: Option<&'a Url>,
    base_url: &'a str,
) -> impl Iterator<Item = Candidate> + 'a {
    document.select(&CARD_SELECTOR).map(move |card| {
        let link = card
            .select(&ANCHOR_SELECTOR)
            .filter_map(|a| a.value().attr("href"))
            .map(str::trim)
            .find(|href| !href.is_empty())
            .map(|href| urls::resolve(base, href))
            .unwrap_or_else(|| base_url.trim().to_string());
        Candidate::new(element_text(card), link)
    })
}

fn element_text(element: ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<Vec<_>>().join(" "))
}

/// Groups candidates by normalized link. On a collision the better title
/// wins and brings its own link along; ties keep the earlier candidate.
pub fn merge_by_link(candidates: impl IntoIterator<Item = Candidate>) -> Vec<Candidate> {
    let mut merged: Vec<Candidate> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for candidate in candidates {
        let key = urls::normalize(&candidate.link);
        match index.get(&key) {
            Some(&slot) => {
                let existing = &mut merged[slot];
                if title::prefer(&existing.title, &candidate.title) == Preference::Second {
                    *existing = candidate;
                }
            }
            None => {
                index.insert(key, merged.len());
                merged.push(candidate);
            }
        }
    }

    merged
}
