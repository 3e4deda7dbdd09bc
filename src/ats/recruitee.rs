//! Recruitee offers API: `{"offers": [{"title", "slug", ...}]}`. Offer
//! links are built from the slug on the tenant's careers host.

use serde::Deserialize;
use serde_json::Value;

use crate::ats::candidate;
use crate::extractor::Candidate;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RecruiteeOffer {
    title: Option<String>,
    slug: Option<String>,
}

pub fn offer_url(subdomain: &str, slug: &str) -> String {
    format!("https://{}.recruitee.com/o/{}", subdomain.trim(), slug.trim())
}

pub fn parse_postings(subdomain: &str, document: &Value) -> Vec<Candidate> {
    let Some(offers) = document.get("offers").and_then(Value::as_array) else {
        return Vec::new();
    };

    offers
        .iter()
        .filter_map(|entry| RecruiteeOffer::deserialize(entry).ok())
        .filter_map(|offer| {
            let slug = offer.slug.as_deref().map(str::trim).unwrap_or_default();
            if slug.is_empty() {
                return None;
            }
            candidate(
                offer.title.as_deref().unwrap_or_default(),
                &offer_url(subdomain, slug),
            )
        })
        .collect()
}
