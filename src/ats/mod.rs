//! Adapters for applicant-tracking systems with public JSON job listings.
//!
//! Each provider module maps that provider's listing document onto
//! [`Candidate`]s. Entries without a usable title or link are skipped one by
//! one; a document of the wrong shape yields no candidates at all.

pub mod detect;
pub mod greenhouse;
pub mod lever;
pub mod personio;
pub mod recruitee;

pub use detect::detect;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::extractor::Candidate;
use crate::fetcher::{FetchError, PageSource};

const TOKEN_PLACEHOLDER: &str = "{token}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AtsKind {
    Greenhouse,
    Lever,
    Personio,
    Recruitee,
}

impl AtsKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Greenhouse => "greenhouse",
            Self::Lever => "lever",
            Self::Personio => "personio",
            Self::Recruitee => "recruitee",
        }
    }

    /// Map a listing document onto candidates.
    pub fn parse(self, token: &str, document: &Value) -> Vec<Candidate> {
        match self {
            Self::Greenhouse => greenhouse::parse_postings(document),
            Self::Lever => lever::parse_postings(document),
            Self::Personio => personio::parse_postings(token, document),
            Self::Recruitee => recruitee::parse_postings(token, document),
        }
    }
}

impl std::fmt::Display for AtsKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provider plus tenant token (board slug, company slug or subdomain).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AtsConfig {
    #[serde(rename = "type")]
    pub kind: AtsKind,
    pub token: String,
}

impl AtsConfig {
    pub fn new(kind: AtsKind, token: impl Into<String>) -> Self {
        Self {
            kind,
            token: token.into(),
        }
    }
}

/// Listing endpoint templates; `{token}` is replaced by the tenant token.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AtsEndpoints {
    pub greenhouse: String,
    pub lever: String,
    pub personio: String,
    pub recruitee: String,
}

impl Default for AtsEndpoints {
    fn default() -> Self {
        Self {
            greenhouse: "https://boards-api.greenhouse.io/v1/boards/{token}/jobs".to_string(),
            lever: "https://api.lever.co/v0/postings/{token}?mode=json".to_string(),
            personio: "https://{token}.jobs.personio.de/search.json".to_string(),
            recruitee: "https://{token}.recruitee.com/api/offers/".to_string(),
        }
    }
}

impl AtsEndpoints {
    pub fn listing_url(&self, kind: AtsKind, token: &str) -> String {
        let template = match kind {
            AtsKind::Greenhouse => &self.greenhouse,
            AtsKind::Lever => &self.lever,
            AtsKind::Personio => &self.personio,
            AtsKind::Recruitee => &self.recruitee,
        };
        template.replace(TOKEN_PLACEHOLDER, token.trim())
    }
}

/// Fetch and map one provider's listing.
#[instrument(skip_all, fields(provider = %ats.kind, token = %ats.token))]
pub async fn fetch_postings(
    source: &dyn PageSource,
    endpoints: &AtsEndpoints,
    ats: &AtsConfig,
) -> Result<Vec<Candidate>, FetchError> {
    let url = endpoints.listing_url(ats.kind, &ats.token);
    let document = source.fetch_json(&url).await?;
    let postings = ats.kind.parse(&ats.token, &document);
    debug!(%url, count = postings.len(), "ats listing mapped");
    Ok(postings)
}

/// First non-blank string among `fields` of a JSON object, trimmed.
pub(crate) fn first_text<'a>(entry: &'a Value, fields: &[&str]) -> Option<&'a str> {
    fields
        .iter()
        .filter_map(|field| entry.get(*field)?.as_str())
        .map(str::trim)
        .find(|text| !text.is_empty())
}

/// Build a candidate from a raw title and link, dropping it when either is
/// blank after cleanup.
pub(crate) fn candidate(raw_title: &str, link: &str) -> Option<Candidate> {
    let title = crate::extractor::title::clean(raw_title);
    let link = link.trim();
    if title.is_empty() || link.is_empty() {
        return None;
    }
    Some(Candidate::new(title, link))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::source::MockPageSource;
    use serde_json::json;

    #[test]
    fn listing_urls_use_token() {
        let endpoints = AtsEndpoints::default();
        assert_eq!(
            endpoints.listing_url(AtsKind::Lever, "acme"),
            "https://api.lever.co/v0/postings/acme?mode=json"
        );
        assert_eq!(
            endpoints.listing_url(AtsKind::Personio, " acme "),
            "https://acme.jobs.personio.de/search.json"
        );
        assert_eq!(
            endpoints.listing_url(AtsKind::Recruitee, "acme"),
            "https://acme.recruitee.com/api/offers/"
        );
    }

    #[test]
    fn first_text_skips_blank_and_non_strings() {
        let entry = json!({"name": "  ", "title": 7, "position": " Analyst "});
        assert_eq!(first_text(&entry, &["name", "title", "position"]), Some("Analyst"));
        assert_eq!(first_text(&json!("scalar"), &["name"]), None);
    }

    #[tokio::test]
    async fn fetch_postings_requests_the_listing_url() {
        let mut source = MockPageSource::new();
        source
            .expect_fetch_json()
            .withf(|url| url.to_string() == "https://boards-api.greenhouse.io/v1/boards/acme/jobs")
            .times(1)
            .returning(|_| {
                Ok(json!({"jobs": [
                    {"title": "Backend Engineer", "absolute_url": "https://boards.greenhouse.io/acme/jobs/1"}
                ]}))
            });

        let postings = fetch_postings(
            &source,
            &AtsEndpoints::default(),
            &AtsConfig::new(AtsKind::Greenhouse, "acme"),
        )
        .await
        .unwrap();

        assert_eq!(
            postings,
            vec![Candidate::new(
                "Backend Engineer",
                "https://boards.greenhouse.io/acme/jobs/1"
            )]
        );
    }

    #[tokio::test]
    async fn fetch_postings_propagates_fetch_errors() {
        let mut source = MockPageSource::new();
        source
            .expect_fetch_json()
            .returning(|_| Err(FetchError::RequestTimeout));

        let result = fetch_postings(
            &source,
            &AtsEndpoints::default(),
            &AtsConfig::new(AtsKind::Lever, "acme"),
        )
        .await;
        assert!(matches!(result, Err(FetchError::RequestTimeout)));
    }
}
