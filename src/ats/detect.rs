//! Infer the ATS provider and tenant token from careers page markup.

use regex::Regex;
use std::sync::LazyLock;

use crate::ats::{AtsConfig, AtsKind};

/// Checked in order; the first signature found decides the provider.
static SIGNATURES: LazyLock<Vec<(AtsKind, Regex)>> = LazyLock::new(|| {
    vec![
        (
            AtsKind::Greenhouse,
            Regex::new(
                r"(?i)boards\.greenhouse\.io/(?:embed/job_board(?:/js)?\?for=)?([a-z0-9_-]+)",
            )
            .unwrap(),
        ),
        (
            AtsKind::Lever,
            Regex::new(r"(?i)jobs\.lever\.co/([a-z0-9_-]+)").unwrap(),
        ),
        (
            AtsKind::Personio,
            Regex::new(r"(?i)([a-z0-9-]+)\.jobs\.personio\.de").unwrap(),
        ),
        (
            AtsKind::Recruitee,
            Regex::new(r"(?i)([a-z0-9-]+)\.recruitee\.com").unwrap(),
        ),
    ]
});

/// Tokens that appear in the signature position but name a path, not a tenant.
const NON_TENANT_TOKENS: &[&str] = &["embed", "api", "www"];

pub fn detect(html: &str) -> Option<AtsConfig> {
    SIGNATURES.iter().find_map(|(kind, pattern)| {
        pattern
            .captures_iter(html)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().to_ascii_lowercase())
            .find(|token| !NON_TENANT_TOKENS.contains(&token.as_str()))
            .map(|token| AtsConfig::new(*kind, token))
    })
}
