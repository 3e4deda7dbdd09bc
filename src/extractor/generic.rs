//! Structural rejection of navigation links that are not postings.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

use crate::extractor::urls::normalize;

static GENERIC_TITLE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\bopen (roles|positions|jobs|vacancies)\b",
        r"(?i)\ball (locations|departments|teams|offices|jobs)\b",
        r"(?i)\b(view|see|show|browse) all\b",
        r"(?i)^(our )?careers?( page| site)?$",
        r"(?i)^(jobs|job openings|current openings)$",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Navigation and hero-section phrases like "View all" or "Careers".
pub fn is_generic_title(title: &str) -> bool {
    let title = title.trim();
    GENERIC_TITLE_PATTERNS.iter().any(|p| p.is_match(title))
}

/// True when `href` just points back at the listing page: the same page, the
/// same page with a different query or fragment, or its `/careers` child.
pub fn is_generic_href(href: &str, base: &str) -> bool {
    let href_key = normalize(href);
    if href_key.is_empty() {
        return true;
    }
    if href_key == normalize(base) {
        return true;
    }

    let (Ok(href), Ok(base)) = (Url::parse(href.trim()), Url::parse(base.trim())) else {
        return false;
    };
    if href.host_str() != base.host_str() {
        return false;
    }

    let href_path = href.path().trim_end_matches('/');
    let base_path = base.path().trim_end_matches('/');
    href_path == base_path || href_path == format!("{base_path}/careers")
}
