//! URL canonicalization for deduplication keys.

use url::{Url, form_urlencoded};

/// Query parameters that only carry campaign attribution.
pub const TRACKING_PARAMS: &[&str] = &[
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_term",
    "utm_content",
    "gclid",
    "fbclid",
];

/// Normalize a URL into a dedup key.
///
/// - Lowercases scheme and host
/// - Strips the fragment
/// - Drops tracking parameters, keeping the order of the rest and blank values
/// - Removes trailing slashes from the path (a bare `/` becomes empty)
///
/// Never fails: input that does not parse as an absolute URL comes back
/// trimmed.
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();
    match Url::parse(trimmed) {
        Ok(url) => canonical(&url),
        Err(_) => trimmed.to_string(),
    }
}

fn canonical(url: &Url) -> String {
    let query = filtered_query(url);

    if url.cannot_be_a_base() {
        // mailto:, javascript: and friends have no authority or path segments
        return match query {
            Some(q) => format!("{}:{}?{}", url.scheme(), url.path(), q),
            None => format!("{}:{}", url.scheme(), url.path()),
        };
    }

    let mut key = format!("{}://{}", url.scheme(), url.authority());
    key.push_str(url.path().trim_end_matches('/'));
    if let Some(q) = query {
        key.push('?');
        key.push_str(&q);
    }
    key
}

fn filtered_query(url: &Url) -> Option<String> {
    url.query()?;

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    let mut kept = 0usize;
    for (name, value) in url.query_pairs() {
        if TRACKING_PARAMS.contains(&name.as_ref()) {
            continue;
        }
        serializer.append_pair(&name, &value);
        kept += 1;
    }

    (kept > 0).then(|| serializer.finish())
}

/// Resolves `href` against `base`. Falls back to the trimmed href when the
/// base does not parse or the join fails.
pub fn resolve(base: Option<&Url>, href: &str) -> String {
    let href = href.trim();
    base.and_then(|b| b.join(href).ok())
        .map(String::from)
        .unwrap_or_else(|| href.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equivalent_urls_share_a_key() {
        assert_eq!(
            normalize("http://Foo.com/bar/?utm_source=x#frag"),
            normalize("http://foo.com/bar")
        );
        assert_eq!(
            normalize("HTTPS://JOBS.example.com/a?gclid=1&fbclid=2"),
            "https://jobs.example.com/a"
        );
    }

    #[test]
    fn keeps_non_tracking_params_in_order() {
        assert_eq!(
            normalize("https://co.example/jobs?team=eng&utm_medium=mail&page=&loc=de"),
            "https://co.example/jobs?team=eng&page=&loc=de"
        );
    }

    #[test]
    fn root_path_collapses() {
        assert_eq!(normalize("https://co.example/"), "https://co.example");
        assert_eq!(normalize("https://co.example"), "https://co.example");
    }

    #[test]
    fn keeps_port_and_path_case() {
        assert_eq!(
            normalize("http://Localhost:8080/Jobs/Backend/"),
            "http://localhost:8080/Jobs/Backend"
        );
    }

    #[test]
    fn unparseable_input_is_trimmed() {
        assert_eq!(normalize("  /careers/42  "), "/careers/42");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("http://[broken"), "http://[broken");
    }

    #[test]
    fn opaque_schemes() {
        assert_eq!(
            normalize("mailto:jobs@co.example?utm_source=x"),
            "mailto:jobs@co.example"
        );
    }

    #[test]
    fn idempotent_on_samples() {
        for raw in [
            "http://Foo.com/bar/?utm_source=x#frag",
            "https://co.example/careers?dept=eng&q=a+b",
            "https://co.example/",
            "https://co.example/a//",
            "https://co.example/search?q=%C3%BC&empty=",
            "not a url",
            "mailto:jobs@co.example",
        ] {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once, "not idempotent for {raw}");
        }
    }

    #[test]
    fn resolve_relative_and_absolute() {
        let base = Url::parse("https://co.example/careers/").unwrap();
        assert_eq!(
            resolve(Some(&base), " 42-backend "),
            "https://co.example/careers/42-backend"
        );
        assert_eq!(
            resolve(Some(&base), "https://other.example/x"),
            "https://other.example/x"
        );
        assert_eq!(resolve(None, "/jobs/1"), "/jobs/1");
    }
}
