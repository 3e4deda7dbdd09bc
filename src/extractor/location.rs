//! Country guess for a posting, checked against the run's allow-list.

use regex::Regex;

/// Countries accepted when a run does not configure its own list.
pub const DEFAULT_ALLOWED_LOCATIONS: &[&str] = &[
    "Germany",
    "Luxembourg",
    "UK",
    "United Kingdom",
    "Sweden",
    "USA",
    "United States",
];

/// A company's countries, compiled once into whole-word, case-insensitive
/// matchers. Order is preserved.
#[derive(Debug, Clone, Default)]
pub struct CountryMatcher {
    countries: Vec<(String, Regex)>,
}

impl CountryMatcher {
    pub fn new<S: AsRef<str>>(countries: &[S]) -> Self {
        let countries = countries
            .iter()
            .map(|c| c.as_ref().trim())
            .filter(|c| !c.is_empty())
            .filter_map(|c| {
                let pattern = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(c))).ok()?;
                Some((c.to_string(), pattern))
            })
            .collect();
        Self { countries }
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    /// First configured country that occurs in `text`.
    pub fn guess(&self, text: &str) -> Option<&str> {
        self.countries
            .iter()
            .find(|(_, pattern)| pattern.is_match(text))
            .map(|(country, _)| country.as_str())
    }
}

/// Whether `country` is on the allow-list. Names compare exactly, after
/// trimming.
pub fn is_allowed(country: &str, allowed: &[String]) -> bool {
    allowed.iter().any(|a| a.trim() == country.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn first_configured_country_wins() {
        let countries = CountryMatcher::new(&["Sweden", "Germany"]);
        assert_eq!(
            countries.guess("Backend Engineer (Germany or Sweden)"),
            Some("Sweden")
        );
    }

    #[test]
    fn whole_words_only() {
        let countries = CountryMatcher::new(&["UK"]);
        assert_eq!(countries.guess("Ukulele Engineer"), None);
        assert_eq!(
            countries.guess("Engineer https://co.example/jobs/uk/42"),
            Some("UK")
        );
    }

    #[test]
    fn blank_entries_are_dropped() {
        let countries = CountryMatcher::new(&["", "  "]);
        assert!(countries.is_empty());
        assert_eq!(countries.guess("Engineer in Germany"), None);
    }

    #[test]
    fn allow_list_is_exact() {
        let allowed = list(DEFAULT_ALLOWED_LOCATIONS);
        assert!(is_allowed("Germany", &allowed));
        assert!(is_allowed(" Sweden ", &allowed));
        assert!(!is_allowed("germany", &allowed));
        assert!(!is_allowed("France", &allowed));
    }
}
