use std::fs;

use crate::extractor::{Candidate, RuleSet, extract_postings, merge_by_link};

fn fixture(name: &str) -> String {
    fs::read_to_string(format!("src/extractor/tests/fixtures/{name}"))
        .expect("Failed to read test fixture")
}

fn default_rules() -> RuleSet {
    RuleSet::compile(
        &["engineer", "scientist", "developer", "analyst", "manager", "intern"],
        &["marketing", "sales", "finance"],
    )
    .unwrap()
}

#[test]
fn test_extract_careers_page() {
    let html = fixture("careers.html");
    let postings = extract_postings("https://acme.example/careers", &html, &default_rules());

    assert_eq!(
        postings,
        vec![
            Candidate::new(
                "Backend Engineer",
                "https://acme.example/careers/101-backend-engineer?utm_source=linkedin"
            ),
            Candidate::new(
                "Data Scientist",
                "https://acme.example/careers/102-data-scientist"
            ),
        ]
    );
}

#[test]
fn test_navigation_is_never_a_posting() {
    let html = fixture("careers.html");
    let postings = extract_postings("https://acme.example/careers", &html, &default_rules());

    assert!(postings.iter().all(|p| !p.link.contains("dept=eng")));
    assert!(postings.iter().all(|p| p.title != "Engineering"));
}

#[test]
fn test_cards_without_title_anchor() {
    let html = fixture("cards.html");
    let postings = extract_postings("https://work.example/join", &html, &default_rules());

    // The outer list container matches the card selector too; its blurb
    // loses to the inner card's shorter text for the same link.
    assert_eq!(postings.len(), 1);
    assert_eq!(postings[0].link, "https://work.example/jobs/ml-engineer");
    assert_eq!(
        postings[0].title,
        "Machine Learning Engineer Munich · Full-time Details"
    );
}

#[test]
fn test_card_without_anchor_falls_back_to_base_and_is_dropped() {
    let html = r#"<div class="job"><h2>Firmware Developer</h2><p>Hamburg</p></div>"#;
    let postings = extract_postings("https://co.example/careers", html, &default_rules());
    assert!(postings.is_empty());
}

#[test]
fn test_embed_page_yields_nothing() {
    let html = fixture("greenhouse_embed.html");
    let postings = extract_postings("https://acme.example/join", &html, &default_rules());
    assert!(postings.is_empty());
}

#[test]
fn test_empty_include_extracts_nothing() {
    let html = fixture("careers.html");
    let rules = RuleSet::compile::<&str>(&[], &[]).unwrap();
    assert!(extract_postings("https://acme.example/careers", &html, &rules).is_empty());
}

#[test]
fn test_unparseable_base_keeps_absolute_links() {
    let html = r#"<a href="https://jobs.example/42">Staff Engineer</a><a href="/43">QA Engineer</a>"#;
    let postings = extract_postings("not a url", html, &default_rules());

    assert_eq!(
        postings,
        vec![
            Candidate::new("Staff Engineer", "https://jobs.example/42"),
            Candidate::new("QA Engineer", "/43"),
        ]
    );
}

#[test]
fn test_merge_replaces_link_with_better_title() {
    let merged = merge_by_link([
        Candidate::new(
            "Backend Engineer - we are a fast growing startup with great perks",
            "https://co.example/jobs/1?utm_campaign=x",
        ),
        Candidate::new("Backend Engineer", "https://co.example/jobs/1/"),
        Candidate::new("Frontend Engineer", "https://co.example/jobs/2"),
    ]);

    assert_eq!(
        merged,
        vec![
            Candidate::new("Backend Engineer", "https://co.example/jobs/1/"),
            Candidate::new("Frontend Engineer", "https://co.example/jobs/2"),
        ]
    );
}

#[test]
fn test_malformed_html() {
    let html = "<html><body><ul><li class='job'><a href='/jobs/7'>Platform Engineer<div>Remote";
    let postings = extract_postings("https://co.example/careers", html, &default_rules());

    assert_eq!(postings.len(), 1);
    assert_eq!(postings[0].link, "https://co.example/jobs/7");
    assert!(postings[0].title.starts_with("Platform Engineer"));
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use super::*;
    use crate::extractor::{title, urls};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_extract_never_panics(
            html in ".*",
            base in "https://[a-z]+\\.com/.*"
        ) {
            let _ = extract_postings(&base, &html, &default_rules());
        }

        #[test]
        fn test_normalize_is_idempotent(
            url in "https?://[A-Za-z]{1,10}\\.(com|de)(/[a-z0-9]{0,6}){0,3}/?(\\?[a-z_]{1,8}=[a-z0-9]{0,4}(&[a-z_]{1,8}=[a-z0-9]{0,4}){0,3})?(#[a-z]{0,5})?"
        ) {
            let once = urls::normalize(&url);
            prop_assert_eq!(urls::normalize(&once), once);
        }

        #[test]
        fn test_clean_caps_length(raw in "[a-zA-Z ]{121,400}") {
            let cleaned = title::clean(&raw);
            prop_assert!(cleaned.chars().count() <= title::MAX_TITLE_CHARS + 1);
        }
    }
}
