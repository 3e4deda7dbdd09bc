#![no_main]

use libfuzzer_sys::fuzz_target;

use jobsweep::ats;
use jobsweep::extractor::{RuleSet, extract_postings, urls::normalize};

fuzz_target!(|data: &[u8]| {
    // Convert raw bytes to string, handling invalid UTF-8 gracefully
    let html = String::from_utf8_lossy(data).to_string();

    let rules = RuleSet::compile(&["engineer", "re:(?i)dev.*"], &["sales"]).unwrap();

    // Neither the extractor nor the detector may panic on any input
    for candidate in extract_postings("https://example.com/careers", &html, &rules) {
        let _ = normalize(&candidate.link);
    }
    let _ = ats::detect(&html);
    let _ = normalize(&html);
});
