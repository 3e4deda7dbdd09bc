//! Greenhouse job board API: `{"jobs": [{"title", "absolute_url", ...}]}`.

use serde::Deserialize;
use serde_json::Value;

use crate::ats::candidate;
use crate::extractor::Candidate;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GreenhouseJob {
    title: Option<String>,
    absolute_url: Option<String>,
}

pub fn parse_postings(document: &Value) -> Vec<Candidate> {
    let Some(jobs) = document.get("jobs").and_then(Value::as_array) else {
        return Vec::new();
    };

    jobs.iter()
        .filter_map(|entry| GreenhouseJob::deserialize(entry).ok())
        .filter_map(|job| {
            candidate(
                job.title.as_deref().unwrap_or_default(),
                job.absolute_url.as_deref().unwrap_or_default(),
            )
        })
        .collect()
}
