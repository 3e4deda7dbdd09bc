use async_trait::async_trait;
use serde_json::Value;

use crate::fetcher::errors::FetchError;

/// Where the scan pipeline gets its raw payloads from. The HTTP-backed
/// implementation is [`crate::fetcher::HttpSource`]; tests substitute
/// in-memory fixtures.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch a careers page and return its markup decoded to UTF-8.
    async fn fetch_page(&self, url: &str) -> Result<String, FetchError>;

    /// Fetch an ATS listing endpoint and return the parsed JSON document.
    async fn fetch_json(&self, url: &str) -> Result<Value, FetchError>;
}
