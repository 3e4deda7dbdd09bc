use crate::config::Settings;
use crate::fetcher::{
    errors::FetchError,
    pipeline::{parse_json, process_response},
    source::PageSource,
    types::{BodyKind, PageResponse},
};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, header};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};

const MAX_BODY_SIZE: u64 = 5 * 1024 * 1024; // 5MB
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_REDIRECTS: usize = 10;

/// Single-attempt HTTP fetcher used for careers pages and ATS endpoints.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new(settings: &Settings) -> Result<Self, FetchError> {
        let client = ClientBuilder::new()
            .connect_timeout(CONNECT_TIMEOUT.min(settings.request_timeout()))
            .timeout(settings.request_timeout())
            .user_agent(settings.user_agent())
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self { client })
    }

    #[instrument(skip(self), fields(url = %url))]
    pub async fn fetch(&self, url: &str, kind: BodyKind) -> Result<PageResponse, FetchError> {
        let parsed_url = url::Url::parse(url)?;

        let response = self
            .client
            .get(parsed_url)
            .header(header::ACCEPT, kind.accept_header())
            .send()
            .await
            .map_err(FetchError::from_reqwest_error)?;

        if let Some(content_length) = response.content_length()
            && content_length > MAX_BODY_SIZE
        {
            return Err(FetchError::BodyTooLarge(content_length));
        }

        let final_url = response.url().clone();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|ct| ct.to_str().ok())
            .unwrap_or("text/html")
            .to_string();

        if !status.is_success() {
            return Err(FetchError::Http {
                status,
                retriable: status.is_server_error(),
            });
        }

        if !kind.accepts(&content_type) {
            return Err(FetchError::UnsupportedContentType(content_type));
        }

        let body_bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::Io(e.to_string()))?;

        // Content-Length may be absent or wrong
        if body_bytes.len() as u64 > MAX_BODY_SIZE {
            return Err(FetchError::BodyTooLarge(body_bytes.len() as u64));
        }

        debug!(status = %status, bytes = body_bytes.len(), "fetched");
        Ok(process_response(
            final_url,
            status,
            body_bytes,
            &content_type,
        ))
    }
}

#[async_trait]
impl PageSource for HttpSource {
    async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        let page = self.fetch(url, BodyKind::Html).await?;
        Ok(page.body_utf8)
    }

    async fn fetch_json(&self, url: &str) -> Result<Value, FetchError> {
        let page = self.fetch(url, BodyKind::Json).await?;
        parse_json(&page)
    }
}
