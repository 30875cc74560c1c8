// src/fetch/http.rs
// =============================================================================
// This module downloads pages over HTTP and lists their links.
//
// Key functionality:
// - Makes HTTP GET requests with a per-request timeout
// - Follows a limited number of redirects
// - Treats any non-2xx status as a failure
// - Hands the body to a link extractor (see extract.rs)
//
// Rust concepts:
// - async/await: For non-blocking network I/O
// - Result<T, E>: Every failure becomes a FetchError variant
// - Function pointers: The extractor is a plain `fn`, swappable in tests
// =============================================================================

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::{extract_links, FetchError, Fetcher, LinkExtractor};

const MAX_REDIRECTS: usize = 5;

// Fetcher backed by a reqwest Client
//
// The client is created once and reused for every request (connection pooling)
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
    extractor: LinkExtractor,
}

impl HttpFetcher {
    // Creates a fetcher whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        Self::with_extractor(timeout, extract_links)
    }

    // Same as new(), but pages are turned into links by `extractor`
    pub fn with_extractor(timeout: Duration, extractor: LinkExtractor) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()?;

        Ok(Self { client, extractor })
    }

    // Downloads the page body as text
    async fn fetch_page(&self, url: &Url) -> Result<String, FetchError> {
        let response = self.client.get(url.clone()).send().await.map_err(categorize_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::Body(e.to_string()))
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<String>, FetchError> {
        let parsed = Url::parse(url).map_err(|source| FetchError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        let html = self.fetch_page(&parsed).await?;

        let links = (self.extractor)(&parsed, &html);
        debug!(url, links = links.len(), "extracted links");
        Ok(links)
    }
}

// Timeouts get their own variant; everything else stays a reqwest error
fn categorize_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Request(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetcher() -> HttpFetcher {
        HttpFetcher::new(Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_lists_links() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body(r#"<a href="/pkg/">pkg</a><a href="/cmd/?q=1">cmd</a><a href="/pkg/#x">dup</a>"#)
            .create_async()
            .await;

        let base = server.url();
        let links = fetcher().fetch(&format!("{}/", base)).await.unwrap();

        mock.assert_async().await;
        assert_eq!(links, vec![format!("{}/pkg/", base), format!("{}/cmd/", base)]);
    }

    #[tokio::test]
    async fn test_relative_links_resolve_against_the_page() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/docs/intro")
            .with_status(200)
            .with_body(r#"<a href="setup">Setup</a>"#)
            .create_async()
            .await;

        let base = server.url();
        let links = fetcher().fetch(&format!("{}/docs/intro", base)).await.unwrap();
        assert_eq!(links, vec![format!("{}/docs/setup", base)]);
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/missing")
            .with_status(404)
            .with_body("<a href='/never'>never</a>")
            .create_async()
            .await;

        let result = fetcher().fetch(&format!("{}/missing", server.url())).await;
        assert!(matches!(result, Err(FetchError::Status(404))));
    }

    #[tokio::test]
    async fn test_invalid_url_is_an_error() {
        let result = fetcher().fetch("not a url").await;
        assert!(matches!(result, Err(FetchError::InvalidUrl { .. })));
    }

    #[tokio::test]
    async fn test_custom_extractor() {
        fn no_links(_: &Url, _: &str) -> Vec<String> {
            Vec::new()
        }

        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .with_status(200)
            .with_body("<a href='/a'>a</a>")
            .create_async()
            .await;

        let fetcher = HttpFetcher::with_extractor(Duration::from_secs(5), no_links).unwrap();
        let links = fetcher.fetch(&format!("{}/", server.url())).await.unwrap();
        assert!(links.is_empty());
    }
}
