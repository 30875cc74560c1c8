// src/fetch/mod.rs
// =============================================================================
// This module turns a URL into the list of links found on that page.
//
// Submodules:
// - http: Downloads a page with reqwest
// - extract: Pulls absolute links out of an HTML document
//
// The crawler only sees the `Fetcher` trait, so tests can swap in a canned
// in-memory implementation and never touch the network.
//
// Rust concepts:
// - Traits: A shared interface (like an interface in Java/Go)
// - async_trait: Lets a trait have async methods usable behind generics
// - thiserror: Derives std::error::Error for our own error enum
// =============================================================================

mod extract;
mod http;

use async_trait::async_trait;
use thiserror::Error;

pub use extract::{extract_links, LinkExtractor};
pub use http::HttpFetcher;

// Everything that can go wrong while fetching a single page.
//
// The crawler never looks at the variant: any error means "no links here".
#[derive(Debug, Error)]
pub enum FetchError {
    /// The URL could not be parsed
    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    /// The request took longer than the configured timeout
    #[error("request timed out")]
    Timeout,
    /// Connection, DNS, TLS or redirect failure
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The server answered with a non-2xx status
    #[error("HTTP {0}")]
    Status(u16),
    /// The body could not be read as text
    #[error("failed to read body: {0}")]
    Body(String),
}

// Anything that can list the links on a page
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<String>, FetchError>;
}

// Lets a crawler borrow a fetcher instead of owning it
#[async_trait]
impl<T: Fetcher + ?Sized> Fetcher for &T {
    async fn fetch(&self, url: &str) -> Result<Vec<String>, FetchError> {
        (**self).fetch(url).await
    }
}
