// src/fetch/extract.rs
// =============================================================================
// This module extracts links from HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// Every link is turned into an absolute URL without query string or
// fragment, so "/docs?page=2#top" on https://example.com/ becomes
// "https://example.com/docs". A page never lists itself and never lists the
// same URL twice.
// =============================================================================

use scraper::{Html, Selector};
use std::collections::HashSet;
use tracing::debug;
use url::Url;

// Signature of a link extractor: (page URL, page body) -> absolute URLs.
// The HTTP fetcher takes one of these so the extraction step can be replaced.
pub type LinkExtractor = fn(&Url, &str) -> Vec<String>;

// Extracts all links from HTML content
//
// Parameters:
//   base: the URL of the page (for resolving relative links)
//   html: the HTML content to parse
//
// Returns: absolute URLs in document order, first occurrence wins
//
// Example:
//   html = "<a href='/docs'>Docs</a><a href='/docs#intro'>Intro</a>"
//   base = "https://example.com"
//   result = ["https://example.com/docs"]
pub fn extract_links(base: &Url, html: &str) -> Vec<String> {
    let mut links = Vec::new();

    // HTML attribute names are case-insensitive, so this also matches <A HREF>
    let selector = match Selector::parse("a[href]") {
        Ok(selector) => selector,
        Err(e) => {
            debug!(error = ?e, "invalid link selector");
            return links;
        }
    };

    let document = Html::parse_document(html);
    let own_url = strip(base.clone());
    let mut seen = HashSet::new();

    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        let absolute_url = match resolve_url(base, href) {
            Some(url) => url,
            None => continue,
        };

        if absolute_url == own_url {
            continue;
        }

        if seen.insert(absolute_url.clone()) {
            links.push(absolute_url);
        }
    }

    links
}

// Resolves a possibly-relative href to an absolute URL without query/fragment
//
// Examples:
//   base = "https://example.com/page"
//   href = "/docs"              -> Some("https://example.com/docs")
//   href = "../other?x=1"       -> Some("https://example.com/other")
//   href = "https://other.com"  -> Some("https://other.com/")
//   href = "#section"           -> None
//   href = ""                   -> None
fn resolve_url(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    match base.join(href) {
        Ok(url) => Some(strip(url)),
        Err(e) => {
            debug!(base = %base, href, error = %e, "failed to build URL");
            None
        }
    }
}

fn strip(mut url: Url) -> String {
    url.set_query(None);
    url.set_fragment(None);
    url.to_string()
}
