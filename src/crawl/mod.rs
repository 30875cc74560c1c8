// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Depth-limited crawling starting from a seed URL
// - Same-domain restriction: links to other sites are recorded, not followed
// - A shared visited store so no page is fetched twice
// - Sequential (reproducible) or bounded-concurrent traversal
//
// Submodules:
// - store: The concurrency-safe visited set and first-claim order
// - domain: The same-domain check
// - engine: The crawl itself
// =============================================================================

mod domain;
mod engine;
mod store;

pub use engine::{CrawlConfig, CrawlMode, CrawlReport, Crawler};
