// src/crawl/engine.rs
// =============================================================================
// This module implements the depth-limited crawl.
//
// How it works:
// 1. Claim the URL in the visited store (skip it if someone else already did)
// 2. If depth is used up, stop: the URL is visited but not fetched
// 3. Fetch the page and get its links
// 4. Add every link as a child in the tree
// 5. Links on another domain are claimed but never followed
// 6. Links on the same domain are crawled one level deeper
//
// Two execution modes:
// - Sequential: children are crawled one after another (depth-first). The
//   visited order and the tree are the same on every run.
// - Concurrent: children of a page are crawled together. A semaphore caps how
//   many fetches are in flight; the permit is only held during the fetch.
//
// Every task waits for all of its children before it finishes, so when the
// root task returns the whole crawl is done.
//
// Rust concepts:
// - BoxFuture: Recursive async functions need a boxed future
// - Borrowing: Each task gets `&mut` to its own tree node only
// - CancellationToken: A shared "stop now" flag that can also be awaited
// =============================================================================

use futures::future::{self, BoxFuture, FutureExt};
use serde::Serialize;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::domain::same_domain;
use super::store::VisitedStore;
use crate::fetch::Fetcher;
use crate::tree::{attach_all, TraversalNode};

const DEFAULT_MAX_IN_FLIGHT: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlMode {
    /// Depth-first, one page at a time; reproducible output
    Sequential,
    /// Sibling pages are crawled together, at most `max_in_flight` fetches at once
    Concurrent { max_in_flight: usize },
}

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    // Number of link hops to follow from the seed (0 = only the seed)
    pub max_depth: usize,
    pub record_tree: bool,
    pub mode: CrawlMode,
    // Stop starting new fetches once this much time has passed
    pub deadline: Option<Duration>,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_depth: 2,
            record_tree: false,
            mode: CrawlMode::Concurrent {
                max_in_flight: DEFAULT_MAX_IN_FLIGHT,
            },
            deadline: None,
        }
    }
}

// Everything a finished crawl produced
#[derive(Debug, Clone, Serialize)]
pub struct CrawlReport {
    pub seed: String,
    /// Every claimed URL, in first-claim order
    pub visited: Vec<String>,
    pub fetched: usize,
    pub failed: usize,
    pub cancelled: bool,
    pub elapsed_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree: Option<TraversalNode>,
}

pub struct Crawler<F> {
    fetcher: F,
    config: CrawlConfig,
    cancel: CancellationToken,
}

impl<F: Fetcher> Crawler<F> {
    pub fn new(fetcher: F, config: CrawlConfig) -> Self {
        Self {
            fetcher,
            config,
            cancel: CancellationToken::new(),
        }
    }

    // Cancelling this token stops every running and future crawl of this crawler
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    // Crawls from `seed` and returns once every spawned task has finished.
    //
    // Each call starts from an empty visited store, so runs are independent.
    // Failures of single pages never abort the crawl; they only show up as
    // pages without children and in the `failed` count.
    pub async fn run(&self, seed: &str) -> CrawlReport {
        let start = Instant::now();
        let cancel = self.cancel.child_token();

        let timer = self.config.deadline.map(|deadline| {
            let cancel = cancel.clone();
            tokio::spawn(async move {
                tokio::time::sleep(deadline).await;
                warn!(?deadline, "crawl deadline reached, no new fetches will start");
                cancel.cancel();
            })
        });

        let permits = match self.config.mode {
            CrawlMode::Sequential => None,
            CrawlMode::Concurrent { max_in_flight } => Some(Semaphore::new(max_in_flight.max(1))),
        };

        let walk = Walk {
            fetcher: &self.fetcher,
            store: VisitedStore::new(),
            permits,
            cancel,
            mode: self.config.mode,
        };

        info!(seed, max_depth = self.config.max_depth, mode = ?self.config.mode, "starting crawl");

        let mut root = self.config.record_tree.then(|| TraversalNode::new(seed));
        walk.visit(seed.to_string(), self.config.max_depth, root.as_mut())
            .await;

        if let Some(timer) = timer {
            timer.abort();
        }

        let report = CrawlReport {
            seed: seed.to_string(),
            visited: walk.store.snapshot(),
            fetched: walk.store.fetched(),
            failed: walk.store.failed(),
            cancelled: walk.cancel.is_cancelled(),
            elapsed_ms: start.elapsed().as_millis() as u64,
            tree: root,
        };

        info!(
            visited = walk.store.len(),
            fetched = report.fetched,
            failed = report.failed,
            elapsed_ms = report.elapsed_ms,
            "finished crawl"
        );

        report
    }
}

// State shared by all tasks of one run
struct Walk<'f, F> {
    fetcher: &'f F,
    store: VisitedStore,
    permits: Option<Semaphore>,
    cancel: CancellationToken,
    mode: CrawlMode,
}

impl<'f, F: Fetcher> Walk<'f, F> {
    // One crawl task: claim, fetch, expand
    fn visit<'a>(
        &'a self,
        url: String,
        depth: usize,
        node: Option<&'a mut TraversalNode>,
    ) -> BoxFuture<'a, ()> {
        async move {
            if !self.store.claim(&url) {
                debug!(url = %url, depth, "URL already crawled. Skipping");
                return;
            }

            if depth < 1 {
                debug!(url = %url, "Max depth reached. Skipping");
                return;
            }

            let Some(links) = self.fetch(&url).await else {
                return;
            };

            self.expand(&url, depth, links, node).await;
        }
        .boxed()
    }

    // Returns None when the page produced no links to follow (error or cancel)
    async fn fetch(&self, url: &str) -> Option<Vec<String>> {
        if self.cancel.is_cancelled() {
            debug!(url, "crawl cancelled, not fetching");
            return None;
        }

        // Held until the end of this function, i.e. only for the fetch itself
        let _permit = match &self.permits {
            Some(permits) => tokio::select! {
                permit = permits.acquire() => permit.ok(),
                _ = self.cancel.cancelled() => return None,
            },
            None => None,
        };

        info!(url, "crawling page");
        let result = tokio::select! {
            result = self.fetcher.fetch(url) => result,
            _ = self.cancel.cancelled() => {
                debug!(url, "crawl cancelled, abandoning fetch");
                return None;
            }
        };

        match result {
            Ok(links) => {
                self.store.mark_fetched();
                Some(links)
            }
            Err(e) => {
                self.store.mark_failed();
                warn!(url, error = %e, "failed to fetch URL");
                None
            }
        }
    }

    async fn expand(
        &self,
        url: &str,
        depth: usize,
        links: Vec<String>,
        node: Option<&mut TraversalNode>,
    ) {
        let slots = attach_all(node, &links);
        let mut children = Vec::new();

        for (link, slot) in links.iter().zip(slots) {
            // Compared with the page that linked here, not with the seed
            if !same_domain(url, link) {
                self.store.claim(link);
                debug!(url, child_url = %link, "Child URL not part of the domain. Skipping.");
                continue;
            }

            let child = self.visit(link.clone(), depth - 1, slot);
            match self.mode {
                CrawlMode::Sequential => child.await,
                CrawlMode::Concurrent { .. } => children.push(child),
            }
        }

        future::join_all(children).await;
    }
}
