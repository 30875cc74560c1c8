// src/crawl/store.rs
// =============================================================================
// The visited store: the one piece of state shared by every crawl task.
//
// It remembers:
// - Which URLs have been claimed (HashSet, O(1) lookup)
// - The order in which they were first claimed (Vec, used for the sitemap)
// - How many of them were actually fetched, and how many fetches failed
//
// Every read and write goes through a single Mutex, so `claim` is atomic:
// when two tasks race on the same URL exactly one of them gets `true`.
//
// Rust concepts:
// - Interior mutability: Mutex lets us mutate through a shared &VisitedStore
// - Poisoning: a Mutex remembers if a thread panicked while holding it
// =============================================================================

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct Inner {
    seen: HashSet<String>,
    order: Vec<String>,
    fetched: usize,
    failed: usize,
}

// Concurrency-safe set + sequence of URLs for one crawl run
#[derive(Debug, Default)]
pub struct VisitedStore {
    inner: Mutex<Inner>,
}

impl VisitedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `url` if it has not been seen yet.
    ///
    /// Returns true only for the call that performed the insertion.
    pub fn claim(&self, url: &str) -> bool {
        let mut inner = self.lock();
        if inner.seen.contains(url) {
            return false;
        }
        inner.seen.insert(url.to_string());
        inner.order.push(url.to_string());
        true
    }

    // Records that a claimed URL was fetched successfully
    pub fn mark_fetched(&self) {
        self.lock().fetched += 1;
    }

    // Records that a claimed URL was attempted but the fetch failed
    pub fn mark_failed(&self) {
        self.lock().failed += 1;
    }

    // Returns the URLs in first-claim order
    pub fn snapshot(&self) -> Vec<String> {
        self.lock().order.clone()
    }

    pub fn len(&self) -> usize {
        self.lock().order.len()
    }

    pub fn fetched(&self) -> usize {
        self.lock().fetched
    }

    pub fn failed(&self) -> usize {
        self.lock().failed
    }

    // Every critical section above leaves Inner consistent, so a poisoned
    // lock still holds valid data.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why std::sync::Mutex and not tokio::sync::Mutex?
//    - The lock is never held across an .await
//    - Each critical section is a couple of HashSet/Vec operations
//    - A blocking lock that is released immediately is fine inside async code
//
// 2. Why return the order as a clone?
//    - The caller gets an owned Vec it can keep after the store is dropped
//    - The lock is released as soon as snapshot() returns
// -----------------------------------------------------------------------------
