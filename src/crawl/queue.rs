// src/crawl/queue.rs
// =============================================================================
// This module implements the breadth-first traversal (the frontier engine).
//
// How it works:
// 1. Start with the seed alone in a queue
// 2. Pop the head; skip it if it is already in the visited set
// 3. Ask the page resolver about it
// 4. Valid: mark it visited and append every extracted link to the tail
//    Invalid: drop it (it is NOT marked visited)
// 5. Repeat until the queue is empty
//
// The queue and visited set live on the stack of one `traverse` call, so
// any number of traversals can run side by side without sharing anything.
//
// Known behaviour kept on purpose:
// - Addresses are compared as plain strings ("/a" and "/a/" differ)
// - An invalid address is fetched again for every extra time it is queued
//
// Rust concepts:
// - VecDeque: FIFO queue with cheap push_back / pop_front
// - HashSet: O(1) "have we seen this?" checks
// =============================================================================

use std::collections::{HashSet, VecDeque};

use serde::Serialize;

use crate::checker::{FetchOutcome, Fetcher, PageResolver};
use crate::error::Result;

/// Addresses that resolved valid, in the order they were first visited.
///
/// Callers should treat this as a set; the order is kept only so output is
/// stable from run to run. Serializes as a plain JSON array of strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResultSet {
    addresses: Vec<String>,
}

impl ResultSet {
    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.addresses.iter().map(String::as_str)
    }

    #[cfg(test)]
    pub fn into_vec(self) -> Vec<String> {
        self.addresses
    }
}

/// Crawls breadth-first from `seed` and returns every address that resolved
/// valid.
///
/// An `Err` from the resolver (a transport fault) aborts the whole traversal
/// and no partial result is returned.
#[tracing::instrument(skip(resolver))]
pub async fn traverse<F: Fetcher>(resolver: &PageResolver<F>, seed: &str) -> Result<ResultSet> {
    let mut queue = VecDeque::from([seed.to_string()]);
    let mut visited = HashSet::new();
    let mut result = ResultSet::default();
    let mut resolved = 0usize;

    while let Some(current) = queue.pop_front() {
        // Dedup before fetch: a confirmed page is never fetched again
        if visited.contains(&current) {
            tracing::trace!(url = %current, "already visited");
            continue;
        }

        tracing::debug!(url = %current, queued = queue.len(), "resolving");
        resolved += 1;

        match resolver.resolve(&current).await? {
            FetchOutcome::Valid { links } => {
                queue.extend(links);
                visited.insert(current.clone());
                result.addresses.push(current);
            }
            FetchOutcome::Invalid => {}
        }
    }

    tracing::info!(visited = result.len(), resolved, "traversal finished");
    Ok(result)
}
