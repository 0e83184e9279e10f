// src/checker/mod.rs
// =============================================================================
// This module turns a single address into a classified outcome.
//
// Submodules:
// - http: the fetch adapter (one network attempt, status + lazy body)
// - html: extracts candidate addresses from a page body
// - resolve: the page resolver (retry policy + extraction)
//
// The traversal in crate::crawl only ever talks to PageResolver.
// =============================================================================

mod html;
mod http;
mod resolve;

pub use html::LinkExtractor;
pub use http::{Fetcher, HttpFetcher};
pub use resolve::{FetchOutcome, PageResolver};

// Only the test fetcher needs to name the page trait from outside
#[cfg(test)]
pub use http::FetchedPage;
