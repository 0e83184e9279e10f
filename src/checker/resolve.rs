// src/checker/resolve.rs
// =============================================================================
// The page resolver turns one address into a classified outcome.
//
// How it works:
// 1. Fetch the address
// 2. 404            -> Invalid, no retry
// 3. 200            -> read the body, extract links, Valid
// 4. anything else  -> try once more; still not 200 -> Invalid
//
// At most two fetches happen per call. A transport fault (no status at
// all) is not classified: it comes back as Err and the caller decides.
// =============================================================================

use serde::Serialize;

use super::html::LinkExtractor;
use super::http::{classify_status, FetchedPage, Fetcher, StatusClass};
use crate::error::Result;

/// Total fetch attempts per resolve, first try included
pub const MAX_ATTEMPTS: u32 = 2;

/// What the resolver concluded about one address
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FetchOutcome {
    /// Fetched with 200; carries the extracted links in document order
    Valid { links: Vec<String> },
    /// Not found, or still failing after the retry
    Invalid,
}

impl FetchOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, FetchOutcome::Valid { .. })
    }
}

/// Combines a fetch adapter with the retry policy and a link extractor
#[derive(Debug, Clone)]
pub struct PageResolver<F> {
    fetcher: F,
    extractor: LinkExtractor,
}

impl<F: Fetcher> PageResolver<F> {
    pub fn new(fetcher: F, extractor: LinkExtractor) -> Self {
        Self { fetcher, extractor }
    }

    /// Resolves `url` into `Valid { links }` or `Invalid`.
    ///
    /// Returns `Err` only for faults the fetch adapter could not turn into a
    /// status, and for a body that could not be read.
    pub async fn resolve(&self, url: &str) -> Result<FetchOutcome> {
        let mut attempts_left = MAX_ATTEMPTS;

        loop {
            let page = self.fetcher.fetch(url).await?;
            let status = page.status();

            match classify_status(status) {
                StatusClass::NotFound => {
                    tracing::debug!(url, "not found");
                    return Ok(FetchOutcome::Invalid);
                }
                StatusClass::Success => {
                    let body = page.text().await?;
                    let links = self.extractor.extract(&body, url);
                    tracing::debug!(url, links = links.len(), "valid");
                    return Ok(FetchOutcome::Valid { links });
                }
                StatusClass::Transient => {
                    attempts_left -= 1;
                    if attempts_left == 0 {
                        tracing::debug!(url, status = status.as_u16(), "giving up");
                        return Ok(FetchOutcome::Invalid);
                    }
                    tracing::debug!(url, status = status.as_u16(), attempts_left, "retrying");
                }
            }
        }
    }
}
