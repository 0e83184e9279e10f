// src/checker/http.rs
// =============================================================================
// This module is the fetch adapter: one network attempt per call.
//
// Key functionality:
// - The `Fetcher` trait: give it an address, get back a status code and a
//   way to read the body as text (only read when the caller needs it)
// - `HttpFetcher`: the reqwest implementation used by the CLI and server
// - `classify_status`: sorts a status into success / not-found / transient
//
// No retries and no parsing happen here. Those belong to the resolver.
//
// Rust concepts:
// - Traits with async methods (return-position `impl Future`)
// - Associated types: each fetcher picks its own page type
// =============================================================================

use std::future::Future;

use reqwest::{redirect, Client, Response, StatusCode};

use crate::config::FetchConfig;
use crate::error::{CrawlError, Result};

/// A response whose status is known and whose body has not been read yet
pub trait FetchedPage: Send {
    fn status(&self) -> StatusCode;

    /// Consumes the page and reads the whole body as text
    fn text(self) -> impl Future<Output = Result<String>> + Send;
}

/// Performs a single retrieval attempt for an address.
///
/// Implementations must not retry. A transport fault (nothing came back)
/// is an `Err`; any status at all, including 404 and 5xx, is an `Ok`.
pub trait Fetcher: Send + Sync {
    type Page: FetchedPage;

    fn fetch(&self, url: &str) -> impl Future<Output = Result<Self::Page>> + Send;
}

/// How the resolver should treat a status code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// 200 OK: read the body and extract links
    Success,
    /// 404 Not Found: definitive, never retried
    NotFound,
    /// Anything else: worth one more try
    Transient,
}

/// Sorts a status code into one of the three classes.
///
/// Only a plain 200 counts as success; a 204 or 206 is retried like a 5xx.
pub fn classify_status(status: StatusCode) -> StatusClass {
    match status {
        StatusCode::OK => StatusClass::Success,
        StatusCode::NOT_FOUND => StatusClass::NotFound,
        _ => StatusClass::Transient,
    }
}

/// Fetch adapter backed by a shared reqwest client
///
/// Cloning is cheap: the client is reference counted internally, so the
/// server hands the same connection pool to every request.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(config.user_agent.as_str())
            .redirect(redirect::Policy::limited(config.max_redirects));

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(CrawlError::Client)?;
        Ok(Self { client })
    }
}

/// A reqwest response paired with the address it came from
#[derive(Debug)]
pub struct HttpPage {
    url: String,
    response: Response,
}

impl FetchedPage for HttpPage {
    fn status(&self) -> StatusCode {
        self.response.status()
    }

    async fn text(self) -> Result<String> {
        let url = self.url;
        self.response
            .text()
            .await
            .map_err(|e| CrawlError::body(url, e))
    }
}

impl Fetcher for HttpFetcher {
    type Page = HttpPage;

    async fn fetch(&self, url: &str) -> Result<HttpPage> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CrawlError::fetch(url, e))?;

        tracing::trace!(url, status = response.status().as_u16(), "fetched");

        Ok(HttpPage {
            url: url.to_string(),
            response,
        })
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why is the body behind `text()` instead of returned right away?
//    - A 404 or 503 body is never looked at
//    - Reading it would cost a download for nothing
//    - `text(self)` consumes the page, so a body can only be read once
//
// 2. What does `impl Future<Output = ...> + Send` in a trait mean?
//    - Each implementation writes a plain `async fn`
//    - The `+ Send` bound lets axum run the crawl on any worker thread
//
// 3. Why not `error_for_status()`?
//    - That would turn 404 into an Err, and a 404 is a classification,
//      not a fault. Faults propagate; statuses get classified.
// -----------------------------------------------------------------------------
