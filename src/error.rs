// src/error.rs
// =============================================================================
// Error types for the crawl core.
//
// Only genuine faults live here. HTTP status codes (404, 500, ...) are not
// errors: the page resolver turns them into a valid/invalid outcome. What
// ends up in CrawlError is something the crawl could not classify, like a
// refused connection or a body that could not be read.
// =============================================================================

use thiserror::Error;

/// Result type alias for crawl operations.
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Transport errors are boxed so any fetch adapter can report its own kind.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum CrawlError {
    /// The request never produced a status (connection refused, DNS, TLS...)
    #[error("fetch failed for {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: BoxError,
    },

    /// A success status arrived but the body could not be read as text
    #[error("could not read body of {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: BoxError,
    },

    /// The seed failed the address pattern
    #[error("invalid seed address: {0}")]
    InvalidSeed(String),

    /// Building the HTTP client failed
    #[error("HTTP client setup failed: {0}")]
    Client(#[source] reqwest::Error),

    /// Binding or serving the HTTP endpoint failed
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

impl CrawlError {
    pub fn fetch(url: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Fetch {
            url: url.into(),
            source: source.into(),
        }
    }

    pub fn body(url: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Body {
            url: url.into(),
            source: source.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_seed_message() {
        let err = CrawlError::InvalidSeed("not-a-url".to_string());
        assert_eq!(err.to_string(), "invalid seed address: not-a-url");
    }

    #[test]
    fn test_fetch_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = CrawlError::fetch("http://a.test", io);
        assert_eq!(err.to_string(), "fetch failed for http://a.test: refused");
        assert!(std::error::Error::source(&err).is_some());
    }
}
