// src/seed.rs
// =============================================================================
// Seed address validation for the request boundary.
//
// A seed must look like:  scheme://host[:port][/path][?query]
// - scheme is http, https, ftp or ftps
// - host starts and ends with an ASCII letter or digit; dots, hyphens and
//   underscores are allowed in between
// - path and query come from a small fixed character set (no spaces, no
//   quotes other than ', no angle brackets)
//
// Only the seed is checked. Addresses discovered during the crawl are
// opaque strings and never go through here.
// =============================================================================

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{CrawlError, Result};

static SEED_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(ht|f)tp(s?)://",
        r"[0-9a-zA-Z]([-._0-9a-zA-Z]*[0-9a-zA-Z])*",
        r"(:[0-9]*)*",
        r"(/?)",
        r"([a-zA-Z0-9\-.?,'/\\+&amp;%$#_]*)",
        r"(\?[a-zA-Z0-9\-.?,'/\\+&amp;%$#=_]*)?$",
    ))
    .expect("seed pattern is a valid constant")
});

/// True if `candidate` is acceptable as a crawl seed
pub fn is_valid_seed(candidate: &str) -> bool {
    SEED_PATTERN.is_match(candidate)
}

/// Returns the seed back, or `CrawlError::InvalidSeed`
pub fn validate_seed(candidate: &str) -> Result<&str> {
    if is_valid_seed(candidate) {
        Ok(candidate)
    } else {
        Err(CrawlError::InvalidSeed(candidate.to_string()))
    }
}
