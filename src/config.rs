// src/config.rs
// =============================================================================
// Fetch configuration shared by the `crawl` and `serve` subcommands.
//
// Values come from CLI flags, which in turn fall back to environment
// variables (see cli.rs). A .env file is loaded in main before parsing.
// =============================================================================

use std::time::Duration;

/// Default User-Agent sent with every fetch
pub const DEFAULT_USER_AGENT: &str = concat!("link-frontier/", env!("CARGO_PKG_VERSION"));

/// reqwest follows up to 10 redirects unless told otherwise
pub const DEFAULT_MAX_REDIRECTS: usize = 10;

/// Options for building the HTTP fetch adapter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// Per-request timeout. None means wait forever.
    pub timeout: Option<Duration>,
    pub user_agent: String,
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }
}

impl FetchConfig {
    /// Builds a config from the raw CLI values.
    ///
    /// A timeout of 0 seconds is treated as "no timeout".
    pub fn from_args(timeout_secs: Option<u64>, user_agent: Option<String>) -> Self {
        Self {
            timeout: timeout_secs
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
            user_agent: user_agent.unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            ..Self::default()
        }
    }
}
