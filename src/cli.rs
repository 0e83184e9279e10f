// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Subcommands:
// - crawl:   breadth-first discovery from one or more seeds
// - resolve: classify a single address without crawling
// - serve:   run the /parse and /ping HTTP endpoints
//
// Every fetch and server option can also come from an environment variable
// (or a .env file, which main loads before parsing).
// =============================================================================

use clap::{Args, Parser, Subcommand};

use crate::checker::LinkExtractor;
use crate::config::FetchConfig;

#[derive(Parser, Debug)]
#[command(
    name = "link-frontier",
    version,
    about = "Discover every page reachable from a seed address",
    long_about = "link-frontier fetches a seed page, follows its links breadth-first and \
                  reports every address that answered 200. Not-found pages are dropped, \
                  other failures get one retry."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl from one or more seeds
    ///
    /// Example: link-frontier crawl https://example.com --json
    Crawl {
        /// Seed addresses (http, https, ftp or ftps)
        #[arg(required = true)]
        seeds: Vec<String>,

        /// Output results in JSON format instead of a table
        #[arg(long)]
        json: bool,

        /// How many seeds to crawl at the same time
        ///
        /// Each seed gets its own traversal; pages inside one traversal
        /// are still fetched one after another.
        #[arg(long, default_value_t = 4)]
        concurrency: usize,

        /// Link extraction strategy
        #[arg(long, value_enum, default_value_t = LinkExtractor::Pattern)]
        extractor: LinkExtractor,

        #[command(flatten)]
        fetch: FetchArgs,
    },

    /// Resolve a single address and show its outcome and links
    ///
    /// Example: link-frontier resolve https://example.com/about
    Resolve {
        /// Address to fetch (not validated, used as-is)
        address: String,

        /// Output the outcome as JSON
        #[arg(long)]
        json: bool,

        /// Link extraction strategy
        #[arg(long, value_enum, default_value_t = LinkExtractor::Pattern)]
        extractor: LinkExtractor,

        #[command(flatten)]
        fetch: FetchArgs,
    },

    /// Serve POST /parse and GET /ping
    ///
    /// Example: link-frontier serve --port 3000
    Serve {
        /// Interface to bind
        #[arg(long, env = "LINK_FRONTIER_HOST", default_value = "0.0.0.0")]
        host: String,

        /// Port to listen on
        #[arg(long, env = "LINK_FRONTIER_PORT", default_value_t = 3000)]
        port: u16,

        /// Link extraction strategy
        #[arg(long, value_enum, default_value_t = LinkExtractor::Pattern)]
        extractor: LinkExtractor,

        #[command(flatten)]
        fetch: FetchArgs,
    },
}

/// Options shared by every subcommand that fetches pages
#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Per-request timeout in seconds (0 or unset = wait forever)
    #[arg(long, env = "LINK_FRONTIER_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// User-Agent header sent with every request
    #[arg(long, env = "LINK_FRONTIER_USER_AGENT")]
    pub user_agent: Option<String>,
}

impl FetchArgs {
    pub fn to_config(&self) -> FetchConfig {
        FetchConfig::from_args(self.timeout_secs, self.user_agent.clone())
    }
}
