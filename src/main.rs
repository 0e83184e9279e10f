// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Load a .env file (if any) and set up logging
// 2. Parse command-line arguments using clap
// 3. Dispatch to the appropriate subcommand handler
// 4. Exit with proper code (0 = success, 1 = something was rejected or
//    failed, 2 = unexpected error)
//
// Logs go to stderr, results to stdout, so `--json` output can be piped.
// =============================================================================

mod checker; // src/checker/ - fetch adapter, link extraction, page resolver
mod cli; // src/cli.rs - command-line parsing
mod config; // src/config.rs - fetch options
mod crawl; // src/crawl/ - breadth-first traversal
mod error; // src/error.rs - crawl error types
mod seed; // src/seed.rs - seed address validation
mod server; // src/server/ - /parse and /ping endpoints

#[cfg(test)]
mod testutil;

use anyhow::{Context, Result};
use clap::Parser;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use checker::{FetchOutcome, HttpFetcher, LinkExtractor, PageResolver};
use cli::{Cli, Commands, FetchArgs};
use crawl::ResultSet;

#[tokio::main]
async fn main() {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();
    init_tracing();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("link_frontier=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Crawl {
            seeds,
            json,
            concurrency,
            extractor,
            fetch,
        } => handle_crawl(seeds, json, concurrency, extractor, &fetch).await,
        Commands::Resolve {
            address,
            json,
            extractor,
            fetch,
        } => handle_resolve(&address, json, extractor, &fetch).await,
        Commands::Serve {
            host,
            port,
            extractor,
            fetch,
        } => {
            let resolver = build_resolver(extractor, &fetch)?;
            let addr = format!("{host}:{port}");
            server::serve(resolver, &addr)
                .await
                .with_context(|| format!("server on {addr} failed"))?;
            Ok(0)
        }
    }
}

fn build_resolver(extractor: LinkExtractor, fetch: &FetchArgs) -> Result<PageResolver<HttpFetcher>> {
    let fetcher = HttpFetcher::new(&fetch.to_config()).context("could not build HTTP client")?;
    Ok(PageResolver::new(fetcher, extractor))
}

// What happened to one seed on the command line
#[derive(Debug, Serialize)]
struct SeedReport {
    seed: String,
    #[serde(flatten)]
    status: SeedStatus,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum SeedStatus {
    /// Traversal ran to completion
    Crawled { addresses: ResultSet },
    /// The seed failed validation and was never fetched
    Rejected { message: String },
    /// A fault stopped the traversal
    Failed { message: String },
}

impl SeedReport {
    fn is_ok(&self) -> bool {
        matches!(self.status, SeedStatus::Crawled { .. })
    }
}

// Crawls every seed as its own traversal, `concurrency` at a time.
// Reports come back in the same order as the seeds.
async fn handle_crawl(
    seeds: Vec<String>,
    json: bool,
    concurrency: usize,
    extractor: LinkExtractor,
    fetch: &FetchArgs,
) -> Result<i32> {
    let resolver = build_resolver(extractor, fetch)?;

    let reports: Vec<SeedReport> = stream::iter(seeds)
        .map(|seed| crawl_seed(&resolver, seed))
        .buffered(concurrency.max(1))
        .collect()
        .await;

    print_reports(&reports, json)?;

    if reports.iter().all(SeedReport::is_ok) {
        Ok(0)
    } else {
        Ok(1)
    }
}

async fn crawl_seed(resolver: &PageResolver<HttpFetcher>, seed: String) -> SeedReport {
    if let Some(e) = crate::seed::validate_seed(&seed).err() {
        tracing::warn!(seed = %seed, "seed rejected");
        return SeedReport {
            status: SeedStatus::Rejected {
                message: e.to_string(),
            },
            seed,
        };
    }

    let status = match crawl::traverse(resolver, &seed).await {
        Ok(addresses) => SeedStatus::Crawled { addresses },
        Err(e) => {
            tracing::error!(seed = %seed, error = %e, "parsing failed");
            SeedStatus::Failed {
                message: e.to_string(),
            }
        }
    };

    SeedReport { seed, status }
}

fn print_reports(reports: &[SeedReport], json: bool) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(reports)?;
        println!("{}", json_output);
        return Ok(());
    }

    for report in reports {
        match &report.status {
            SeedStatus::Crawled { addresses } if addresses.is_empty() => {
                println!("⚠️  {}: seed did not resolve, nothing crawled", report.seed)
            }
            SeedStatus::Crawled { addresses } => {
                println!("✅ {} ({} page(s))", report.seed, addresses.len());
                for address in addresses.iter() {
                    println!("   {}", address);
                }
            }
            SeedStatus::Rejected { message } => println!("⚠️  {}: {}", report.seed, message),
            SeedStatus::Failed { message } => println!("❌ {}: {}", report.seed, message),
        }
    }

    Ok(())
}

async fn handle_resolve(
    address: &str,
    json: bool,
    extractor: LinkExtractor,
    fetch: &FetchArgs,
) -> Result<i32> {
    let resolver = build_resolver(extractor, fetch)?;
    let outcome = resolver
        .resolve(address)
        .await
        .with_context(|| format!("could not resolve {address}"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        match &outcome {
            FetchOutcome::Valid { links } => {
                println!("✅ {} is valid, {} link(s)", address, links.len());
                for link in links {
                    println!("   {}", link);
                }
            }
            FetchOutcome::Invalid => println!("❌ {} is invalid", address),
        }
    }

    Ok(if outcome.is_valid() { 0 } else { 1 })
}
