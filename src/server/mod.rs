// src/server/mod.rs
// =============================================================================
// The HTTP boundary around the crawler.
//
// Endpoints:
// - GET  /ping   -> "pong" (liveness, no crawling involved)
// - POST /parse  -> {"domainName": "<seed>"} in, JSON array of addresses out
//
// A bad seed gets a 400 before any fetch happens. A fault during the crawl
// is logged and answered with a 500; the server itself keeps running.
// =============================================================================

mod error;
mod routes;

use std::sync::Arc;

use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::checker::{Fetcher, PageResolver};
use crate::error::Result;

pub use routes::{router, AppState};

/// Serves the endpoints on `addr` until Ctrl-C is pressed
pub async fn serve<F: Fetcher + 'static>(resolver: PageResolver<F>, addr: &str) -> Result<()> {
    let app = router(Arc::new(AppState { resolver })).layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("The server is running on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => {
            // Without a signal handler, run until the process is killed
            tracing::error!(error = %e, "could not listen for Ctrl-C");
            std::future::pending::<()>().await
        }
    }
}
