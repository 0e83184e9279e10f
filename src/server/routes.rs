// src/server/routes.rs
// =============================================================================
// HTTP routes for the request boundary.
//
// Endpoints:
// - GET  /ping  -> "pong", never touches the crawler
// - POST /parse -> {"domainName": "<seed>"} in, JSON array of addresses out
//
// The seed is checked against the seed pattern before anything is fetched.
// Every bad input (wrong body, missing field, rejected seed) gets one 400.
// =============================================================================

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;

use super::error::ApiError;
use crate::checker::{Fetcher, PageResolver};
use crate::crawl::{traverse, ResultSet};
use crate::seed::is_valid_seed;

/// Shared by every request. Holds no traversal state: each request builds
/// its own queue and visited set inside `traverse`.
pub struct AppState<F> {
    pub resolver: PageResolver<F>,
}

/// Builds the router with `/ping` and `/parse`.
pub fn router<F: Fetcher + 'static>(state: Arc<AppState<F>>) -> Router {
    Router::new()
        .route("/ping", get(ping))
        .route("/parse", post(parse::<F>))
        .with_state(state)
}

async fn ping() -> &'static str {
    "pong"
}

// Crawls from `domainName` and answers the discovered addresses.
// An unreadable body is treated like a missing field.
async fn parse<F: Fetcher + 'static>(
    State(state): State<Arc<AppState<F>>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ResultSet>, ApiError> {
    let Ok(Json(body)) = payload else {
        return Err(ApiError::InvalidInput);
    };

    let seed = body
        .get("domainName")
        .and_then(Value::as_str)
        .filter(|seed| is_valid_seed(seed))
        .ok_or(ApiError::InvalidInput)?;

    tracing::info!(seed, "parse requested");

    let result = traverse(&state.resolver, seed)
        .await
        .map_err(|source| ApiError::CrawlFailed {
            seed: seed.to_string(),
            source,
        })?;

    Ok(Json(result))
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why is the handler generic over F?
//    - Tests plug in a scripted fetcher, the binary plugs in HttpFetcher
//    - axum needs the state type to be known, so the route is registered
//      as parse::<F>
//
// 2. Why Result<Json<Value>, JsonRejection> instead of Json<Value>?
//    - A plain Json extractor answers bad bodies with its own status and
//      text. Taking the rejection ourselves keeps the fixed 400 message.
//
// 3. What state is shared between requests?
//    - Only the resolver (and its HTTP client). Each call to traverse
//      owns its queue and visited set.
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;
    use crate::checker::LinkExtractor;
    use crate::testutil::{MockFetcher, MockResponse};

    const SEED: &str = "http://site.test/";

    fn app(fetcher: &MockFetcher) -> Router {
        router(Arc::new(AppState {
            resolver: PageResolver::new(fetcher.clone(), LinkExtractor::Pattern),
        }))
    }

    fn parse_request(body: &str) -> Request<Body> {
        Request::post("/parse")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn ping_returns_pong() {
        let fetcher = MockFetcher::new();

        let response = app(&fetcher)
            .oneshot(Request::get("/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"pong");
        assert!(fetcher.calls().is_empty());
    }

    #[tokio::test]
    async fn parse_returns_discovered_addresses() {
        let fetcher = MockFetcher::new()
            .page(SEED, &["http://site.test/a", "http://site.test/gone"])
            .page("http://site.test/a", &[SEED]);

        let response = app(&fetcher)
            .oneshot(parse_request(r#"{"domainName": "http://site.test/"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            serde_json::json!(["http://site.test/", "http://site.test/a"])
        );
    }

    #[tokio::test]
    async fn parse_rejects_invalid_seed_without_crawling() {
        let fetcher = MockFetcher::new();

        let response = app(&fetcher)
            .oneshot(parse_request(r#"{"domainName": "not-a-url"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "message": "Invalid `domainName` was provided" })
        );
        assert!(fetcher.calls().is_empty());
    }

    #[tokio::test]
    async fn parse_rejects_missing_or_non_string_field() {
        let fetcher = MockFetcher::new();

        for body in [r#"{}"#, r#"{"domainName": 42}"#, r#"["http://site.test/"]"#, "{oops"] {
            let response = app(&fetcher).oneshot(parse_request(body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
        }
        assert!(fetcher.calls().is_empty());
    }

    #[tokio::test]
    async fn parse_rejects_non_json_content_type() {
        let fetcher = MockFetcher::new();

        let response = app(&fetcher)
            .oneshot(
                Request::post("/parse")
                    .header("content-type", "text/plain")
                    .body(Body::from(r#"{"domainName": "http://site.test/"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(fetcher.calls().is_empty());
    }

    #[tokio::test]
    async fn parse_returns_empty_array_when_seed_is_dead() {
        let fetcher = MockFetcher::new().respond(SEED, vec![MockResponse::status(503)]);

        let response = app(&fetcher)
            .oneshot(parse_request(r#"{"domainName": "http://site.test/"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, serde_json::json!([]));
    }

    #[tokio::test]
    async fn parse_fault_returns_500_and_server_keeps_serving() {
        let fetcher = MockFetcher::new()
            .page(SEED, &["http://site.test/broken"])
            .respond("http://site.test/broken", vec![MockResponse::Fault])
            .page("http://other.test/", &[]);
        let app = app(&fetcher);

        let response = app
            .clone()
            .oneshot(parse_request(r#"{"domainName": "http://site.test/"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "message": "'http://site.test/' parsing failed" })
        );

        let response = app
            .oneshot(parse_request(r#"{"domainName": "http://other.test/"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, serde_json::json!(["http://other.test/"]));
    }
}
