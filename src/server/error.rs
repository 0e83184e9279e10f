// src/server/error.rs
// =============================================================================
// Error responses for the HTTP boundary.
//
// Two cases only:
// - InvalidInput -> 400 {"message": "Invalid `domainName` was provided"}
// - CrawlFailed  -> 500 {"message": "'<seed>' parsing failed"}, logged
//
// The underlying CrawlError is logged but never sent to the client.
// =============================================================================

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::error::CrawlError;

/// JSON body of every error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

/// Failures the HTTP boundary can answer with
#[derive(Debug)]
pub enum ApiError {
    /// `domainName` missing, not a string, or not a valid seed
    InvalidInput,
    /// The traversal hit a fault it could not classify
    CrawlFailed { seed: String, source: CrawlError },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::InvalidInput => (
                StatusCode::BAD_REQUEST,
                "Invalid `domainName` was provided".to_string(),
            ),
            ApiError::CrawlFailed { seed, source } => {
                tracing::error!(seed = %seed, error = %source, "parsing failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("'{seed}' parsing failed"),
                )
            }
        };

        (status, axum::Json(ErrorResponse { message })).into_response()
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. What is IntoResponse?
//    - axum's trait for anything a handler can return
//    - Implementing it lets handlers return Result<_, ApiError> and use `?`
//
// 2. Why is the fault logged here?
//    - This is the one place every traversal fault passes through, and it
//      is where the seed is still known
// -----------------------------------------------------------------------------
