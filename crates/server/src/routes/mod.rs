//! HTTP route handlers for the receipt points server.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                  - Liveness check
//! GET  /health/ready            - Readiness check with stored receipt count
//!
//! # Receipts
//! POST /receipts/process        - Validate, score and store a receipt
//! GET  /receipts/{id}/points    - Points awarded to a stored receipt
//! ```

pub mod health;
pub mod receipts;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Create the receipt routes router.
pub fn receipt_routes() -> Router<AppState> {
    Router::new()
        .route("/process", post(receipts::process))
        .route("/{id}/points", get(receipts::points))
}

/// Build the complete application router.
///
/// Sentry layers are not included here; `main` wraps them around the
/// returned router so tests can drive it without a Sentry client.
pub fn app(state: AppState) -> Router {
    let max_body_bytes = state.config().max_body_bytes;

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/receipts", receipt_routes())
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}
