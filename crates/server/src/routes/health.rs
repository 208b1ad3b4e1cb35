//! Health check handlers.

use axum::{Json, extract::State};
use serde::Serialize;

use crate::state::AppState;

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness response body.
#[derive(Debug, Serialize)]
pub struct Readiness {
    pub status: &'static str,
    pub receipts: usize,
}

/// Readiness health check endpoint.
///
/// The store is in-process, so the server is ready once it is serving.
/// Reports how many receipts are held.
pub async fn readiness(State(state): State<AppState>) -> Json<Readiness> {
    Json(Readiness {
        status: "ready",
        receipts: state.store().len(),
    })
}
