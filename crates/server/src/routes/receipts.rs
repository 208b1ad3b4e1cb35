//! Receipt submission and points lookup handlers.

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use receipt_points_core::{Points, ReceiptId, score_breakdown, validate};
use serde::Serialize;
use serde_json::Value;
use tracing::{Span, instrument};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Response for a stored receipt.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ProcessResponse {
    pub id: ReceiptId,
}

/// Response for a points lookup.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct PointsResponse {
    pub points: Points,
}

/// Validate, score and store a submitted receipt.
///
/// Nothing is stored when validation fails.
#[instrument(skip_all)]
pub async fn process(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<ProcessResponse>> {
    let Json(raw) = payload.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge
        } else {
            AppError::BadRequest(rejection.body_text())
        }
    })?;

    let receipt = validate(&raw)?;
    let breakdown = score_breakdown(&receipt);

    for contribution in &breakdown.contributions {
        tracing::debug!(
            rule = %contribution.rule,
            points = %contribution.points,
            "Rule applied"
        );
    }

    let scored = state.store().put(receipt, breakdown.total)?;

    tracing::info!(
        receipt_id = %scored.id,
        points = %scored.points,
        "Receipt processed"
    );

    Ok(Json(ProcessResponse { id: scored.id }))
}

/// Look up the points awarded to a stored receipt.
///
/// An id that is not a UUID, or does not even decode as UTF-8, cannot have
/// been issued, so it is reported the same way as an unknown one.
#[instrument(skip_all, fields(receipt_id = tracing::field::Empty))]
pub async fn points(
    State(state): State<AppState>,
    path: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<PointsResponse>> {
    let Path(id) = path.map_err(|rejection| AppError::ReceiptNotFound(rejection.body_text()))?;
    Span::current().record("receipt_id", id.as_str());

    let points = id
        .parse::<ReceiptId>()
        .ok()
        .and_then(|receipt_id| state.store().points(&receipt_id))
        .ok_or_else(|| AppError::ReceiptNotFound(id.clone()))?;

    Ok(Json(PointsResponse { points }))
}
