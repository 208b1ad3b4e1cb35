//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server faults to Sentry
//! before responding to the client. All route handlers should return
//! `Result<T, AppError>`.
//!
//! Every error is rendered as a JSON body:
//!
//! ```json
//! {"error": "The receipt is invalid.", "detail": "total: must be digits ..."}
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use receipt_points_core::ValidationError;
use serde::Serialize;
use thiserror::Error;

use crate::store::StoreError;

/// Application-level error type for the receipt points server.
#[derive(Debug, Error)]
pub enum AppError {
    /// Submitted receipt failed validation.
    #[error("Invalid receipt: {0}")]
    Validation(#[from] ValidationError),

    /// Request body could not be read as JSON.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Request body exceeded the configured limit.
    #[error("Payload too large")]
    PayloadTooLarge,

    /// No receipt has the requested identifier.
    #[error("Receipt not found: {0}")]
    ReceiptNotFound(String),

    /// Store operation failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// JSON body of an error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl AppError {
    /// HTTP status this error maps to.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::ReceiptNotFound(_) => StatusCode::NOT_FOUND,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ErrorBody {
        // Don't expose internal error details to clients
        let (error, detail) = match self {
            Self::Validation(err) => ("The receipt is invalid.", Some(err.to_string())),
            Self::BadRequest(msg) => ("The request body is not valid JSON.", Some(msg.clone())),
            Self::PayloadTooLarge => ("The request body is too large.", None),
            Self::ReceiptNotFound(_) => ("No receipt found for that ID.", None),
            Self::Store(_) => ("Internal server error", None),
        };

        ErrorBody {
            error: error.to_string(),
            detail,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if matches!(self, Self::Store(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::info!(error = %self, "Request rejected");
        }

        (self.status(), Json(self.body())).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
