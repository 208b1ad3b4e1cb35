//! Request ID middleware for request tracing and correlation.
//!
//! An upstream `x-request-id` is trusted only when it is short and made of
//! visible ASCII; anything else is replaced with a fresh UUID v4. The chosen
//! id is stored as a [`RequestId`] request extension for handlers, recorded
//! on the `http_request` span, tagged on the Sentry scope and echoed back.

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest upstream request id kept as-is.
pub const MAX_REQUEST_ID_LEN: usize = 128;

/// The id assigned to the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl RequestId {
    fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get(REQUEST_ID_HEADER)
            .and_then(|h| h.to_str().ok())
            .filter(|id| !id.is_empty() && id.len() <= MAX_REQUEST_ID_LEN)
            .map_or_else(|| Self(Uuid::new_v4().to_string()), |id| Self(id.to_string()))
    }

    /// The id as sent in the response header.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Middleware that ensures every request has a unique request ID.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = RequestId::from_headers(request.headers());

    Span::current().record("request_id", request_id.as_str());
    sentry::configure_scope(|scope| scope.set_tag("request_id", request_id.as_str()));

    let header = HeaderValue::from_str(request_id.as_str()).ok();
    request.extensions_mut().insert(request_id);

    let mut response = next.run(request).await;
    if let Some(value) = header {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{
        Extension, Router,
        body::{Body, to_bytes},
        http::Request,
        middleware,
        routing::get,
    };
    use tower::ServiceExt;

    use super::*;

    fn app() -> Router {
        Router::new()
            .route("/", get(|| async { "ok" }))
            .route(
                "/echo",
                get(|Extension(id): Extension<RequestId>| async move { id.0 }),
            )
            .layer(middleware::from_fn(request_id_middleware))
    }

    async fn get_with_header(uri: &str, request_id: &str) -> Response {
        app()
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .header(REQUEST_ID_HEADER, request_id)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_generates_request_id() {
        let response = app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let id = response.headers().get(REQUEST_ID_HEADER).unwrap();
        assert!(Uuid::parse_str(id.to_str().unwrap()).is_ok());
    }

    #[tokio::test]
    async fn test_reuses_upstream_request_id() {
        let response = get_with_header("/", "upstream-123").await;
        assert_eq!(
            response.headers().get(REQUEST_ID_HEADER).unwrap(),
            "upstream-123"
        );
    }

    #[tokio::test]
    async fn test_replaces_overlong_upstream_request_id() {
        let long = "a".repeat(MAX_REQUEST_ID_LEN + 1);
        let response = get_with_header("/", &long).await;

        let id = response.headers().get(REQUEST_ID_HEADER).unwrap();
        assert!(Uuid::parse_str(id.to_str().unwrap()).is_ok());
    }

    #[tokio::test]
    async fn test_handlers_see_request_id() {
        let response = get_with_header("/echo", "upstream-456").await;
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"upstream-456");
    }
}
