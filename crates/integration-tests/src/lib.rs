//! Integration tests for the receipt points service.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p receipt-points-integration-tests
//! ```
//!
//! No server process is started. Each test builds the full router with
//! [`receipt_points_server::app`] and drives it in-process with
//! `tower::ServiceExt::oneshot`.
//!
//! # Test Categories
//!
//! - `receipts_api` - Receipt submission and points lookup over HTTP
//! - `scoring_scenarios` - Published scoring examples through the core API

use axum::{
    Router,
    body::{Body, Bytes, to_bytes},
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use receipt_points_server::{
    AppState, ServerConfig,
    store::{MemoryReceiptStore, ReceiptStore},
};
use serde_json::Value;
use tower::ServiceExt;

/// An in-process instance of the application.
#[derive(Clone)]
pub struct TestApp {
    state: AppState,
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

impl TestApp {
    /// Default configuration with an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ServerConfig::default())
    }

    /// Custom configuration with an empty in-memory store.
    #[must_use]
    pub fn with_config(config: ServerConfig) -> Self {
        Self::with_store(config, MemoryReceiptStore::new())
    }

    /// Custom configuration and store.
    #[must_use]
    pub fn with_store(config: ServerConfig, store: impl ReceiptStore + 'static) -> Self {
        Self {
            state: AppState::new(config, store),
        }
    }

    /// The shared application state, for inspecting the store.
    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    fn router(&self) -> Router {
        receipt_points_server::app(self.state.clone())
    }

    /// Send a request through a fresh router over the shared state.
    ///
    /// # Panics
    ///
    /// Panics if the router fails or the body cannot be read.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// `GET` a path.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built.
    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .expect("Failed to build request");
        self.send(request).await
    }

    /// `POST` a JSON document.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built.
    pub async fn post_json(&self, uri: &str, body: &Value) -> TestResponse {
        self.post_raw(uri, Some("application/json"), body.to_string())
            .await
    }

    /// `POST` an arbitrary body with an optional content type.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built.
    pub async fn post_raw(
        &self,
        uri: &str,
        content_type: Option<&str>,
        body: impl Into<Body>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(Method::POST).uri(uri);
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        let request = builder
            .body(body.into())
            .expect("Failed to build request");
        self.send(request).await
    }
}

/// A fully buffered response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    /// Parse the body as JSON.
    ///
    /// # Panics
    ///
    /// Panics if the body is not JSON.
    #[must_use]
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("Response body is not JSON")
    }

    /// The body as UTF-8 text.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
