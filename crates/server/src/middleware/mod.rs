//! HTTP middleware stack for the receipt points server.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, added in `main`)
//! 2. `TraceLayer` (request span with method, uri, status, latency)
//! 3. Request ID (add unique ID to each request)
//! 4. Body limit (`DefaultBodyLimit`)

pub mod request_id;

pub use request_id::{REQUEST_ID_HEADER, RequestId, request_id_middleware};
