//! Receipt points server library.
//!
//! Exposes the router and its building blocks so the binary and the
//! integration tests assemble the same application.
//!
//! # Architecture
//!
//! - Axum web framework with JSON request and response bodies
//! - Validation and scoring from `receipt-points-core`
//! - In-memory receipt store behind the [`store::ReceiptStore`] trait
//! - Sentry error tracking when `SENTRY_DSN` is set

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod store;

pub use config::ServerConfig;
pub use routes::app;
pub use state::AppState;
