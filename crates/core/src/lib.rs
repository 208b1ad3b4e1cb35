//! Receipt Points Core - Validation and scoring.
//!
//! This crate turns submitted receipt data into a reproducible reward point
//! total. It is used by:
//! - `server` - HTTP service that accepts receipts and serves their points
//! - `integration-tests` - End-to-end tests of the service
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! storage, no HTTP. Receipts flow through it in two steps:
//!
//! ```text
//! serde_json::Value --validate--> Receipt --score--> Points
//! ```
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for amounts, identifiers and receipt fields
//! - [`validation`] - Field-by-field checks producing a [`Receipt`]
//! - [`scoring`] - The additive point rules

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod scoring;
pub mod types;
pub mod validation;

pub use scoring::{
    Rule, RuleContribution, ScoreBreakdown, ScoreError, score, score_breakdown, score_raw,
};
pub use types::*;
pub use validation::{ValidationError, validate};
