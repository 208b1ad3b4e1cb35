//! Core types for Receipt Points.
//!
//! This module provides type-safe wrappers for receipt fields, so values
//! that reach the scorer have already been checked.

pub mod amount;
pub mod id;
pub mod receipt;
pub mod text;

pub use amount::{Amount, AmountError};
pub use id::{Points, ReceiptId};
pub use receipt::{Item, RawItem, RawReceipt, Receipt, ScoredReceipt};
pub use text::{Retailer, RetailerError, ShortDescription, ShortDescriptionError};
