//! Storage for scored receipts.
//!
//! A store owns the mapping from [`ReceiptId`] to [`ScoredReceipt`]. Entries
//! are write-once: there is no update or delete, and an entry is visible to
//! readers either completely or not at all.

pub mod memory;

use receipt_points_core::{Points, Receipt, ReceiptId, ScoredReceipt};
use thiserror::Error;

pub use memory::MemoryReceiptStore;

/// Errors from store operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Every identifier drawn for a new receipt was already taken.
    #[error("could not allocate an unused receipt id after {attempts} attempts")]
    IdExhausted { attempts: usize },
}

/// Result type alias for `StoreError`.
pub type Result<T> = std::result::Result<T, StoreError>;

/// A store of scored receipts.
pub trait ReceiptStore: Send + Sync {
    /// Assign a fresh identifier to a scored receipt and record it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IdExhausted`] if no unused identifier could be
    /// drawn.
    fn put(&self, receipt: Receipt, points: Points) -> Result<ScoredReceipt>;

    /// Look up a receipt by identifier.
    fn get(&self, id: &ReceiptId) -> Option<ScoredReceipt>;

    /// Number of stored receipts.
    fn len(&self) -> usize;

    /// Returns `true` if nothing has been stored yet.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up only the points of a receipt.
    fn points(&self, id: &ReceiptId) -> Option<Points> {
        self.get(id).map(|scored| scored.points)
    }
}
