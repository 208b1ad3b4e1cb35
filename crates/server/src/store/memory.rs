//! In-memory implementation of the `ReceiptStore` trait.
//!
//! Everything lives for the lifetime of the process. Thread-safe via
//! `RwLock`; a put holds the write lock for its single insert, so readers
//! never observe a half-recorded receipt.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{PoisonError, RwLock};

use receipt_points_core::{Points, Receipt, ReceiptId, ScoredReceipt};

use super::{ReceiptStore, Result, StoreError};

/// How many identifiers a put draws before giving up.
const MAX_ID_ATTEMPTS: usize = 8;

type IdSource = Box<dyn Fn() -> ReceiptId + Send + Sync>;

/// In-memory receipt store.
///
/// All data is lost when the store is dropped.
pub struct MemoryReceiptStore {
    receipts: RwLock<HashMap<ReceiptId, ScoredReceipt>>,
    next_id: IdSource,
}

impl MemoryReceiptStore {
    /// Create an empty store that assigns random v4 identifiers.
    #[must_use]
    pub fn new() -> Self {
        Self::with_id_source(ReceiptId::new_v4)
    }

    /// Create an empty store that draws identifiers from `next_id`.
    pub fn with_id_source(next_id: impl Fn() -> ReceiptId + Send + Sync + 'static) -> Self {
        Self {
            receipts: RwLock::new(HashMap::new()),
            next_id: Box::new(next_id),
        }
    }
}

impl Default for MemoryReceiptStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryReceiptStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryReceiptStore")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

impl ReceiptStore for MemoryReceiptStore {
    fn put(&self, receipt: Receipt, points: Points) -> Result<ScoredReceipt> {
        // Entries are inserted whole, so a poisoned map is still consistent.
        let mut receipts = self
            .receipts
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        for _ in 0..MAX_ID_ATTEMPTS {
            let id = (self.next_id)();
            if let Entry::Vacant(slot) = receipts.entry(id) {
                let scored = ScoredReceipt {
                    id,
                    receipt,
                    points,
                };
                slot.insert(scored.clone());
                return Ok(scored);
            }
            tracing::warn!(receipt_id = %id, "Receipt id already taken, drawing another");
        }

        Err(StoreError::IdExhausted {
            attempts: MAX_ID_ATTEMPTS,
        })
    }

    fn get(&self, id: &ReceiptId) -> Option<ScoredReceipt> {
        self.receipts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    fn len(&self) -> usize {
        self.receipts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
