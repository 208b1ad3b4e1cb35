//! Receipt identifiers and point totals.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier assigned to a receipt when it is accepted.
///
/// Backed by a random (v4) UUID, so identifiers are unique across the
/// process lifetime with overwhelming probability.
///
/// ```
/// use receipt_points_core::ReceiptId;
///
/// let id = ReceiptId::new_v4();
/// let parsed: ReceiptId = id.to_string().parse().unwrap();
/// assert_eq!(id, parsed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReceiptId(Uuid);

impl ReceiptId {
    /// Generate a fresh random identifier.
    #[must_use]
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ReceiptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for ReceiptId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl From<Uuid> for ReceiptId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<ReceiptId> for Uuid {
    fn from(id: ReceiptId) -> Self {
        id.0
    }
}

/// A non-negative reward points total.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Points(u64);

impl Points {
    /// No points.
    pub const ZERO: Self = Self(0);

    /// Create a points value.
    #[must_use]
    pub const fn new(points: u64) -> Self {
        Self(points)
    }

    /// Get the underlying value.
    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// Add two totals, saturating at `u64::MAX`.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl fmt::Display for Points {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Points {
    fn from(points: u64) -> Self {
        Self(points)
    }
}

impl From<Points> for u64 {
    fn from(points: Points) -> Self {
        points.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_id_is_random() {
        let a = ReceiptId::new_v4();
        let b = ReceiptId::new_v4();
        assert_ne!(a, b);
        assert_eq!(a.as_uuid().get_version_num(), 4);
    }

    #[test]
    fn test_receipt_id_display_is_hyphenated() {
        let id: ReceiptId = "7fb1377b-b223-49d9-a31a-5a02701dd310".parse().unwrap();
        assert_eq!(id.to_string(), "7fb1377b-b223-49d9-a31a-5a02701dd310");
    }

    #[test]
    fn test_receipt_id_rejects_garbage() {
        assert!("not-a-uuid".parse::<ReceiptId>().is_err());
        assert!("".parse::<ReceiptId>().is_err());
    }

    #[test]
    fn test_receipt_id_serializes_as_string() {
        let id: ReceiptId = "7fb1377b-b223-49d9-a31a-5a02701dd310".parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"7fb1377b-b223-49d9-a31a-5a02701dd310\"");
    }

    #[test]
    fn test_points_saturating_add() {
        assert_eq!(Points::new(2).saturating_add(Points::new(3)), Points::new(5));
        assert_eq!(
            Points::new(u64::MAX).saturating_add(Points::new(1)),
            Points::new(u64::MAX)
        );
    }

    #[test]
    fn test_points_serializes_as_number() {
        assert_eq!(serde_json::to_string(&Points::new(28)).unwrap(), "28");
    }
}
