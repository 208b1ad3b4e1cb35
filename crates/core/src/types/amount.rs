//! Exact monetary amounts using decimal arithmetic.
//!
//! Receipts carry money as strings such as `"35.35"`. Parsing them into
//! [`Amount`] keeps the value exact, so checks like "is this a multiple of
//! a quarter" never suffer from binary floating point error.

use core::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One or more digits, a dot, exactly two digits. No sign, no exponent.
static AMOUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.[0-9]{2}$").expect("Invalid regex"));

/// Errors that can occur when parsing an [`Amount`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    /// The input does not look like `123.45`.
    #[error("must be digits followed by '.' and exactly two digits (e.g. \"6.49\")")]
    InvalidFormat,
    /// The input is well formed but larger than the largest accepted amount.
    #[error("must not exceed {}.00", u64::MAX)]
    OutOfRange,
}

/// A non-negative monetary amount with exactly two fraction digits.
///
/// ## Examples
///
/// ```
/// use receipt_points_core::Amount;
///
/// let total = Amount::parse("9.00").unwrap();
/// assert!(total.is_whole());
/// assert!(total.is_multiple_of_quarter());
///
/// assert!(Amount::parse("35.3").is_err());
/// assert!(Amount::parse("-1.00").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(Decimal);

impl Amount {
    /// Parse an amount from its two-decimal string form.
    ///
    /// # Errors
    ///
    /// Returns [`AmountError::InvalidFormat`] if the string is not digits, a
    /// dot and exactly two digits, or [`AmountError::OutOfRange`] if it is
    /// above `u64::MAX` whole units.
    pub fn parse(s: &str) -> Result<Self, AmountError> {
        if !AMOUNT_RE.is_match(s) {
            return Err(AmountError::InvalidFormat);
        }

        let value = Decimal::from_str_exact(s).map_err(|_| AmountError::OutOfRange)?;
        if value > Decimal::from(u64::MAX) {
            return Err(AmountError::OutOfRange);
        }

        Ok(Self(value))
    }

    /// Returns `true` if the amount has no cents (`.00`).
    #[must_use]
    pub fn is_whole(&self) -> bool {
        self.0.fract().is_zero()
    }

    /// Returns `true` if the amount is an exact multiple of `0.25`.
    #[must_use]
    pub fn is_multiple_of_quarter(&self) -> bool {
        let quarter = Decimal::new(25, 2);
        self.0
            .checked_rem(quarter)
            .is_some_and(|rem| rem.is_zero())
    }

    /// Returns `ceil(amount * rate)` as whole units.
    ///
    /// Always fits for rates up to 1. Larger rates saturate at `u64::MAX`.
    #[must_use]
    pub fn ceil_scaled(&self, rate: Decimal) -> u64 {
        self.0
            .checked_mul(rate)
            .and_then(|product| product.ceil().to_u64())
            .unwrap_or(u64::MAX)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
