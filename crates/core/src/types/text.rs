//! Validated text fields of a receipt.

use core::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Word characters, whitespace and hyphens (Unicode-aware).
static DESCRIPTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w\s\-]+$").expect("Invalid regex"));

/// Errors that can occur when parsing a [`Retailer`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RetailerError {
    /// The input string is empty.
    #[error("must not be empty")]
    Empty,
    /// The input contains a whitespace character.
    #[error("must not contain whitespace")]
    ContainsWhitespace,
}

/// The name of the retailer a receipt is from.
///
/// ## Constraints
///
/// - Must not be empty
/// - Must not contain any whitespace character
///
/// ```
/// use receipt_points_core::Retailer;
///
/// assert!(Retailer::parse("Target").is_ok());
/// assert!(Retailer::parse("M&M").is_ok());
/// assert!(Retailer::parse("").is_err());
/// assert!(Retailer::parse("Corner Market").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Retailer(String);

impl Retailer {
    /// Parse a `Retailer` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty or contains whitespace.
    pub fn parse(s: &str) -> Result<Self, RetailerError> {
        if s.is_empty() {
            return Err(RetailerError::Empty);
        }

        if s.chars().any(char::is_whitespace) {
            return Err(RetailerError::ContainsWhitespace);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the retailer name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Retailer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Retailer {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Errors that can occur when parsing a [`ShortDescription`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ShortDescriptionError {
    /// The input string is empty.
    #[error("must not be empty")]
    Empty,
    /// The input contains something other than word characters, whitespace
    /// or hyphens.
    #[error("must contain only letters, digits, underscores, whitespace and hyphens")]
    InvalidCharacters,
}

/// The short product description of a receipt item.
///
/// Surrounding whitespace is preserved; scoring trims it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ShortDescription(String);

impl ShortDescription {
    /// Parse a `ShortDescription` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty or contains characters other
    /// than word characters, whitespace and hyphens.
    pub fn parse(s: &str) -> Result<Self, ShortDescriptionError> {
        if s.is_empty() {
            return Err(ShortDescriptionError::Empty);
        }

        if !DESCRIPTION_RE.is_match(s) {
            return Err(ShortDescriptionError::InvalidCharacters);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the description as given, including surrounding whitespace.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShortDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ShortDescription {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
