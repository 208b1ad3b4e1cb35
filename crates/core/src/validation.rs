//! Receipt validation.
//!
//! [`validate`] runs a fixed sequence of field-level checks over a parsed
//! JSON value and either returns a fully typed [`Receipt`] or the first
//! violation it found. There is no partial acceptance.
//!
//! # Check Order
//!
//! 1. The value is a JSON object
//! 2. `retailer`, `purchaseDate`, `purchaseTime`, `items`, `total` are present
//! 3. `retailer` - non-empty, no whitespace
//! 4. `purchaseDate` - `YYYY-MM-DD`, a real calendar day
//! 5. `purchaseTime` - `HH:MM`, a real 24-hour time
//! 6. `items` - non-empty array; each item has a valid `shortDescription`
//!    and `price`
//! 7. `total` - two-decimal amount

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use serde_json::{Map, Value};

use crate::types::receipt::{date_format, time_format};
use crate::types::{Amount, Item, Receipt, Retailer, ShortDescription};

static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("Invalid regex"));

static TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{2}:[0-9]{2}$").expect("Invalid regex"));

/// Top-level fields every receipt must carry, in check order.
pub const REQUIRED_FIELDS: [&str; 5] = [
    "retailer",
    "purchaseDate",
    "purchaseTime",
    "items",
    "total",
];

/// Item fields every receipt item must carry, in check order.
pub const REQUIRED_ITEM_FIELDS: [&str; 2] = ["shortDescription", "price"];

/// Why a submitted receipt was rejected.
///
/// Each variant names the offending field (as a path such as
/// `items[2].price`) and the expectation it violated.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The receipt is not a JSON object.
    #[error("receipt must be a JSON object")]
    NotAnObject,

    /// A required field is absent.
    #[error("{field}: is required")]
    MissingField { field: String },

    /// A field is present but has the wrong JSON type.
    #[error("{field}: must be {expected}")]
    WrongType {
        field: String,
        expected: &'static str,
    },

    /// A field has the right type but its contents are malformed.
    #[error("{field}: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// The receipt has no items.
    #[error("items: must contain at least one item")]
    EmptyItems,
}

impl ValidationError {
    /// Path of the offending field, if the error concerns a single field.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::NotAnObject => None,
            Self::MissingField { field }
            | Self::WrongType { field, .. }
            | Self::InvalidFormat { field, .. } => Some(field.as_str()),
            Self::EmptyItems => Some("items"),
        }
    }

    fn invalid(field: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidFormat {
            field: field.into(),
            reason: reason.to_string(),
        }
    }
}

/// Validate a raw receipt and convert it into a typed [`Receipt`].
///
/// Unknown extra fields are ignored.
///
/// # Errors
///
/// Returns the first [`ValidationError`] encountered, in the order listed in
/// the module documentation.
pub fn validate(raw: &Value) -> Result<Receipt, ValidationError> {
    let object = raw.as_object().ok_or(ValidationError::NotAnObject)?;

    require_fields(object, &REQUIRED_FIELDS, "")?;

    let retailer = Retailer::parse(string_field(object, "retailer", "retailer")?)
        .map_err(|e| ValidationError::invalid("retailer", e))?;
    let purchase_date = parse_date(string_field(object, "purchaseDate", "purchaseDate")?)?;
    let purchase_time = parse_time(string_field(object, "purchaseTime", "purchaseTime")?)?;
    let items = parse_items(object.get("items"))?;
    let total = Amount::parse(string_field(object, "total", "total")?)
        .map_err(|e| ValidationError::invalid("total", e))?;

    Ok(Receipt {
        retailer,
        purchase_date,
        purchase_time,
        items,
        total,
    })
}

fn require_fields(
    object: &Map<String, Value>,
    fields: &[&str],
    prefix: &str,
) -> Result<(), ValidationError> {
    match fields.iter().find(|field| !object.contains_key(**field)) {
        Some(field) => Err(ValidationError::MissingField {
            field: format!("{prefix}{field}"),
        }),
        None => Ok(()),
    }
}

/// Fetch `key` from `object` as a string. `path` is used in diagnostics.
fn string_field<'a>(
    object: &'a Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<&'a str, ValidationError> {
    match object.get(key) {
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(_) => Err(ValidationError::WrongType {
            field: path.to_string(),
            expected: "a string",
        }),
        None => Err(ValidationError::MissingField {
            field: path.to_string(),
        }),
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, ValidationError> {
    if !DATE_RE.is_match(s) {
        return Err(ValidationError::invalid(
            "purchaseDate",
            "must be a date in YYYY-MM-DD format",
        ));
    }

    NaiveDate::parse_from_str(s, date_format::FORMAT)
        .map_err(|_| ValidationError::invalid("purchaseDate", "is not a real calendar date"))
}

fn parse_time(s: &str) -> Result<NaiveTime, ValidationError> {
    if !TIME_RE.is_match(s) {
        return Err(ValidationError::invalid(
            "purchaseTime",
            "must be a 24-hour time in HH:MM format",
        ));
    }

    NaiveTime::parse_from_str(s, time_format::FORMAT)
        .map_err(|_| ValidationError::invalid("purchaseTime", "is not a real time of day"))
}

fn parse_items(value: Option<&Value>) -> Result<Vec<Item>, ValidationError> {
    let Some(Value::Array(values)) = value else {
        return Err(ValidationError::WrongType {
            field: "items".to_string(),
            expected: "an array",
        });
    };

    if values.is_empty() {
        return Err(ValidationError::EmptyItems);
    }

    values
        .iter()
        .enumerate()
        .map(|(index, value)| parse_item(index, value))
        .collect()
}

fn parse_item(index: usize, value: &Value) -> Result<Item, ValidationError> {
    let prefix = format!("items[{index}].");
    let object = value.as_object().ok_or_else(|| ValidationError::WrongType {
        field: format!("items[{index}]"),
        expected: "an object",
    })?;

    require_fields(object, &REQUIRED_ITEM_FIELDS, &prefix)?;

    let description_path = format!("{prefix}shortDescription");
    let short_description =
        ShortDescription::parse(string_field(object, "shortDescription", &description_path)?)
            .map_err(|e| ValidationError::invalid(description_path.as_str(), e))?;

    let price_path = format!("{prefix}price");
    let price = Amount::parse(string_field(object, "price", &price_path)?)
        .map_err(|e| ValidationError::invalid(price_path.as_str(), e))?;

    Ok(Item {
        short_description,
        price,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn valid() -> Value {
        json!({
            "retailer": "Target",
            "purchaseDate": "2022-01-01",
            "purchaseTime": "13:01",
            "items": [
                {"shortDescription": "Mountain Dew 12PK", "price": "6.49"},
                {"shortDescription": "Emils Cheese Pizza", "price": "12.25"}
            ],
            "total": "18.74"
        })
    }

    fn with(field: &str, value: Value) -> Value {
        let mut receipt = valid();
        receipt[field] = value;
        receipt
    }

    fn without(field: &str) -> Value {
        let mut receipt = valid();
        receipt.as_object_mut().unwrap().remove(field);
        receipt
    }

    fn field_of(raw: &Value) -> Option<String> {
        validate(raw).unwrap_err().field().map(String::from)
    }

    #[test]
    fn test_valid_receipt() {
        let receipt = validate(&valid()).unwrap();
        assert_eq!(receipt.retailer.as_str(), "Target");
        assert_eq!(receipt.purchase_date, NaiveDate::from_ymd_opt(2022, 1, 1).unwrap());
        assert_eq!(receipt.purchase_time, NaiveTime::from_hms_opt(13, 1, 0).unwrap());
        assert_eq!(receipt.items.len(), 2);
        assert_eq!(receipt.total, Amount::parse("18.74").unwrap());
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        assert!(validate(&with("note", json!("thanks"))).is_ok());
    }

    #[test]
    fn test_not_an_object() {
        assert_eq!(validate(&json!([1, 2])), Err(ValidationError::NotAnObject));
        assert_eq!(validate(&json!("receipt")), Err(ValidationError::NotAnObject));
        assert_eq!(validate(&Value::Null), Err(ValidationError::NotAnObject));
    }

    #[test]
    fn test_each_missing_field_is_rejected() {
        for field in REQUIRED_FIELDS {
            assert_eq!(
                validate(&without(field)),
                Err(ValidationError::MissingField {
                    field: field.to_string()
                }),
                "{field}"
            );
        }
    }

    #[test]
    fn test_missing_fields_reported_in_order() {
        let mut receipt = without("total");
        receipt.as_object_mut().unwrap().remove("purchaseTime");
        assert_eq!(field_of(&receipt).as_deref(), Some("purchaseTime"));
    }

    #[test]
    fn test_wrong_types() {
        let err = validate(&with("retailer", json!(42))).unwrap_err();
        assert_eq!(
            err,
            ValidationError::WrongType {
                field: "retailer".to_string(),
                expected: "a string"
            }
        );
        assert_eq!(field_of(&with("total", json!(35.35))).as_deref(), Some("total"));
        assert_eq!(
            field_of(&with("purchaseDate", Value::Null)).as_deref(),
            Some("purchaseDate")
        );
        assert_eq!(field_of(&with("items", json!({}))).as_deref(), Some("items"));
    }

    #[test]
    fn test_retailer_format() {
        assert_eq!(field_of(&with("retailer", json!(""))).as_deref(), Some("retailer"));
        assert_eq!(
            field_of(&with("retailer", json!("Corner Market"))).as_deref(),
            Some("retailer")
        );
    }

    #[test]
    fn test_purchase_date_format() {
        for bad in ["2022-1-1", "01-01-2022", "2022/01/01", "2022-01-01T00:00", ""] {
            assert_eq!(
                field_of(&with("purchaseDate", json!(bad))).as_deref(),
                Some("purchaseDate"),
                "{bad}"
            );
        }
    }

    #[test]
    fn test_purchase_date_must_be_real() {
        assert!(validate(&with("purchaseDate", json!("2024-02-29"))).is_ok());
        for bad in ["2023-02-29", "2022-13-01", "2022-00-10", "2022-04-31"] {
            let err = validate(&with("purchaseDate", json!(bad))).unwrap_err();
            assert_eq!(
                err,
                ValidationError::InvalidFormat {
                    field: "purchaseDate".to_string(),
                    reason: "is not a real calendar date".to_string()
                },
                "{bad}"
            );
        }
    }

    #[test]
    fn test_purchase_time_format() {
        assert!(validate(&with("purchaseTime", json!("00:00"))).is_ok());
        assert!(validate(&with("purchaseTime", json!("23:59"))).is_ok());
        for bad in ["1:05", "13:1", "13:01:00", "1pm", "24:00", "12:60", ""] {
            assert_eq!(
                field_of(&with("purchaseTime", json!(bad))).as_deref(),
                Some("purchaseTime"),
                "{bad}"
            );
        }
    }

    #[test]
    fn test_empty_items() {
        assert_eq!(
            validate(&with("items", json!([]))),
            Err(ValidationError::EmptyItems)
        );
    }

    #[test]
    fn test_item_must_be_object() {
        let err = validate(&with("items", json!(["Gatorade"]))).unwrap_err();
        assert_eq!(err.field(), Some("items[0]"));
    }

    #[test]
    fn test_item_missing_fields() {
        let err = validate(&with(
            "items",
            json!([{"shortDescription": "Gatorade", "price": "2.25"}, {"price": "2.25"}]),
        ))
        .unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingField {
                field: "items[1].shortDescription".to_string()
            }
        );

        let err = validate(&with("items", json!([{"shortDescription": "Gatorade"}]))).unwrap_err();
        assert_eq!(err.field(), Some("items[0].price"));
    }

    #[test]
    fn test_item_description_format() {
        let err = validate(&with(
            "items",
            json!([{"shortDescription": "Pepsi!", "price": "1.25"}]),
        ))
        .unwrap_err();
        assert_eq!(err.field(), Some("items[0].shortDescription"));

        let err = validate(&with(
            "items",
            json!([{"shortDescription": "", "price": "1.25"}]),
        ))
        .unwrap_err();
        assert_eq!(err.field(), Some("items[0].shortDescription"));
    }

    #[test]
    fn test_item_price_format() {
        let err = validate(&with(
            "items",
            json!([{"shortDescription": "Gatorade", "price": "2.5"}]),
        ))
        .unwrap_err();
        assert_eq!(err.field(), Some("items[0].price"));
        assert!(err.to_string().starts_with("items[0].price: must be digits"));
    }

    #[test]
    fn test_total_format() {
        let err = validate(&with("total", json!("35.3"))).unwrap_err();
        assert_eq!(err.field(), Some("total"));
        assert_eq!(field_of(&with("total", json!("-1.00"))).as_deref(), Some("total"));
        assert_eq!(field_of(&with("total", json!("$35.35"))).as_deref(), Some("total"));
    }

    #[test]
    fn test_error_messages_name_field() {
        let err = validate(&without("retailer")).unwrap_err();
        assert_eq!(err.to_string(), "retailer: is required");

        let err = validate(&with("items", json!([]))).unwrap_err();
        assert_eq!(err.to_string(), "items: must contain at least one item");
    }
}
