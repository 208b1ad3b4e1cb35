//! Receipt records.
//!
//! [`Receipt`] is the validated form: every field already satisfies its
//! format, so it can only be built by [`crate::validate`] or from parsed
//! field types. [`RawReceipt`] is the string-typed wire form as submitted.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::amount::Amount;
use super::id::{Points, ReceiptId};
use super::text::{Retailer, ShortDescription};

/// A single line entry on a validated receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub short_description: ShortDescription,
    pub price: Amount,
}

/// A purchase receipt that has passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub retailer: Retailer,
    #[serde(with = "date_format")]
    pub purchase_date: NaiveDate,
    #[serde(with = "time_format")]
    pub purchase_time: NaiveTime,
    /// Never empty.
    pub items: Vec<Item>,
    pub total: Amount,
}

/// A receipt after scoring, as held by a store.
///
/// Created once when the receipt is accepted and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredReceipt {
    pub id: ReceiptId,
    #[serde(flatten)]
    pub receipt: Receipt,
    pub points: Points,
}

/// An item exactly as submitted, with every field still a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawItem {
    pub short_description: String,
    pub price: String,
}

/// A receipt exactly as submitted, with every field still a string.
///
/// Nothing about the contents is checked by deserializing into this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReceipt {
    pub retailer: String,
    pub purchase_date: String,
    pub purchase_time: String,
    pub items: Vec<RawItem>,
    pub total: String,
}

impl From<&Receipt> for RawReceipt {
    fn from(receipt: &Receipt) -> Self {
        Self {
            retailer: receipt.retailer.to_string(),
            purchase_date: receipt.purchase_date.format(date_format::FORMAT).to_string(),
            purchase_time: receipt.purchase_time.format(time_format::FORMAT).to_string(),
            items: receipt
                .items
                .iter()
                .map(|item| RawItem {
                    short_description: item.short_description.to_string(),
                    price: item.price.to_string(),
                })
                .collect(),
            total: receipt.total.to_string(),
        }
    }
}

pub(crate) mod date_format {
    use chrono::NaiveDate;
    use serde::Serializer;

    pub const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(FORMAT))
    }
}

pub(crate) mod time_format {
    use chrono::NaiveTime;
    use serde::Serializer;

    pub const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format(FORMAT))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn receipt() -> Receipt {
        Receipt {
            retailer: Retailer::parse("Target").unwrap(),
            purchase_date: NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
            purchase_time: NaiveTime::from_hms_opt(13, 1, 0).unwrap(),
            items: vec![Item {
                short_description: ShortDescription::parse("Mountain Dew 12PK").unwrap(),
                price: Amount::parse("6.49").unwrap(),
            }],
            total: Amount::parse("6.49").unwrap(),
        }
    }

    #[test]
    fn test_receipt_serializes_in_wire_format() {
        let json = serde_json::to_value(receipt()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "retailer": "Target",
                "purchaseDate": "2022-01-01",
                "purchaseTime": "13:01",
                "items": [{"shortDescription": "Mountain Dew 12PK", "price": "6.49"}],
                "total": "6.49"
            })
        );
    }

    #[test]
    fn test_scored_receipt_flattens_receipt() {
        let id: ReceiptId = "7fb1377b-b223-49d9-a31a-5a02701dd310".parse().unwrap();
        let scored = ScoredReceipt {
            id,
            receipt: receipt(),
            points: Points::new(28),
        };

        let json = serde_json::to_value(&scored).unwrap();
        assert_eq!(json["id"], "7fb1377b-b223-49d9-a31a-5a02701dd310");
        assert_eq!(json["retailer"], "Target");
        assert_eq!(json["points"], 28);
    }

    #[test]
    fn test_raw_receipt_from_receipt() {
        let raw = RawReceipt::from(&receipt());
        assert_eq!(raw.purchase_date, "2022-01-01");
        assert_eq!(raw.purchase_time, "13:01");
        assert_eq!(raw.items[0].price, "6.49");
    }

    #[test]
    fn test_raw_receipt_deserializes_camel_case() {
        let raw: RawReceipt = serde_json::from_value(serde_json::json!({
            "retailer": "M&M Corner Market",
            "purchaseDate": "2022-03-20",
            "purchaseTime": "14:33",
            "items": [{"shortDescription": "Gatorade", "price": "2.25"}],
            "total": "2.25"
        }))
        .unwrap();
        assert_eq!(raw.retailer, "M&M Corner Market");
        assert_eq!(raw.items.len(), 1);
    }
}
