//! Points scoring.
//!
//! A receipt's points are the sum of independent rules, each adding a
//! non-negative amount:
//!
//! | Rule | Points |
//! |------|--------|
//! | Retailer name | 1 per alphanumeric character |
//! | Round dollar total | 50 if the total has no cents |
//! | Quarter multiple total | 25 if the total is a multiple of 0.25 |
//! | Item pairs | 5 per two items |
//! | Description length | `ceil(price * 0.2)` per item whose trimmed description length is a positive multiple of 3 |
//! | Odd purchase day | 6 if the day of the month is odd |
//! | Afternoon purchase | 10 if bought strictly between 14:00 and 16:00 |
//!
//! All money arithmetic is exact decimal.

use core::fmt;

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use rust_decimal::Decimal;

use crate::types::receipt::{date_format, time_format};
use crate::types::{Amount, AmountError, Points, RawReceipt, Receipt};

const ROUND_DOLLAR_POINTS: u64 = 50;
const QUARTER_MULTIPLE_POINTS: u64 = 25;
const POINTS_PER_ITEM_PAIR: u64 = 5;
const ODD_DAY_POINTS: u64 = 6;
const AFTERNOON_POINTS: u64 = 10;

const AFTERNOON_START_SECS: u32 = 14 * 3600;
const AFTERNOON_END_SECS: u32 = 16 * 3600;

/// Fraction of an item's price awarded by the description length rule.
fn description_rate() -> Decimal {
    Decimal::new(2, 1)
}

/// The scorer was handed data that should never have passed validation.
///
/// This is a contract violation between caller and scorer, not a client
/// error, and is kept distinct from [`crate::ValidationError`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoreError {
    /// A monetary field does not parse as a two-decimal amount.
    #[error("scorer received malformed amount in {field}: {source}")]
    Amount {
        field: String,
        #[source]
        source: AmountError,
    },

    /// `purchaseDate` does not parse as a calendar date.
    #[error("scorer received malformed purchaseDate {value:?}")]
    Date { value: String },

    /// `purchaseTime` does not parse as a time of day.
    #[error("scorer received malformed purchaseTime {value:?}")]
    Time { value: String },
}

/// One of the scoring rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    RetailerName,
    RoundDollarTotal,
    QuarterMultipleTotal,
    ItemPairs,
    DescriptionLength,
    OddPurchaseDay,
    AfternoonPurchase,
}

impl Rule {
    /// Every rule, in evaluation order.
    pub const ALL: [Self; 7] = [
        Self::RetailerName,
        Self::RoundDollarTotal,
        Self::QuarterMultipleTotal,
        Self::ItemPairs,
        Self::DescriptionLength,
        Self::OddPurchaseDay,
        Self::AfternoonPurchase,
    ];

    /// Stable snake_case name, used in logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::RetailerName => "retailer_name",
            Self::RoundDollarTotal => "round_dollar_total",
            Self::QuarterMultipleTotal => "quarter_multiple_total",
            Self::ItemPairs => "item_pairs",
            Self::DescriptionLength => "description_length",
            Self::OddPurchaseDay => "odd_purchase_day",
            Self::AfternoonPurchase => "afternoon_purchase",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Points contributed by a single rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleContribution {
    pub rule: Rule,
    pub points: Points,
}

/// Per-rule contributions and their total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreBreakdown {
    pub contributions: Vec<RuleContribution>,
    pub total: Points,
}

impl ScoreBreakdown {
    /// Points contributed by `rule`.
    #[must_use]
    pub fn points_for(&self, rule: Rule) -> Points {
        self.contributions
            .iter()
            .find(|c| c.rule == rule)
            .map_or(Points::ZERO, |c| c.points)
    }
}

/// Everything the rules look at, borrowed from either receipt form.
struct Facts<'a> {
    retailer: &'a str,
    purchase_date: NaiveDate,
    purchase_time: NaiveTime,
    items: Vec<(&'a str, Amount)>,
    total: Amount,
}

/// Score a validated receipt.
#[must_use]
pub fn score(receipt: &Receipt) -> Points {
    score_breakdown(receipt).total
}

/// Score a validated receipt, keeping each rule's contribution.
#[must_use]
pub fn score_breakdown(receipt: &Receipt) -> ScoreBreakdown {
    let facts = Facts {
        retailer: receipt.retailer.as_str(),
        purchase_date: receipt.purchase_date,
        purchase_time: receipt.purchase_time,
        items: receipt
            .items
            .iter()
            .map(|item| (item.short_description.as_str(), item.price))
            .collect(),
        total: receipt.total,
    };

    tally(&facts)
}

/// Score a receipt still in string form, without validating it first.
///
/// Text fields are scored as-is. Dates, times and amounts must still parse,
/// since the rules need their values.
///
/// # Errors
///
/// Returns [`ScoreError`] if a date, time or amount does not parse.
pub fn score_raw(raw: &RawReceipt) -> Result<Points, ScoreError> {
    let purchase_date = NaiveDate::parse_from_str(&raw.purchase_date, date_format::FORMAT)
        .map_err(|_| ScoreError::Date {
            value: raw.purchase_date.clone(),
        })?;
    let purchase_time = NaiveTime::parse_from_str(&raw.purchase_time, time_format::FORMAT)
        .map_err(|_| ScoreError::Time {
            value: raw.purchase_time.clone(),
        })?;
    let total = parse_amount(&raw.total, "total")?;
    let items = raw
        .items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let price = parse_amount(&item.price, &format!("items[{index}].price"))?;
            Ok((item.short_description.as_str(), price))
        })
        .collect::<Result<Vec<_>, ScoreError>>()?;

    let facts = Facts {
        retailer: &raw.retailer,
        purchase_date,
        purchase_time,
        items,
        total,
    };

    Ok(tally(&facts).total)
}

fn parse_amount(s: &str, field: &str) -> Result<Amount, ScoreError> {
    Amount::parse(s).map_err(|source| ScoreError::Amount {
        field: field.to_string(),
        source,
    })
}

fn tally(facts: &Facts<'_>) -> ScoreBreakdown {
    let contributions: Vec<RuleContribution> = Rule::ALL
        .into_iter()
        .map(|rule| RuleContribution {
            rule,
            points: Points::new(apply(rule, facts)),
        })
        .collect();

    let total = contributions
        .iter()
        .fold(Points::ZERO, |sum, c| sum.saturating_add(c.points));

    ScoreBreakdown {
        contributions,
        total,
    }
}

fn apply(rule: Rule, facts: &Facts<'_>) -> u64 {
    match rule {
        Rule::RetailerName => retailer_name_points(facts.retailer),
        Rule::RoundDollarTotal => bonus_if(facts.total.is_whole(), ROUND_DOLLAR_POINTS),
        Rule::QuarterMultipleTotal => {
            bonus_if(facts.total.is_multiple_of_quarter(), QUARTER_MULTIPLE_POINTS)
        }
        Rule::ItemPairs => item_pair_points(facts.items.len()),
        Rule::DescriptionLength => facts
            .items
            .iter()
            .map(|(description, price)| description_points(description, price))
            .fold(0, u64::saturating_add),
        Rule::OddPurchaseDay => bonus_if(facts.purchase_date.day() % 2 == 1, ODD_DAY_POINTS),
        Rule::AfternoonPurchase => bonus_if(is_afternoon(facts.purchase_time), AFTERNOON_POINTS),
    }
}

const fn bonus_if(condition: bool, points: u64) -> u64 {
    if condition { points } else { 0 }
}

fn retailer_name_points(retailer: &str) -> u64 {
    let count = retailer.chars().filter(|c| c.is_alphanumeric()).count();
    u64::try_from(count).unwrap_or(u64::MAX)
}

fn item_pair_points(item_count: usize) -> u64 {
    let pairs = u64::try_from(item_count / 2).unwrap_or(u64::MAX);
    pairs.saturating_mul(POINTS_PER_ITEM_PAIR)
}

fn description_points(description: &str, price: &Amount) -> u64 {
    let length = description.trim().chars().count();
    if length > 0 && length % 3 == 0 {
        price.ceil_scaled(description_rate())
    } else {
        0
    }
}

/// Strictly after 14:00 and strictly before 16:00.
fn is_afternoon(time: NaiveTime) -> bool {
    let secs = time.num_seconds_from_midnight();
    secs > AFTERNOON_START_SECS && secs < AFTERNOON_END_SECS
}
