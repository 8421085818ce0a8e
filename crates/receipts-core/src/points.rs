//! Receipt scoring rules.
//!
//! Seven independent rules each inspect one part of a [`Receipt`] and award
//! points. A rule whose input fails to parse contributes zero; it never fails
//! the whole scoring. There is intentionally no "total greater than 10.00"
//! rule.

use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use unicode_general_category::{get_general_category, GeneralCategory};

use crate::receipt::{Item, Receipt};

const ROUND_DOLLAR_POINTS: u64 = 50;
const QUARTER_MULTIPLE_POINTS: u64 = 25;
const ITEM_PAIR_POINTS: u64 = 5;
const ODD_DAY_POINTS: u64 = 6;
const AFTERNOON_POINTS: u64 = 10;

const PURCHASE_DATE_FORMAT: &str = "%Y-%m-%d";
const PURCHASE_TIME_FORMAT: &str = "%H:%M";

/// Points awarded by each rule for a single receipt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PointsBreakdown {
    /// One point per Unicode letter or decimal digit in the retailer name.
    pub retailer: u64,
    /// Total has no cents.
    pub round_dollar: u64,
    /// Total is a multiple of `0.25`.
    pub quarter_multiple: u64,
    /// Five points per two items.
    pub item_pairs: u64,
    /// Sum of `ceil(price * 0.2)` over items whose trimmed description
    /// length is a multiple of three.
    pub item_descriptions: u64,
    /// Purchase day of month is odd.
    pub odd_day: u64,
    /// Purchase time is in `[14:00, 16:00)`.
    pub afternoon: u64,
}

impl PointsBreakdown {
    /// Sum of every rule, saturating at `u64::MAX`.
    #[must_use]
    pub fn total(&self) -> u64 {
        [
            self.retailer,
            self.round_dollar,
            self.quarter_multiple,
            self.item_pairs,
            self.item_descriptions,
            self.odd_day,
            self.afternoon,
        ]
        .into_iter()
        .fold(0, u64::saturating_add)
    }
}

/// Scores a receipt rule by rule.
#[must_use]
pub fn score_receipt(receipt: &Receipt) -> PointsBreakdown {
    // Rules 2 and 3 share one parse of the total; both skip if it fails.
    let total = parse_amount(&receipt.total);

    PointsBreakdown {
        retailer: retailer_points(&receipt.retailer),
        round_dollar: total.map_or(0, round_dollar_points),
        quarter_multiple: total.map_or(0, quarter_multiple_points),
        item_pairs: item_pair_points(receipt.items.len()),
        item_descriptions: receipt
            .items
            .iter()
            .map(item_description_points)
            .fold(0, u64::saturating_add),
        odd_day: odd_day_points(&receipt.purchase_date),
        afternoon: afternoon_points(&receipt.purchase_time),
    }
}

/// Computes the point total for a receipt.
///
/// Pure and deterministic: the same receipt always yields the same total.
#[must_use]
pub fn calculate_points(receipt: &Receipt) -> u64 {
    score_receipt(receipt).total()
}

// `Decimal::from_str` tolerates digit-group underscores; amounts do not.
fn parse_amount(raw: &str) -> Option<Decimal> {
    if raw.contains('_') {
        return None;
    }
    Decimal::from_str(raw).ok()
}

fn retailer_points(retailer: &str) -> u64 {
    retailer.chars().filter(|&c| is_letter_or_digit(c)).count() as u64
}

/// General category `L*` or `Nd`. Numerals such as `Ⅻ` or `½` and combining
/// marks do not count.
fn is_letter_or_digit(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
            | GeneralCategory::DecimalNumber
    )
}

fn round_dollar_points(total: Decimal) -> u64 {
    if total == total.trunc() {
        ROUND_DOLLAR_POINTS
    } else {
        0
    }
}

fn quarter_multiple_points(total: Decimal) -> u64 {
    let Some(cents) = total.checked_mul(Decimal::ONE_HUNDRED) else {
        return 0;
    };
    let cents = cents.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    if (cents % Decimal::from(25)).is_zero() {
        QUARTER_MULTIPLE_POINTS
    } else {
        0
    }
}

fn item_pair_points(item_count: usize) -> u64 {
    (item_count / 2) as u64 * ITEM_PAIR_POINTS
}

// A blank description has length 0, which counts as a multiple of three.
fn item_description_points(item: &Item) -> u64 {
    if item.short_description.trim().len() % 3 != 0 {
        return 0;
    }

    parse_amount(&item.price)
        .and_then(|price| price.checked_mul(Decimal::new(2, 1)))
        .and_then(|scaled| scaled.ceil().to_u64())
        .unwrap_or(0)
}

fn odd_day_points(purchase_date: &str) -> u64 {
    if !is_date_shaped(purchase_date) {
        return 0;
    }
    match NaiveDate::parse_from_str(purchase_date, PURCHASE_DATE_FORMAT) {
        Ok(date) if date.day() % 2 == 1 => ODD_DAY_POINTS,
        _ => 0,
    }
}

fn afternoon_points(purchase_time: &str) -> u64 {
    if !is_time_shaped(purchase_time) {
        return 0;
    }
    match NaiveTime::parse_from_str(purchase_time, PURCHASE_TIME_FORMAT) {
        Ok(time) if matches!(time.hour(), 14 | 15) => AFTERNOON_POINTS,
        _ => 0,
    }
}

// chrono's numeric specifiers accept one-digit fields, leading spaces and a
// sign, so the layout is checked before parsing.

/// `YYYY-MM-DD` with ASCII digits only.
fn is_date_shaped(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// `H:MM` or `HH:MM` with ASCII digits only.
fn is_time_shaped(raw: &str) -> bool {
    let Some((hour, minute)) = raw.split_once(':') else {
        return false;
    };
    matches!(hour.len(), 1 | 2)
        && minute.len() == 2
        && hour.bytes().chain(minute.bytes()).all(|b| b.is_ascii_digit())
}
