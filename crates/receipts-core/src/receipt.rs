use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A retail purchase submitted for scoring.
///
/// Every field defaults when absent from the JSON body, so a payload that
/// omits `retailer` decodes successfully and is then rejected by
/// [`Receipt::validate`] rather than by the decoder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Receipt {
    pub retailer: String,
    /// Calendar date as submitted, e.g. `"2022-01-01"`. Parsed best-effort.
    pub purchase_date: String,
    /// 24-hour clock time as submitted, e.g. `"13:01"`. Parsed best-effort.
    pub purchase_time: String,
    pub items: Vec<Item>,
    /// Decimal amount as a string, e.g. `"35.35"`.
    pub total: String,
}

/// A single line item on a [`Receipt`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Item {
    pub short_description: String,
    /// Decimal amount as a string, e.g. `"12.25"`. Parsed best-effort.
    pub price: String,
}

/// Boundary validation failures for a submitted receipt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReceiptError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

impl Receipt {
    /// Checks the fields every receipt must carry before it can be scored.
    ///
    /// Only presence is checked: `retailer` and `total` must be non-empty and
    /// `items` must contain at least one entry. Dates, times, and amounts are
    /// not inspected here.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptError::MissingField`] naming the first absent field.
    pub fn validate(&self) -> Result<(), ReceiptError> {
        if self.retailer.is_empty() {
            return Err(ReceiptError::MissingField("retailer"));
        }
        if self.total.is_empty() {
            return Err(ReceiptError::MissingField("total"));
        }
        if self.items.is_empty() {
            return Err(ReceiptError::MissingField("items"));
        }
        Ok(())
    }
}
