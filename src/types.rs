use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Direction of a money movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Income,
    Expense,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Income => "income",
            ItemKind::Expense => "expense",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(ItemKind::Income),
            "expense" => Ok(ItemKind::Expense),
            _ => Err(ValidationError::InvalidKind),
        }
    }
}

/// A persisted income or expense record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub amount: f64,
    pub category: String,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A validated item that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub kind: ItemKind,
    pub amount: f64,
    pub category: String,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating or replacing an item.
///
/// `type` stays a plain string here so that an unknown value is reported by
/// [`ItemPayload::validate`] rather than rejected while decoding JSON.
/// Missing fields fall back to their zero value and are caught by validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemPayload {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

/// The mutable fields of an item after validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDraft {
    pub kind: ItemKind,
    pub amount: f64,
    pub category: String,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("amount cannot be negative")]
    NegativeAmount,
    #[error("type must be 'income' or 'expense'")]
    InvalidKind,
    #[error("category is required")]
    MissingCategory,
    #[error("date is required")]
    MissingDate,
}

/// Seconds from the Unix epoch to `0001-01-01T00:00:00Z`.
const ZERO_DATE_SECS: i64 = -62_135_596_800;

/// `0001-01-01T00:00:00Z` is what zero-valued clients send for "no date".
pub fn is_zero_date(date: &DateTime<Utc>) -> bool {
    date.timestamp() == ZERO_DATE_SECS && date.timestamp_subsec_nanos() == 0
}

impl ItemPayload {
    /// Checks the payload, stopping at the first failed rule.
    ///
    /// Order: amount, type, category, date.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.amount < 0.0 {
            return Err(ValidationError::NegativeAmount);
        }
        self.kind.parse::<ItemKind>()?;
        if self.category.is_empty() {
            return Err(ValidationError::MissingCategory);
        }
        match self.date {
            Some(date) if !is_zero_date(&date) => Ok(()),
            _ => Err(ValidationError::MissingDate),
        }
    }

    pub fn into_draft(self) -> Result<ItemDraft, ValidationError> {
        self.validate()?;
        let kind = self.kind.parse::<ItemKind>()?;
        let date = self.date.filter(|d| !is_zero_date(d)).ok_or(ValidationError::MissingDate)?;
        Ok(ItemDraft { kind, amount: self.amount, category: self.category, date })
    }
}

impl ItemDraft {
    pub fn into_new_item(self, now: DateTime<Utc>) -> NewItem {
        NewItem {
            kind: self.kind,
            amount: self.amount,
            category: self.category,
            date: self.date,
            created_at: now,
            updated_at: now,
        }
    }
}

impl NewItem {
    pub fn with_id(self, id: i64) -> Item {
        Item {
            id,
            kind: self.kind,
            amount: self.amount,
            category: self.category,
            date: self.date,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Aggregate statistics over the items of a closed date range.
///
/// Every field is zero when the range matches nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Analytics {
    pub sum: f64,
    pub avg: f64,
    pub count: i64,
    pub median: f64,
    pub percentile_90: f64,
}
