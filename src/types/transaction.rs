//! Transaction-related types for the finance tracker
//!
//! This module defines the transaction record, its income/expense type and the
//! closed set of categories a record can be filed under.
//!
//! Records are read back from whatever the persistence layer last stored, so
//! deserialization is deliberately forgiving: a missing or unparseable amount
//! becomes zero and an unknown category becomes `None` (grouped as
//! "Uncategorized"). Strict checks happen at the validation boundary instead.

use crate::types::error::TrackerError;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Transaction identifier
///
/// Opaque string. Records created by the ledger carry a UUID v4.
pub type TransactionId = String;

/// Label used for records without a recognised category
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Whether a transaction brings money in or takes it out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money received (salary, freelance work, returns)
    Income,

    /// Money spent
    Expense,
}

impl TransactionType {
    /// Lowercase key used in storage and on the command line
    pub fn key(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for TransactionType {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            _ => Err(TrackerError::invalid_transaction_type(s)),
        }
    }
}

/// Fixed set of categories a transaction can be filed under
///
/// The declaration order is the display order used by budget reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Food,
    Transport,
    Shopping,
    Entertainment,
    Bills,
    Health,
    Salary,
    Freelance,
    Investment,
    Other,
}

impl Category {
    /// Every category, in declaration order
    pub const ALL: [Category; 10] = [
        Category::Food,
        Category::Transport,
        Category::Shopping,
        Category::Entertainment,
        Category::Bills,
        Category::Health,
        Category::Salary,
        Category::Freelance,
        Category::Investment,
        Category::Other,
    ];

    /// Lowercase key used in storage and on the command line
    pub fn key(&self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Transport => "transport",
            Category::Shopping => "shopping",
            Category::Entertainment => "entertainment",
            Category::Bills => "bills",
            Category::Health => "health",
            Category::Salary => "salary",
            Category::Freelance => "freelance",
            Category::Investment => "investment",
            Category::Other => "other",
        }
    }

    /// Human-readable label for reports and exports
    pub fn label(&self) -> &'static str {
        match self {
            Category::Food => "Food & Dining",
            Category::Transport => "Transportation",
            Category::Shopping => "Shopping",
            Category::Entertainment => "Entertainment",
            Category::Bills => "Bills & Utilities",
            Category::Health => "Healthcare",
            Category::Salary => "Salary",
            Category::Freelance => "Freelance",
            Category::Investment => "Investment",
            Category::Other => "Other",
        }
    }

    /// Categories that normally describe money coming in
    pub fn is_income(&self) -> bool {
        matches!(
            self,
            Category::Salary | Category::Freelance | Category::Investment
        )
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = TrackerError;

    /// Parse a category key (case-insensitive, surrounding whitespace ignored)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|category| category.key() == key)
            .ok_or_else(|| TrackerError::invalid_category(s))
    }
}

/// Display label for an optional category
pub fn category_label(category: Option<Category>) -> &'static str {
    category.map(|c| c.label()).unwrap_or(UNCATEGORIZED)
}

/// Month key in `YYYY-MM` form with a zero-padded month
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// A single income or expense entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Opaque identifier
    #[serde(deserialize_with = "deserialize_id")]
    pub id: TransactionId,

    /// Income or expense
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,

    /// Non-negative amount; missing or malformed values load as zero
    #[serde(default, deserialize_with = "deserialize_lenient_amount")]
    pub amount: Decimal,

    /// Category, `None` when absent or not one of the known keys
    #[serde(default, deserialize_with = "deserialize_lenient_category")]
    pub category: Option<Category>,

    /// Free text
    #[serde(default)]
    pub description: String,

    /// Calendar date of the transaction (day granularity)
    pub date: NaiveDate,

    /// Creation instant
    pub timestamp: DateTime<Utc>,

    /// How the transaction was paid, if recorded
    #[serde(
        default,
        rename = "paymentMethod",
        skip_serializing_if = "Option::is_none"
    )]
    pub payment_method: Option<String>,
}

impl Transaction {
    pub fn is_expense(&self) -> bool {
        self.transaction_type == TransactionType::Expense
    }

    pub fn is_income(&self) -> bool {
        self.transaction_type == TransactionType::Income
    }

    /// `YYYY-MM` key of the transaction date
    pub fn month_key(&self) -> String {
        month_key(self.date)
    }

    /// Display label of the category, "Uncategorized" when missing
    pub fn category_label(&self) -> &'static str {
        category_label(self.category)
    }
}

/// Parse a stored amount value, accepting JSON numbers and numeric strings
pub(crate) fn parse_amount_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(number) => {
            let text = number.to_string();
            Decimal::from_str(&text)
                .or_else(|_| Decimal::from_scientific(&text))
                .ok()
        }
        Value::String(text) => Decimal::from_str(text.trim()).ok(),
        _ => None,
    }
}

fn deserialize_lenient_amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(parse_amount_value)
        .unwrap_or(Decimal::ZERO))
}

fn deserialize_lenient_category<'de, D>(deserializer: D) -> Result<Option<Category>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(key)) => key.parse().ok(),
        _ => None,
    })
}

// Older stores may hold numeric identifiers
fn deserialize_id<'de, D>(deserializer: D) -> Result<TransactionId, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(id) => Ok(id),
        Value::Number(id) => Ok(id.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "invalid transaction id: {}",
            other
        ))),
    }
}
