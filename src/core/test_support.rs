//! Builders for transaction fixtures used by unit tests

use crate::types::{Category, Transaction, TransactionType};
use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Build a transaction with an amount given in cents and a `YYYY-MM-DD` date
pub fn transaction(
    transaction_type: TransactionType,
    category: Option<Category>,
    cents: i64,
    date: &str,
) -> Transaction {
    let date: NaiveDate = date.parse().expect("fixture date must be valid");
    Transaction {
        id: Uuid::new_v4().to_string(),
        transaction_type,
        amount: Decimal::new(cents, 2),
        category,
        description: String::new(),
        date,
        timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
        payment_method: None,
    }
}

pub fn expense(category: Category, cents: i64, date: &str) -> Transaction {
    transaction(TransactionType::Expense, Some(category), cents, date)
}

pub fn income(category: Category, cents: i64, date: &str) -> Transaction {
    transaction(TransactionType::Income, Some(category), cents, date)
}
