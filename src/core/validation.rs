//! Validation of user input
//!
//! User input arrives as raw strings in a [`TransactionDraft`] or
//! [`BudgetDraft`]. Validation never fails outright: it returns a
//! [`ValidationResult`] listing every problem in field order, and callers decide
//! what to do with it. The conversion methods (`into_transaction`, `parse`)
//! reuse the same checks and return [`TrackerError::Validation`] with the same
//! messages when input is rejected.
//!
//! Unknown categories are rejected here; this is the boundary where free text
//! becomes a [`Category`].

use crate::types::{Category, TrackerError, Transaction, TransactionId, TransactionType};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Longest accepted description, in characters
pub const MAX_DESCRIPTION_LEN: usize = 200;

/// Largest accepted transaction or budget amount
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Most decimal places an amount may carry (trailing zeros excluded)
pub const MAX_DECIMAL_PLACES: u32 = 2;

/// Smallest accepted non-zero budget
pub const MIN_BUDGET: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Outcome of validating a draft
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    fn from_errors(errors: Vec<String>) -> Self {
        ValidationResult {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

/// Raw transaction input as typed by the user
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransactionDraft {
    pub transaction_type: String,
    pub amount: String,
    pub category: String,
    pub description: String,
    pub date: String,
    pub payment_method: Option<String>,
}

/// Raw budget input as typed by the user
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BudgetDraft {
    pub category: String,
    pub amount: String,
}

#[derive(Default)]
struct ParsedTransaction {
    transaction_type: Option<TransactionType>,
    amount: Option<Decimal>,
    category: Option<Category>,
    date: Option<NaiveDate>,
}

fn parse_category(raw: &str, errors: &mut Vec<String>) -> Option<Category> {
    if raw.trim().is_empty() {
        errors.push("Category is required".to_string());
        return None;
    }
    match Category::from_str(raw) {
        Ok(category) => Some(category),
        Err(_) => {
            errors.push(format!("Unknown category '{}'", raw.trim()));
            None
        }
    }
}

fn parse_decimal(raw: &str, field: &str, errors: &mut Vec<String>) -> Option<Decimal> {
    let raw = raw.trim();
    if raw.is_empty() {
        errors.push(format!("{} is required", field));
        return None;
    }
    match Decimal::from_str(raw) {
        Ok(amount) => Some(amount),
        Err(_) => {
            errors.push(format!("{} must be a valid number", field));
            None
        }
    }
}

/// Checks shared by transaction and budget amounts; true when within bounds
fn check_amount_bounds(amount: Decimal, field: &str, errors: &mut Vec<String>) -> bool {
    if amount > MAX_AMOUNT {
        errors.push(format!("{} must not exceed {}", field, MAX_AMOUNT));
        false
    } else if amount.normalize().scale() > MAX_DECIMAL_PLACES {
        errors.push(format!(
            "{} must have at most {} decimal places",
            field, MAX_DECIMAL_PLACES
        ));
        false
    } else {
        true
    }
}

fn parse_transaction(draft: &TransactionDraft) -> (ParsedTransaction, Vec<String>) {
    let mut errors = Vec::new();
    let mut parsed = ParsedTransaction::default();

    match TransactionType::from_str(&draft.transaction_type) {
        Ok(transaction_type) => parsed.transaction_type = Some(transaction_type),
        Err(_) => errors.push("Type must be either income or expense".to_string()),
    }

    if let Some(amount) = parse_decimal(&draft.amount, "Amount", &mut errors) {
        if amount <= Decimal::ZERO {
            errors.push("Amount must be greater than zero".to_string());
        } else if check_amount_bounds(amount, "Amount", &mut errors) {
            parsed.amount = Some(amount);
        }
    }

    parsed.category = parse_category(&draft.category, &mut errors);

    let date = draft.date.trim();
    if date.is_empty() {
        errors.push("Date is required".to_string());
    } else {
        match NaiveDate::parse_from_str(date, DATE_FORMAT) {
            Ok(date) => parsed.date = Some(date),
            Err(_) => errors.push("Date must be a valid date (YYYY-MM-DD)".to_string()),
        }
    }

    if draft.description.chars().count() > MAX_DESCRIPTION_LEN {
        errors.push(format!(
            "Description must be at most {} characters",
            MAX_DESCRIPTION_LEN
        ));
    }

    (parsed, errors)
}

/// Check a transaction draft, collecting every problem found
pub fn validate_expense(draft: &TransactionDraft) -> ValidationResult {
    let (_, errors) = parse_transaction(draft);
    ValidationResult::from_errors(errors)
}

/// Check a budget draft, collecting every problem found
pub fn validate_budget(draft: &BudgetDraft) -> ValidationResult {
    match draft.parse() {
        Ok(_) => ValidationResult::from_errors(Vec::new()),
        Err(TrackerError::Validation { errors }) => ValidationResult::from_errors(errors),
        Err(other) => ValidationResult::from_errors(vec![other.to_string()]),
    }
}

impl TransactionDraft {
    /// Build a transaction record from valid input
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::Validation` carrying the messages
    /// [`validate_expense`] would report.
    pub fn into_transaction(
        self,
        id: TransactionId,
        timestamp: DateTime<Utc>,
    ) -> Result<Transaction, TrackerError> {
        let (parsed, errors) = parse_transaction(&self);
        match parsed {
            ParsedTransaction {
                transaction_type: Some(transaction_type),
                amount: Some(amount),
                category: Some(category),
                date: Some(date),
            } if errors.is_empty() => Ok(Transaction {
                id,
                transaction_type,
                amount,
                category: Some(category),
                description: self.description.trim().to_string(),
                date,
                timestamp,
                payment_method: self
                    .payment_method
                    .map(|method| method.trim().to_string())
                    .filter(|method| !method.is_empty()),
            }),
            _ => Err(TrackerError::validation(errors)),
        }
    }
}

impl BudgetDraft {
    /// Parse the draft into a category and an amount that is zero or at
    /// least [`MIN_BUDGET`]
    pub fn parse(&self) -> Result<(Category, Decimal), TrackerError> {
        let mut errors = Vec::new();

        let category = parse_category(&self.category, &mut errors);
        let amount = parse_decimal(&self.amount, "Budget amount", &mut errors)
            .filter(|amount| {
                if *amount < Decimal::ZERO {
                    errors.push("Budget amount cannot be negative".to_string());
                    false
                } else if !amount.is_zero() && *amount < MIN_BUDGET {
                    errors.push(format!(
                        "Budget amount must be zero or at least {}",
                        MIN_BUDGET
                    ));
                    false
                } else {
                    check_amount_bounds(*amount, "Budget amount", &mut errors)
                }
            });

        match (category, amount) {
            (Some(category), Some(amount)) if errors.is_empty() => Ok((category, amount)),
            _ => Err(TrackerError::validation(errors)),
        }
    }
}
