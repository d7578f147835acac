//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `transaction`: Transaction records, types, categories and identifiers
//! - `budget`: Per-category monthly budgets
//! - `error`: Error types for the finance tracker

pub mod budget;
pub mod error;
pub mod transaction;

pub use budget::Budgets;
pub use error::TrackerError;
pub use transaction::{
    category_label, month_key, Category, Transaction, TransactionId, TransactionType,
    UNCATEGORIZED,
};
