//! Error types for the finance tracker
//!
//! Expected domain conditions (empty lists, zero budgets, missing data) are
//! never errors: the aggregation functions fall back to neutral values. The
//! variants here cover what genuinely cannot proceed.
//!
//! # Error Categories
//!
//! - **Storage Errors**: file I/O, JSON (de)serialization, unexpected store shape
//! - **Export Errors**: CSV writer failures
//! - **Input Errors**: rejected user input, unknown identifiers, bad month keys

use thiserror::Error;

/// Main error type for the finance tracker
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrackerError {
    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// JSON could not be parsed or produced
    #[error("Serialization error: {message}")]
    Serialization {
        /// Description of the serialization error
        message: String,
    },

    /// CSV output could not be written
    #[error("CSV error: {message}")]
    Csv {
        /// Description of the CSV error
        message: String,
    },

    /// A stored value does not have the shape the ledger expects
    #[error("Stored value for '{key}' is not {expected}")]
    InvalidStoreShape {
        /// Store key holding the value
        key: String,
        /// What the value should have been
        expected: String,
    },

    /// User input failed validation
    ///
    /// Carries every validation message, in the order they were found.
    #[error("Validation failed: {}", errors.join("; "))]
    Validation {
        /// Human-readable validation messages
        errors: Vec<String>,
    },

    /// Category string is not one of the known categories
    #[error("Unknown category '{value}'")]
    InvalidCategory {
        /// The rejected input
        value: String,
    },

    /// Transaction type string is neither income nor expense
    #[error("Invalid transaction type '{value}'")]
    InvalidTransactionType {
        /// The rejected input
        value: String,
    },

    /// Month key is not of the form `YYYY-MM`
    #[error("Invalid month '{value}', expected YYYY-MM")]
    InvalidMonth {
        /// The rejected input
        value: String,
    },

    /// Sort field or order string is not recognised
    #[error("Invalid {option} '{value}'")]
    InvalidSortOption {
        /// Which option was being parsed
        option: String,
        /// The rejected input
        value: String,
    },

    /// No transaction with the given identifier exists
    #[error("Transaction {id} not found")]
    TransactionNotFound {
        /// Identifier that was looked up
        id: String,
    },
}

impl From<std::io::Error> for TrackerError {
    fn from(error: std::io::Error) -> Self {
        TrackerError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for TrackerError {
    fn from(error: serde_json::Error) -> Self {
        TrackerError::Serialization {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for TrackerError {
    fn from(error: csv::Error) -> Self {
        TrackerError::Csv {
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl TrackerError {
    /// Create a Validation error from collected messages
    pub fn validation(errors: Vec<String>) -> Self {
        TrackerError::Validation { errors }
    }

    /// Create an InvalidCategory error
    pub fn invalid_category(value: &str) -> Self {
        TrackerError::InvalidCategory {
            value: value.to_string(),
        }
    }

    /// Create an InvalidTransactionType error
    pub fn invalid_transaction_type(value: &str) -> Self {
        TrackerError::InvalidTransactionType {
            value: value.to_string(),
        }
    }

    /// Create an InvalidMonth error
    pub fn invalid_month(value: &str) -> Self {
        TrackerError::InvalidMonth {
            value: value.to_string(),
        }
    }

    /// Create an InvalidSortOption error
    pub fn invalid_sort_option(option: &str, value: &str) -> Self {
        TrackerError::InvalidSortOption {
            option: option.to_string(),
            value: value.to_string(),
        }
    }

    /// Create a Csv error
    pub fn csv(message: impl Into<String>) -> Self {
        TrackerError::Csv {
            message: message.into(),
        }
    }

    /// Create an InvalidStoreShape error
    pub fn invalid_store_shape(key: &str, expected: &str) -> Self {
        TrackerError::InvalidStoreShape {
            key: key.to_string(),
            expected: expected.to_string(),
        }
    }

    /// Create a TransactionNotFound error
    pub fn transaction_not_found(id: &str) -> Self {
        TrackerError::TransactionNotFound { id: id.to_string() }
    }
}
