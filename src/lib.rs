//! Personal Finance Tracker Library
//! # Overview
//!
//! This library records income and expense transactions with per-category
//! monthly budgets and derives reports from them: totals, groupings,
//! statistics, budget standing, recurring-expense detection, chart series and
//! CSV/JSON exports.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Transaction, Category, Budgets, TrackerError)
//! - [`core`] - Business logic components:
//!   - [`core::aggregation`] - Totals, groupings and statistics
//!   - [`core::budget`] - Budget utilization and status tiers
//!   - [`core::sorting`] - Stable ordering of transaction lists
//!   - [`core::validation`] - Checks on raw user input
//!   - [`core::charts`] - Chart-ready series
//!   - [`core::ledger`] - The owned transaction and budget state, persisted
//!     through a [`core::KeyValueStore`]
//! - [`io`] - Stores (in-memory, JSON file) and export payloads
//! - [`config`] - Report tunables
//! - [`cli`] - CLI arguments parsing
//! - [`report`] - Command execution and CSV report tables
//!
//! # Categories
//!
//! Every transaction is filed under one of a fixed set of categories, each with
//! a display label:
//!
//! - **Expense**: Food & Dining, Transportation, Shopping, Entertainment,
//!   Bills & Utilities, Healthcare, Other
//! - **Income**: Salary, Freelance, Investment
//!
//! Records loaded with an unknown category are kept and reported as
//! "Uncategorized".
//!
//! # Budget Status
//!
//! Spending against a monthly budget falls into one of four tiers:
//! - `healthy`: below 75% of the budget
//! - `caution`: 75% up to 90%
//! - `warning`: 90% up to 100%
//! - `exceeded`: 100% or more

// Module declarations
pub mod cli;
pub mod config;
pub mod core;
pub mod io;
pub mod report;
pub mod types;

pub use config::ReportConfig;
pub use core::{KeyValueStore, Ledger};
pub use io::{JsonFileStore, MemoryStore};
pub use types::{Budgets, Category, TrackerError, Transaction, TransactionId, TransactionType};
