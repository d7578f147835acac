//! Core business logic module
//!
//! This module contains the finance tracker's domain logic:
//! - `traits` - The key-value persistence boundary
//! - `aggregation` - Totals, groupings and statistics over transactions
//! - `budget` - Budget utilization, status tiers and per-category reports
//! - `sorting` - Stable ordering of transaction lists
//! - `validation` - Checks on raw user input
//! - `charts` - Chart-ready series built on the groupings
//! - `ledger` - Owned transaction and budget collections mirrored to a store

pub mod aggregation;
pub mod budget;
pub mod charts;
pub mod ledger;
pub mod sorting;
pub mod traits;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_support;

pub use aggregation::{
    calculate_median_expense, calculate_savings_rate, calculate_spending_trend,
    calculate_summary, calculate_total_expenses, category_distribution,
    filter_expenses_by_date_range, get_top_categories, group_expenses_by_category,
    group_expenses_by_month, identify_recurring_expenses, CategoryGroup, ExpenseGroup,
    RecurringExpense, Summary,
};
pub use budget::{
    budget_report, calculate_budget_utilization, get_budget_status, BudgetLine, BudgetStatus,
};
pub use charts::{prepare_bar_chart_data, prepare_line_chart_data, prepare_pie_chart_data};
pub use ledger::Ledger;
pub use sorting::{sort_expenses, SortBy, SortOrder};
pub use traits::KeyValueStore;
pub use validation::{
    validate_budget, validate_expense, BudgetDraft, TransactionDraft, ValidationResult,
};
