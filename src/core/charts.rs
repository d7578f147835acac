//! Chart-ready series
//!
//! Thin reshaping of the grouping functions into ordered sequences a renderer
//! can draw directly. All values are serializable so they can be handed to a
//! front end as JSON.

use crate::core::aggregation::{
    add_saturating, category_distribution, group_expenses_by_month, sub_saturating,
};
use crate::core::budget::budget_report;
use crate::types::{Budgets, Transaction, TransactionType};
use rust_decimal::Decimal;
use serde::Serialize;

/// One slice of the spending-by-category pie
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub value: Decimal,
    pub percentage: Decimal,
}

/// Income and expenses for one month of the line chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyPoint {
    /// `YYYY-MM`
    pub label: String,
    pub income: Decimal,
    pub expenses: Decimal,
    pub net: Decimal,
}

/// Budget against actual spending for one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarEntry {
    pub label: String,
    pub budget: Decimal,
    pub spent: Decimal,
}

/// Category slices, largest first
pub fn prepare_pie_chart_data<'a, I>(transactions: I) -> Vec<PieSlice>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    category_distribution(transactions)
        .into_iter()
        .map(|share| PieSlice {
            label: share.label,
            value: share.total,
            percentage: share.percentage,
        })
        .collect()
}

/// Monthly income and expense totals, oldest month first
pub fn prepare_line_chart_data<'a, I>(transactions: I) -> Vec<MonthlyPoint>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    group_expenses_by_month(transactions)
        .into_iter()
        .map(|(month, group)| {
            let (mut income, mut expenses) = (Decimal::ZERO, Decimal::ZERO);
            for transaction in group.items {
                match transaction.transaction_type {
                    TransactionType::Income => {
                        income = add_saturating(income, transaction.amount)
                    }
                    TransactionType::Expense => {
                        expenses = add_saturating(expenses, transaction.amount)
                    }
                }
            }
            MonthlyPoint {
                label: month,
                income,
                expenses,
                net: sub_saturating(income, expenses),
            }
        })
        .collect()
}

/// Budget and spending per budgeted category for a `YYYY-MM` month
pub fn prepare_bar_chart_data(
    transactions: &[Transaction],
    budgets: &Budgets,
    month: &str,
) -> Vec<BarEntry> {
    budget_report(transactions, budgets, month)
        .into_iter()
        .map(|line| BarEntry {
            label: line.category.label().to_string(),
            budget: line.budget,
            spent: line.spent,
        })
        .collect()
}
