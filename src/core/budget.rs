//! Budget utilization and status
//!
//! This module compares spending against the per-category monthly budgets.
//!
//! # Status Tiers
//!
//! Spending is classified on the uncapped spent/budget ratio, checked from the
//! most severe tier down so the highest matching tier wins:
//!
//! | Ratio     | Status   |
//! |-----------|----------|
//! | >= 100%   | exceeded |
//! | >= 90%    | warning  |
//! | >= 75%    | caution  |
//! | otherwise | healthy  |

use crate::core::aggregation::{
    calculate_total_expenses, ratio_percent, sub_saturating, transactions_in_month, ONE_HUNDRED,
};
use crate::types::{Budgets, Category, Transaction};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

const EXCEEDED_AT: Decimal = ONE_HUNDRED;
const WARNING_AT: Decimal = Decimal::from_parts(90, 0, 0, false, 0);
const CAUTION_AT: Decimal = Decimal::from_parts(75, 0, 0, false, 0);

/// How close spending is to a category budget
///
/// Variants are ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    Healthy,
    Caution,
    Warning,
    Exceeded,
}

impl BudgetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetStatus::Healthy => "healthy",
            BudgetStatus::Caution => "caution",
            BudgetStatus::Warning => "warning",
            BudgetStatus::Exceeded => "exceeded",
        }
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Budget standing of one category for one month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetLine {
    pub category: Category,
    pub budget: Decimal,
    pub spent: Decimal,
    /// Budget minus spent; negative once the budget is exceeded
    pub remaining: Decimal,
    pub utilization: Decimal,
    pub status: BudgetStatus,
}

/// Percentage of the budget used, capped at 100
///
/// Returns 0 for a zero budget.
pub fn calculate_budget_utilization(spent: Decimal, budget: Decimal) -> Decimal {
    if budget.is_zero() {
        return Decimal::ZERO;
    }
    ratio_percent(spent, budget).min(ONE_HUNDRED)
}

/// Status tier for `spent` against `budget`
///
/// Any spending against a zero budget counts as exceeded; no spending is healthy.
pub fn get_budget_status(spent: Decimal, budget: Decimal) -> BudgetStatus {
    if budget.is_zero() {
        return if spent > Decimal::ZERO {
            BudgetStatus::Exceeded
        } else {
            BudgetStatus::Healthy
        };
    }

    let ratio = ratio_percent(spent, budget);
    if ratio >= EXCEEDED_AT {
        BudgetStatus::Exceeded
    } else if ratio >= WARNING_AT {
        BudgetStatus::Warning
    } else if ratio >= CAUTION_AT {
        BudgetStatus::Caution
    } else {
        BudgetStatus::Healthy
    }
}

/// One line per budgeted category for the given `YYYY-MM` month
///
/// `spent` counts only expense records of that category dated in the month.
pub fn budget_report(
    transactions: &[Transaction],
    budgets: &Budgets,
    month: &str,
) -> Vec<BudgetLine> {
    let month_expenses: Vec<&Transaction> = transactions_in_month(transactions, month)
        .into_iter()
        .filter(|t| t.is_expense())
        .collect();

    budgets
        .iter()
        .map(|(category, budget)| {
            let spent = calculate_total_expenses(
                month_expenses
                    .iter()
                    .copied()
                    .filter(|t| t.category == Some(category)),
            );
            BudgetLine {
                category,
                budget,
                spent,
                remaining: sub_saturating(budget, spent),
                utilization: calculate_budget_utilization(spent, budget),
                status: get_budget_status(spent, budget),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_support::{expense, income};
    use rstest::rstest;

    fn d(value: i64) -> Decimal {
        Decimal::new(value, 0)
    }

    #[rstest]
    #[case::half(d(50), d(100), d(50))]
    #[case::exact(d(100), d(100), d(100))]
    #[case::capped(d(250), d(100), d(100))]
    #[case::nothing_spent(d(0), d(100), d(0))]
    fn test_budget_utilization(
        #[case] spent: Decimal,
        #[case] budget: Decimal,
        #[case] expected: Decimal,
    ) {
        assert_eq!(calculate_budget_utilization(spent, budget), expected);
    }

    #[rstest]
    fn test_zero_budget_utilization_is_zero(#[values(0, 1, 100, 1_000_000)] spent: i64) {
        assert_eq!(calculate_budget_utilization(d(spent), Decimal::ZERO), Decimal::ZERO);
    }

    #[rstest]
    #[case(d(0), BudgetStatus::Healthy)]
    #[case(Decimal::new(7499, 2), BudgetStatus::Healthy)]
    #[case(d(75), BudgetStatus::Caution)]
    #[case(Decimal::new(8999, 2), BudgetStatus::Caution)]
    #[case(d(90), BudgetStatus::Warning)]
    #[case(Decimal::new(9999, 2), BudgetStatus::Warning)]
    #[case(d(100), BudgetStatus::Exceeded)]
    #[case(d(180), BudgetStatus::Exceeded)]
    fn test_budget_status_thresholds(#[case] spent: Decimal, #[case] expected: BudgetStatus) {
        assert_eq!(get_budget_status(spent, d(100)), expected);
    }

    #[rstest]
    #[case(d(0), BudgetStatus::Healthy)]
    #[case(Decimal::new(1, 2), BudgetStatus::Exceeded)]
    fn test_budget_status_for_zero_budget(
        #[case] spent: Decimal,
        #[case] expected: BudgetStatus,
    ) {
        assert_eq!(get_budget_status(spent, Decimal::ZERO), expected);
    }

    #[rstest]
    fn test_budget_status_is_monotonic(#[values(0, 1, 37, 250)] budget: i64) {
        let budget = d(budget);
        let mut previous = BudgetStatus::Healthy;
        for step in 0..=400 {
            let spent = Decimal::new(step, 0) * budget / d(200);
            let status = get_budget_status(spent, budget);
            assert!(
                status >= previous,
                "status regressed from {} to {} at spent {}",
                previous,
                status,
                spent
            );
            previous = status;
        }
    }

    #[test]
    fn test_budget_report_counts_month_expenses_per_category() {
        let records = vec![
            expense(Category::Food, 12000, "2024-03-02"),
            expense(Category::Food, 6000, "2024-03-20"),
            expense(Category::Food, 99900, "2024-02-28"),
            expense(Category::Bills, 5000, "2024-03-05"),
            income(Category::Salary, 500000, "2024-03-01"),
        ];
        let budgets: Budgets = [
            (Category::Food, d(200)),
            (Category::Salary, d(100)),
            (Category::Transport, d(50)),
        ]
        .into_iter()
        .collect();

        let report = budget_report(&records, &budgets, "2024-03");
        assert_eq!(report.len(), 3);

        assert_eq!(report[0].category, Category::Food);
        assert_eq!(report[0].spent, d(180));
        assert_eq!(report[0].remaining, d(20));
        assert_eq!(report[0].utilization, d(90));
        assert_eq!(report[0].status, BudgetStatus::Warning);

        // income never counts as spending
        assert_eq!(report[1].category, Category::Salary);
        assert_eq!(report[1].spent, Decimal::ZERO);
        assert_eq!(report[1].status, BudgetStatus::Healthy);

        assert_eq!(report[2].category, Category::Transport);
        assert_eq!(report[2].remaining, d(50));
    }

    #[test]
    fn test_tiny_budget_saturates_as_exceeded() {
        let tiny = Decimal::new(1, 28);
        assert_eq!(calculate_budget_utilization(Decimal::ONE, tiny), d(100));
        assert_eq!(get_budget_status(Decimal::ONE, tiny), BudgetStatus::Exceeded);
    }

    #[test]
    fn test_budget_report_with_out_of_range_spending() {
        let mut records = vec![
            expense(Category::Food, 100, "2024-03-01"),
            expense(Category::Food, 100, "2024-03-02"),
        ];
        for record in &mut records {
            record.amount = Decimal::MAX;
        }
        let budgets: Budgets = [(Category::Food, d(100))].into_iter().collect();

        let report = budget_report(&records, &budgets, "2024-03");
        assert_eq!(report[0].spent, Decimal::MAX);
        assert!(report[0].remaining < Decimal::ZERO);
        assert_eq!(report[0].utilization, d(100));
        assert_eq!(report[0].status, BudgetStatus::Exceeded);
    }

    #[test]
    fn test_budget_report_negative_remaining_when_exceeded() {
        let records = vec![expense(Category::Shopping, 15000, "2024-03-02")];
        let budgets: Budgets = [(Category::Shopping, d(100))].into_iter().collect();

        let report = budget_report(&records, &budgets, "2024-03");
        assert_eq!(report[0].remaining, d(-50));
        assert_eq!(report[0].utilization, d(100));
        assert_eq!(report[0].status, BudgetStatus::Exceeded);
    }
}
