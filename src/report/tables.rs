//! CSV tables for the report commands
//!
//! Every report is written through `csv::Writer` so descriptions containing
//! commas or quotes stay in their column. Money and percentages use two
//! decimal places.

use crate::core::aggregation::percentage_of;
use crate::core::charts::MonthlyPoint;
use crate::core::{BudgetLine, CategoryGroup, RecurringExpense, Summary};
use crate::io::csv_format::format_money;
use crate::types::{category_label, TrackerError, Transaction};
use csv::Writer;
use rust_decimal::Decimal;
use std::io::Write;

/// Write transactions in the given order
pub fn write_transactions(
    transactions: &[&Transaction],
    output: &mut dyn Write,
) -> Result<(), TrackerError> {
    let mut writer = Writer::from_writer(output);
    writer.write_record([
        "id",
        "date",
        "type",
        "category",
        "amount",
        "description",
        "payment_method",
    ])?;

    for transaction in transactions {
        writer.write_record([
            transaction.id.clone(),
            transaction.date.format("%Y-%m-%d").to_string(),
            transaction.transaction_type.key().to_string(),
            transaction.category_label().to_string(),
            format_money(transaction.amount),
            transaction.description.clone(),
            transaction.payment_method.clone().unwrap_or_default(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Write the headline figures as a single row
pub fn write_summary(
    summary: &Summary,
    median_expense: Decimal,
    output: &mut dyn Write,
) -> Result<(), TrackerError> {
    let mut writer = Writer::from_writer(output);
    writer.write_record([
        "total_income",
        "total_expenses",
        "balance",
        "savings_rate",
        "median_expense",
        "transactions",
    ])?;
    writer.write_record([
        format_money(summary.total_income),
        format_money(summary.total_expenses),
        format_money(summary.balance),
        format_money(summary.savings_rate),
        format_money(median_expense),
        summary.transaction_count.to_string(),
    ])?;
    writer.flush()?;
    Ok(())
}

/// Write category groups with their share of `overall_total`
pub fn write_categories(
    groups: &[CategoryGroup<'_>],
    overall_total: Decimal,
    output: &mut dyn Write,
) -> Result<(), TrackerError> {
    let mut writer = Writer::from_writer(output);
    writer.write_record(["category", "total", "count", "share"])?;

    for group in groups {
        writer.write_record([
            group.label().to_string(),
            format_money(group.total()),
            group.expenses.count.to_string(),
            format_money(percentage_of(group.total(), overall_total)),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

pub fn write_monthly(points: &[MonthlyPoint], output: &mut dyn Write) -> Result<(), TrackerError> {
    let mut writer = Writer::from_writer(output);
    writer.write_record(["month", "income", "expenses", "net"])?;

    for point in points {
        writer.write_record([
            point.label.clone(),
            format_money(point.income),
            format_money(point.expenses),
            format_money(point.net),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

pub fn write_budgets(lines: &[BudgetLine], output: &mut dyn Write) -> Result<(), TrackerError> {
    let mut writer = Writer::from_writer(output);
    writer.write_record([
        "category",
        "budget",
        "spent",
        "remaining",
        "utilization",
        "status",
    ])?;

    for line in lines {
        writer.write_record([
            line.category.label().to_string(),
            format_money(line.budget),
            format_money(line.spent),
            format_money(line.remaining),
            format_money(line.utilization),
            line.status.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

pub fn write_recurring(
    patterns: &[RecurringExpense<'_>],
    output: &mut dyn Write,
) -> Result<(), TrackerError> {
    let mut writer = Writer::from_writer(output);
    writer.write_record(["category", "amount", "occurrences"])?;

    for pattern in patterns {
        writer.write_record([
            category_label(pattern.category).to_string(),
            format_money(pattern.amount),
            pattern.count().to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Month-over-month comparison of expense totals
#[derive(Debug, Clone, PartialEq)]
pub struct TrendRow {
    pub month: String,
    pub expenses: Decimal,
    pub previous_month: String,
    pub previous_expenses: Decimal,
    /// Percentage change, see `calculate_spending_trend`
    pub change: Decimal,
}

pub fn write_trend(row: &TrendRow, output: &mut dyn Write) -> Result<(), TrackerError> {
    let mut writer = Writer::from_writer(output);
    writer.write_record([
        "month",
        "expenses",
        "previous_month",
        "previous_expenses",
        "change",
    ])?;
    writer.write_record([
        row.month.clone(),
        format_money(row.expenses),
        row.previous_month.clone(),
        format_money(row.previous_expenses),
        format_money(row.change),
    ])?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_support::{expense, income};
    use crate::core::{calculate_summary, get_top_categories, identify_recurring_expenses};
    use crate::types::Category;

    fn render<F>(write: F) -> String
    where
        F: FnOnce(&mut dyn Write) -> Result<(), TrackerError>,
    {
        let mut output = Vec::new();
        write(&mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_write_transactions_quotes_descriptions() {
        let mut record = expense(Category::Food, 1250, "2024-01-05");
        record.id = "t1".to_string();
        record.description = "Pizza, drinks".to_string();

        let output = render(|out| write_transactions(&[&record], out));
        assert_eq!(
            output,
            "id,date,type,category,amount,description,payment_method\n\
             t1,2024-01-05,expense,Food & Dining,12.50,\"Pizza, drinks\",\n"
        );
    }

    #[test]
    fn test_write_summary() {
        let records = vec![
            income(Category::Salary, 100000, "2024-01-01"),
            expense(Category::Food, 25000, "2024-01-02"),
        ];
        let summary = calculate_summary(&records);

        let output = render(|out| write_summary(&summary, Decimal::new(250, 0), out));
        assert_eq!(
            output,
            "total_income,total_expenses,balance,savings_rate,median_expense,transactions\n\
             1000.00,250.00,750.00,75.00,250.00,2\n"
        );
    }

    #[test]
    fn test_write_categories_with_shares() {
        let records = vec![
            expense(Category::Food, 1000, "2024-01-01"),
            expense(Category::Bills, 3000, "2024-01-02"),
        ];
        let groups = get_top_categories(&records, 5);

        let output = render(|out| write_categories(&groups, Decimal::new(40, 0), out));
        assert_eq!(
            output,
            "category,total,count,share\n\
             Bills & Utilities,30.00,1,75.00\n\
             Food & Dining,10.00,1,25.00\n"
        );
    }

    #[test]
    fn test_write_recurring_uncategorized() {
        let mut records = vec![
            expense(Category::Other, 999, "2024-01-01"),
            expense(Category::Other, 999, "2024-02-01"),
        ];
        for record in &mut records {
            record.category = None;
        }
        let patterns = identify_recurring_expenses(&records, 2);

        let output = render(|out| write_recurring(&patterns, out));
        assert_eq!(output, "category,amount,occurrences\nUncategorized,9.99,2\n");
    }

    #[test]
    fn test_write_trend_negative_change() {
        let row = TrendRow {
            month: "2024-03".to_string(),
            expenses: Decimal::new(50, 0),
            previous_month: "2024-02".to_string(),
            previous_expenses: Decimal::new(100, 0),
            change: Decimal::new(-50, 0),
        };

        let output = render(|out| write_trend(&row, out));
        assert_eq!(
            output,
            "month,expenses,previous_month,previous_expenses,change\n\
             2024-03,50.00,2024-02,100.00,-50.00\n"
        );
    }

    #[test]
    fn test_empty_tables_have_headers_only() {
        assert_eq!(render(|out| write_monthly(&[], out)), "month,income,expenses,net\n");
        assert_eq!(
            render(|out| write_budgets(&[], out)),
            "category,budget,spent,remaining,utilization,status\n"
        );
    }
}
