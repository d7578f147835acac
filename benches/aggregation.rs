//! Benchmark suite for the aggregation functions
//!
//! Measures the reports over generated ledgers of increasing size using the
//! divan benchmarking framework.
//!
//! # Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench
//! ```
//!
//! # Generated Ledgers
//!
//! Each ledger spreads records over all categories and twelve months of 2024,
//! with one income record for every ten. Amounts repeat often enough for the
//! recurring-expense detection to find patterns.

use chrono::{NaiveDate, TimeZone, Utc};
use finance_tracker::core::{
    budget_report, calculate_median_expense, calculate_summary, get_top_categories,
    identify_recurring_expenses, prepare_line_chart_data, sort_expenses, SortBy, SortOrder,
};
use finance_tracker::io::{export_to_csv, CsvMode};
use finance_tracker::{Budgets, Category, Transaction, TransactionType};
use rust_decimal::Decimal;

const SIZES: &[usize] = &[100, 1_000, 10_000];

fn main() {
    divan::main();
}

fn generate_ledger(size: usize) -> Vec<Transaction> {
    let timestamp = Utc
        .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .expect("Valid timestamp");

    (0..size)
        .map(|i| {
            let transaction_type = if i % 10 == 0 {
                TransactionType::Income
            } else {
                TransactionType::Expense
            };
            let month = (i % 12) as u32 + 1;
            let day = (i % 28) as u32 + 1;

            Transaction {
                id: format!("t{}", i),
                transaction_type,
                amount: Decimal::new(((i * 37) % 50 + 1) as i64 * 100, 2),
                category: Some(Category::ALL[i % Category::ALL.len()]),
                description: format!("Record {}", i),
                date: NaiveDate::from_ymd_opt(2024, month, day).expect("Valid date"),
                timestamp,
                payment_method: None,
            }
        })
        .collect()
}

fn generate_budgets() -> Budgets {
    Category::ALL
        .iter()
        .filter(|category| !category.is_income())
        .map(|category| (*category, Decimal::new(500, 0)))
        .collect()
}

/// Headline figures over every record
#[divan::bench(args = SIZES)]
fn summary(bencher: divan::Bencher, size: usize) {
    bencher
        .with_inputs(|| generate_ledger(size))
        .bench_refs(|records| calculate_summary(records.iter()));
}

/// Top five categories of the expense records
#[divan::bench(args = SIZES)]
fn top_categories(bencher: divan::Bencher, size: usize) {
    bencher
        .with_inputs(|| generate_ledger(size))
        .bench_refs(|records| {
            let expenses = records.iter().filter(|t| t.is_expense());
            get_top_categories(expenses, 5).len()
        });
}

#[divan::bench(args = SIZES)]
fn median_expense(bencher: divan::Bencher, size: usize) {
    bencher
        .with_inputs(|| generate_ledger(size))
        .bench_refs(|records| calculate_median_expense(records.iter().filter(|t| t.is_expense())));
}

#[divan::bench(args = SIZES)]
fn recurring_expenses(bencher: divan::Bencher, size: usize) {
    bencher
        .with_inputs(|| generate_ledger(size))
        .bench_refs(|records| {
            identify_recurring_expenses(records.iter().filter(|t| t.is_expense()), 3).len()
        });
}

#[divan::bench(args = SIZES)]
fn monthly_line_chart(bencher: divan::Bencher, size: usize) {
    bencher
        .with_inputs(|| generate_ledger(size))
        .bench_refs(|records| prepare_line_chart_data(records.iter()));
}

#[divan::bench(args = SIZES)]
fn budget_month_report(bencher: divan::Bencher, size: usize) {
    bencher
        .with_inputs(|| (generate_ledger(size), generate_budgets()))
        .bench_refs(|(records, budgets)| budget_report(records, budgets, "2024-06"));
}

/// Stable sort by category label, which compares strings
#[divan::bench(args = SIZES)]
fn sort_by_category(bencher: divan::Bencher, size: usize) {
    bencher
        .with_inputs(|| generate_ledger(size))
        .bench_refs(|records| {
            sort_expenses(records.iter(), SortBy::Category, SortOrder::Asc).len()
        });
}

#[divan::bench(args = SIZES)]
fn csv_export(bencher: divan::Bencher, size: usize) {
    bencher
        .with_inputs(|| generate_ledger(size))
        .bench_refs(|records| export_to_csv(records.iter(), CsvMode::Raw).expect("Export failed"));
}
