//! Command execution
//!
//! Runs one parsed [`Command`] against a [`Ledger`] and writes the result to
//! an output sink:
//!
//! - mutations (`add`, `delete`, `set-budget`) print a one-line confirmation
//! - reports print a CSV table (see [`tables`])
//! - `chart` prints pretty JSON
//! - `export` prints the payload, or saves it and prints where it went
//!
//! Commands that take an optional month default to the month of `today`.

pub mod tables;

use crate::cli::{ChartKind, CliArgs, Command, ExportFormat};
use crate::config::ReportConfig;
use crate::core::aggregation::{parse_month_key, previous_month_key, transactions_in_month};
use crate::core::{
    budget_report, calculate_median_expense, calculate_spending_trend, calculate_summary,
    calculate_total_expenses, filter_expenses_by_date_range, get_top_categories,
    identify_recurring_expenses, prepare_bar_chart_data, prepare_line_chart_data,
    prepare_pie_chart_data, sort_expenses, BudgetDraft, KeyValueStore, Ledger, TransactionDraft,
};
use crate::io::csv_format::format_money;
use crate::io::{export_to_csv, export_to_json, save_export, JsonFileStore};
use crate::types::{month_key, TrackerError, Transaction};
use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use std::io::Write;
use tables::TrendRow;
use tracing::debug;

/// Open the ledger named by `args` and execute its command
///
/// # Errors
///
/// Returns an error if the store cannot be opened or the command fails.
pub fn run(args: &CliArgs, output: &mut dyn Write) -> Result<(), TrackerError> {
    let store = JsonFileStore::open(&args.store)?;
    let mut ledger = Ledger::load(store)?;
    let config = args.to_report_config();
    execute(
        &args.command,
        &mut ledger,
        &config,
        Local::now().date_naive(),
        output,
    )
}

/// Execute a single command against `ledger`
pub fn execute<S: KeyValueStore>(
    command: &Command,
    ledger: &mut Ledger<S>,
    config: &ReportConfig,
    today: NaiveDate,
    output: &mut dyn Write,
) -> Result<(), TrackerError> {
    debug!(?command, "Executing command");

    match command {
        Command::Add {
            transaction_type,
            amount,
            category,
            date,
            description,
            payment_method,
        } => {
            let draft = TransactionDraft {
                transaction_type: transaction_type.clone(),
                amount: amount.clone(),
                category: category.clone(),
                description: description.clone(),
                date: date
                    .clone()
                    .unwrap_or_else(|| today.format("%Y-%m-%d").to_string()),
                payment_method: payment_method.clone(),
            };
            let added = ledger.add_transaction(draft)?;
            writeln!(
                output,
                "Added {} {}: {} {} on {}",
                added.transaction_type,
                added.id,
                format_money(added.amount),
                added.category_label(),
                added.date
            )?;
        }

        Command::Delete { id } => {
            let removed = ledger.delete_transaction(id)?;
            writeln!(output, "Deleted {} {}", removed.transaction_type, removed.id)?;
        }

        Command::SetBudget { category, amount } => {
            let draft = BudgetDraft {
                category: category.clone(),
                amount: amount.clone(),
            };
            let (category, amount) = ledger.set_budget(&draft)?;
            writeln!(
                output,
                "Budget for {} set to {}",
                category.label(),
                format_money(amount)
            )?;
        }

        Command::List {
            sort_by,
            order,
            from,
            to,
        } => {
            let in_range = filter_expenses_by_date_range(
                ledger.transactions(),
                from.unwrap_or(NaiveDate::MIN),
                to.unwrap_or(NaiveDate::MAX),
            );
            let sorted = sort_expenses(in_range, *sort_by, *order);
            tables::write_transactions(&sorted, output)?;
        }

        Command::Summary => {
            let summary = calculate_summary(ledger.transactions());
            let median = calculate_median_expense(ledger.expenses());
            tables::write_summary(&summary, median, output)?;
        }

        Command::Categories => {
            let expenses = ledger.expenses();
            let total = calculate_total_expenses(expenses.iter().copied());
            let top = get_top_categories(expenses.iter().copied(), config.top_categories_limit);
            tables::write_categories(&top, total, output)?;
        }

        Command::Monthly => {
            let points = prepare_line_chart_data(ledger.transactions());
            tables::write_monthly(&points, output)?;
        }

        Command::Budgets { month } => {
            let month = resolve_month(month.as_deref(), today)?;
            let lines = budget_report(ledger.transactions(), ledger.budgets(), &month);
            tables::write_budgets(&lines, output)?;
        }

        Command::Recurring => {
            let patterns =
                identify_recurring_expenses(ledger.expenses(), config.recurring_threshold);
            tables::write_recurring(&patterns, output)?;
        }

        Command::Trend { month } => {
            let month = resolve_month(month.as_deref(), today)?;
            let previous_month = previous_month_key(&month)?;
            let expenses = ledger.expenses();
            let current = month_expense_total(&expenses, &month);
            let previous = month_expense_total(&expenses, &previous_month);

            let row = TrendRow {
                change: calculate_spending_trend(current, previous).round_dp(2),
                month,
                expenses: current,
                previous_month,
                previous_expenses: previous,
            };
            tables::write_trend(&row, output)?;
        }

        Command::Chart { kind, month } => {
            let json = match kind {
                ChartKind::Pie => {
                    serde_json::to_string_pretty(&prepare_pie_chart_data(ledger.expenses()))?
                }
                ChartKind::Line => {
                    serde_json::to_string_pretty(&prepare_line_chart_data(ledger.transactions()))?
                }
                ChartKind::Bar => {
                    let month = resolve_month(month.as_deref(), today)?;
                    serde_json::to_string_pretty(&prepare_bar_chart_data(
                        ledger.transactions(),
                        ledger.budgets(),
                        &month,
                    ))?
                }
            };
            writeln!(output, "{}", json)?;
        }

        Command::Export {
            format,
            output: path,
        } => {
            let payload = match format {
                ExportFormat::Csv => export_to_csv(ledger.transactions(), config.csv_mode)?,
                ExportFormat::Json => {
                    let mut json = export_to_json(ledger.transactions())?;
                    json.push('\n');
                    json
                }
            };

            match path {
                Some(path) => {
                    save_export(path, &payload)?;
                    writeln!(
                        output,
                        "Exported {} transactions to {}",
                        ledger.transactions().len(),
                        path.display()
                    )?;
                }
                None => write!(output, "{}", payload)?,
            }
        }
    }

    output.flush()?;
    Ok(())
}

/// The given `YYYY-MM` month after checking its shape, or the month of `today`
fn resolve_month(month: Option<&str>, today: NaiveDate) -> Result<String, TrackerError> {
    match month {
        Some(month) => {
            parse_month_key(month)?;
            Ok(month.trim().to_string())
        }
        None => Ok(month_key(today)),
    }
}

fn month_expense_total(expenses: &[&Transaction], month: &str) -> Decimal {
    calculate_total_expenses(transactions_in_month(expenses.iter().copied(), month))
}
