//! CSV export of transaction records
//!
//! Columns: `Date, Category, Amount, Description, Payment Method`.
//!
//! # Quoting
//!
//! Two modes are supported:
//!
//! - [`CsvMode::Raw`] (default) joins fields with literal commas and performs
//!   no escaping. A description containing a comma, quote or newline shifts or
//!   splits the columns of its row. This is the established export format and
//!   is kept as-is.
//! - [`CsvMode::Quoted`] writes the same columns through `csv::Writer`, which
//!   quotes fields as RFC 4180 requires. Opt in when descriptions may contain
//!   delimiters.
//!
//! All functions are pure (no I/O) for easy testing.

use crate::types::{TrackerError, Transaction};
use std::fmt;
use std::str::FromStr;

/// Header row of the export
pub const CSV_HEADER: [&str; 5] = ["Date", "Category", "Amount", "Description", "Payment Method"];

/// Field escaping used by [`export_to_csv`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CsvMode {
    /// Fields joined with commas, no escaping
    #[default]
    Raw,
    /// Standard CSV quoting where needed
    Quoted,
}

impl fmt::Display for CsvMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CsvMode::Raw => f.write_str("raw"),
            CsvMode::Quoted => f.write_str("quoted"),
        }
    }
}

impl FromStr for CsvMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "raw" => Ok(CsvMode::Raw),
            "quoted" => Ok(CsvMode::Quoted),
            other => Err(format!("Invalid CSV mode '{}'", other)),
        }
    }
}

/// Format a money amount with two decimals
pub(crate) fn format_money(amount: rust_decimal::Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}

fn record_fields(transaction: &Transaction) -> [String; 5] {
    [
        transaction.date.format("%Y-%m-%d").to_string(),
        transaction.category_label().to_string(),
        format_money(transaction.amount),
        transaction.description.clone(),
        transaction.payment_method.clone().unwrap_or_default(),
    ]
}

/// Serialize records to CSV text
///
/// # Returns
///
/// * `Ok(String)` - header row followed by one row per record, each ending in `\n`
/// * `Err(TrackerError::Csv)` - if the CSV writer fails (quoted mode only)
pub fn export_to_csv<'a, I>(transactions: I, mode: CsvMode) -> Result<String, TrackerError>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    match mode {
        CsvMode::Raw => {
            let mut output = CSV_HEADER.join(",");
            output.push('\n');
            for transaction in transactions {
                output.push_str(&record_fields(transaction).join(","));
                output.push('\n');
            }
            Ok(output)
        }
        CsvMode::Quoted => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            writer.write_record(CSV_HEADER)?;
            for transaction in transactions {
                writer.write_record(record_fields(transaction))?;
            }
            let bytes = writer
                .into_inner()
                .map_err(|e| TrackerError::csv(format!("Failed to flush output: {}", e)))?;
            String::from_utf8(bytes)
                .map_err(|e| TrackerError::csv(format!("CSV output is not UTF-8: {}", e)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_support::{expense, transaction};
    use crate::types::{Category, TransactionType};
    use rstest::rstest;

    fn lunch() -> Transaction {
        let mut record = expense(Category::Food, 1250, "2024-01-05");
        record.description = "Lunch".to_string();
        record.payment_method = Some("Card".to_string());
        record
    }

    #[rstest]
    #[case::raw(CsvMode::Raw)]
    #[case::quoted(CsvMode::Quoted)]
    fn test_plain_records_identical_in_both_modes(#[case] mode: CsvMode) {
        let mut salary = transaction(
            TransactionType::Income,
            Some(Category::Salary),
            200000,
            "2024-01-31",
        );
        salary.description = "January pay".to_string();
        let records = vec![lunch(), salary];

        let output = export_to_csv(&records, mode).unwrap();
        assert_eq!(
            output,
            "Date,Category,Amount,Description,Payment Method\n\
             2024-01-05,Food & Dining,12.50,Lunch,Card\n\
             2024-01-31,Salary,2000.00,January pay,\n"
        );
    }

    #[rstest]
    #[case::raw(CsvMode::Raw)]
    #[case::quoted(CsvMode::Quoted)]
    fn test_empty_export_has_header_only(#[case] mode: CsvMode) {
        let records: Vec<Transaction> = Vec::new();
        assert_eq!(
            export_to_csv(&records, mode).unwrap(),
            "Date,Category,Amount,Description,Payment Method\n"
        );
    }

    #[test]
    fn test_raw_mode_does_not_escape_commas() {
        let mut record = lunch();
        record.description = "Pizza, drinks".to_string();

        let output = export_to_csv([&record], CsvMode::Raw).unwrap();
        let row = output.lines().nth(1).unwrap();
        assert_eq!(row, "2024-01-05,Food & Dining,12.50,Pizza, drinks,Card");
        assert_eq!(row.split(',').count(), 6);
    }

    #[test]
    fn test_quoted_mode_escapes_commas_and_quotes() {
        let mut record = lunch();
        record.description = "Pizza, \"large\"".to_string();

        let output = export_to_csv([&record], CsvMode::Quoted).unwrap();
        let row = output.lines().nth(1).unwrap();
        assert_eq!(
            row,
            "2024-01-05,Food & Dining,12.50,\"Pizza, \"\"large\"\"\",Card"
        );

        let mut reader = csv::Reader::from_reader(output.as_bytes());
        let parsed = reader.records().next().unwrap().unwrap();
        assert_eq!(parsed.len(), 5);
        assert_eq!(&parsed[3], "Pizza, \"large\"");
    }

    #[test]
    fn test_uncategorized_label() {
        let mut record = lunch();
        record.category = None;
        let output = export_to_csv([&record], CsvMode::Raw).unwrap();
        assert!(output.contains(",Uncategorized,"));
    }

    #[rstest]
    #[case("raw", CsvMode::Raw)]
    #[case("Quoted", CsvMode::Quoted)]
    fn test_csv_mode_from_str(#[case] input: &str, #[case] expected: CsvMode) {
        assert_eq!(input.parse::<CsvMode>().unwrap(), expected);
    }
}
