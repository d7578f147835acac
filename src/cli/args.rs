use crate::config::ReportConfig;
use crate::core::{SortBy, SortOrder};
use crate::io::CsvMode;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Track income, expenses and monthly budgets
#[derive(Parser, Debug)]
#[command(name = "finance-tracker")]
#[command(about = "Track income, expenses and monthly budgets", long_about = None)]
pub struct CliArgs {
    /// Ledger file holding transactions and budgets
    #[arg(
        long = "store",
        value_name = "PATH",
        default_value = "finance-tracker.json",
        global = true,
        help = "Path to the JSON ledger file (created on first write)"
    )]
    pub store: PathBuf,

    /// Number of categories shown by the categories report
    #[arg(
        long = "top",
        value_name = "COUNT",
        global = true,
        help = "Number of categories in the categories report (default: 5)"
    )]
    pub top_categories: Option<usize>,

    /// Occurrences needed for an expense to count as recurring
    #[arg(
        long = "recurring-threshold",
        value_name = "COUNT",
        global = true,
        help = "Minimum repeats of a category and amount to count as recurring (default: 3)"
    )]
    pub recurring_threshold: Option<usize>,

    /// Field escaping for CSV exports
    #[arg(
        long = "csv-mode",
        value_name = "MODE",
        default_value = "raw",
        global = true,
        help = "CSV export escaping: 'raw' joins fields with commas unescaped, \
                'quoted' applies standard quoting"
    )]
    pub csv_mode: CsvMode,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Record a new income or expense
    Add {
        #[arg(long = "type", value_name = "TYPE", help = "income or expense")]
        transaction_type: String,
        #[arg(long, allow_hyphen_values = true)]
        amount: String,
        #[arg(long)]
        category: String,
        #[arg(long, help = "Date as YYYY-MM-DD (default: today)")]
        date: Option<String>,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long = "payment-method", value_name = "METHOD")]
        payment_method: Option<String>,
    },

    /// Delete a transaction by id
    Delete {
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Set the monthly budget of a category
    SetBudget {
        #[arg(value_name = "CATEGORY")]
        category: String,
        #[arg(value_name = "AMOUNT", allow_hyphen_values = true)]
        amount: String,
    },

    /// List transactions
    List {
        #[arg(long = "sort-by", value_name = "FIELD", default_value = "date")]
        sort_by: SortBy,
        #[arg(long, value_name = "ORDER", default_value = "desc")]
        order: SortOrder,
        #[arg(long, value_name = "DATE", help = "First date to include (YYYY-MM-DD)")]
        from: Option<NaiveDate>,
        #[arg(long, value_name = "DATE", help = "Last date to include (YYYY-MM-DD)")]
        to: Option<NaiveDate>,
    },

    /// Income, expenses, balance and savings rate
    Summary,

    /// Top expense categories with their share of spending
    Categories,

    /// Income and expenses per month
    Monthly,

    /// Budget standing per category for one month
    Budgets {
        #[arg(long, value_name = "YYYY-MM", help = "Month to report (default: current month)")]
        month: Option<String>,
    },

    /// Expenses repeating with the same category and amount
    Recurring,

    /// Spending change against the previous month
    Trend {
        #[arg(long, value_name = "YYYY-MM", help = "Month to report (default: current month)")]
        month: Option<String>,
    },

    /// Chart-ready data as JSON
    Chart {
        #[arg(value_enum)]
        kind: ChartKind,
        #[arg(
            long,
            value_name = "YYYY-MM",
            help = "Month for the budget bar chart (default: current month)"
        )]
        month: Option<String>,
    },

    /// Export all transactions
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,
        #[arg(long, value_name = "PATH", help = "Write to a file instead of stdout")]
        output: Option<PathBuf>,
    },
}

/// Chart series that can be produced
#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
pub enum ChartKind {
    /// Spending by category
    Pie,
    /// Income and expenses per month
    Line,
    /// Budget against spending per category
    Bar,
}

/// Export payload formats
#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl CliArgs {
    /// Create a ReportConfig from CLI arguments
    ///
    /// Values not given on the command line keep their defaults.
    pub fn to_report_config(&self) -> ReportConfig {
        let default = ReportConfig::default();
        ReportConfig::new(
            self.top_categories.unwrap_or(default.top_categories_limit),
            self.recurring_threshold
                .unwrap_or(default.recurring_threshold),
            self.csv_mode,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::summary(&["program", "summary"], Command::Summary)]
    #[case::delete(&["program", "delete", "abc"], Command::Delete { id: "abc".to_string() })]
    #[case::set_budget(
        &["program", "set-budget", "food", "250"],
        Command::SetBudget { category: "food".to_string(), amount: "250".to_string() }
    )]
    #[case::budgets_with_month(
        &["program", "budgets", "--month", "2024-03"],
        Command::Budgets { month: Some("2024-03".to_string()) }
    )]
    #[case::list_defaults(
        &["program", "list"],
        Command::List { sort_by: SortBy::Date, order: SortOrder::Desc, from: None, to: None }
    )]
    #[case::list_custom(
        &["program", "list", "--sort-by", "amount", "--order", "asc", "--from", "2024-01-01"],
        Command::List {
            sort_by: SortBy::Amount,
            order: SortOrder::Asc,
            from: NaiveDate::from_ymd_opt(2024, 1, 1),
            to: None,
        }
    )]
    #[case::chart(
        &["program", "chart", "pie"],
        Command::Chart { kind: ChartKind::Pie, month: None }
    )]
    #[case::export_json(
        &["program", "export", "--format", "json"],
        Command::Export { format: ExportFormat::Json, output: None }
    )]
    fn test_command_parsing(#[case] args: &[&str], #[case] expected: Command) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.command, expected);
    }

    #[test]
    fn test_add_parsing() {
        let parsed = CliArgs::try_parse_from([
            "program",
            "add",
            "--type",
            "expense",
            "--amount",
            "-5",
            "--category",
            "food",
            "--description",
            "Lunch",
        ])
        .unwrap();

        assert_eq!(
            parsed.command,
            Command::Add {
                transaction_type: "expense".to_string(),
                amount: "-5".to_string(),
                category: "food".to_string(),
                date: None,
                description: "Lunch".to_string(),
                payment_method: None,
            }
        );
    }

    #[rstest]
    #[case::defaults(&["program", "summary"], 5, 3, CsvMode::Raw)]
    #[case::custom(
        &["program", "--top", "8", "--recurring-threshold", "2", "--csv-mode", "quoted", "summary"],
        8,
        2,
        CsvMode::Quoted
    )]
    #[case::global_after_subcommand(&["program", "categories", "--top", "3"], 3, 3, CsvMode::Raw)]
    #[case::zero_falls_back(&["program", "--top", "0", "summary"], 5, 3, CsvMode::Raw)]
    fn test_report_config_conversion(
        #[case] args: &[&str],
        #[case] expected_limit: usize,
        #[case] expected_threshold: usize,
        #[case] expected_mode: CsvMode,
    ) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        let config = parsed.to_report_config();

        assert_eq!(config.top_categories_limit, expected_limit);
        assert_eq!(config.recurring_threshold, expected_threshold);
        assert_eq!(config.csv_mode, expected_mode);
    }

    #[test]
    fn test_store_path() {
        let parsed = CliArgs::try_parse_from(["program", "summary"]).unwrap();
        assert_eq!(parsed.store, PathBuf::from("finance-tracker.json"));

        let parsed =
            CliArgs::try_parse_from(["program", "--store", "/tmp/ledger.json", "summary"]).unwrap();
        assert_eq!(parsed.store, PathBuf::from("/tmp/ledger.json"));
    }

    // Error handling tests
    #[rstest]
    #[case::missing_command(&["program"])]
    #[case::unknown_command(&["program", "forecast"])]
    #[case::invalid_sort_field(&["program", "list", "--sort-by", "size"])]
    #[case::invalid_date(&["program", "list", "--from", "yesterday"])]
    #[case::invalid_csv_mode(&["program", "--csv-mode", "fancy", "export"])]
    #[case::missing_budget_amount(&["program", "set-budget", "food"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        let result = CliArgs::try_parse_from(args);
        assert!(result.is_err());
    }
}
