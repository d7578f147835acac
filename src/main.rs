//! Personal Finance Tracker CLI
//!
//! Command-line interface for recording transactions and budgets in a JSON
//! ledger file and printing reports from it.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- add --type expense --amount 12.50 --category food --description Lunch
//! cargo run -- set-budget food 300
//! cargo run -- summary
//! cargo run -- --store ledger.json budgets --month 2024-03
//! cargo run -- --top 3 categories
//! cargo run -- chart pie
//! cargo run -- --csv-mode quoted export --format csv --output transactions.csv
//! ```
//!
//! Reports are written to stdout as CSV, charts as JSON. Diagnostics go to
//! stderr and are controlled with `RUST_LOG` (default: `warn`).
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (invalid input, unknown transaction, unreadable ledger file, etc.)

use finance_tracker::cli;
use finance_tracker::report;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Parse command-line arguments using clap
    let args = cli::parse_args();

    // Output goes to stdout
    let mut output = std::io::stdout();
    if let Err(e) = report::run(&args, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
