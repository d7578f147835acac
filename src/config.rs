//! Report configuration
//!
//! Tunables for the reports: how many categories the top-categories report
//! shows, how many repeats make an expense recurring, and how CSV exports are
//! escaped.

use crate::io::CsvMode;
use tracing::warn;

/// Configuration for report generation
#[derive(Clone, Debug, PartialEq)]
pub struct ReportConfig {
    /// Maximum number of categories in the top-categories report
    pub top_categories_limit: usize,
    /// Minimum occurrences of a `(category, amount)` pair to count as recurring
    pub recurring_threshold: usize,
    /// Field escaping for CSV exports
    pub csv_mode: CsvMode,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_categories_limit: 5,
            recurring_threshold: 3,
            csv_mode: CsvMode::Raw,
        }
    }
}

impl ReportConfig {
    /// Create a ReportConfig with custom values
    ///
    /// Zero limits are meaningless and fall back to the defaults with a warning.
    pub fn new(top_categories_limit: usize, recurring_threshold: usize, csv_mode: CsvMode) -> Self {
        let default = Self::default();

        let top_categories_limit = if top_categories_limit == 0 {
            warn!(
                "Invalid top_categories_limit ({}), using default ({})",
                top_categories_limit, default.top_categories_limit
            );
            default.top_categories_limit
        } else {
            top_categories_limit
        };

        let recurring_threshold = if recurring_threshold == 0 {
            warn!(
                "Invalid recurring_threshold ({}), using default ({})",
                recurring_threshold, default.recurring_threshold
            );
            default.recurring_threshold
        } else {
            recurring_threshold
        };

        Self {
            top_categories_limit,
            recurring_threshold,
            csv_mode,
        }
    }
}
