//! Stable ordering of transaction lists

use crate::types::{TrackerError, Transaction};
use std::cmp::Ordering;
use std::str::FromStr;

/// Field to sort transactions by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    #[default]
    Date,
    Amount,
    /// Compares category display labels; uncategorized records sort as "Uncategorized"
    Category,
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl FromStr for SortBy {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "date" => Ok(SortBy::Date),
            "amount" => Ok(SortBy::Amount),
            "category" => Ok(SortBy::Category),
            _ => Err(TrackerError::invalid_sort_option("sort field", s)),
        }
    }
}

impl FromStr for SortOrder {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(TrackerError::invalid_sort_option("sort order", s)),
        }
    }
}

fn compare(a: &Transaction, b: &Transaction, sort_by: SortBy) -> Ordering {
    match sort_by {
        SortBy::Date => a.date.cmp(&b.date),
        SortBy::Amount => a.amount.cmp(&b.amount),
        SortBy::Category => a.category_label().cmp(b.category_label()),
    }
}

/// Sorted view of the given records
///
/// The sort is stable in both directions: records with equal keys keep their
/// relative input order. The input is left untouched.
pub fn sort_expenses<'a, I>(
    transactions: I,
    sort_by: SortBy,
    order: SortOrder,
) -> Vec<&'a Transaction>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut sorted: Vec<&Transaction> = transactions.into_iter().collect();
    match order {
        SortOrder::Asc => sorted.sort_by(|a, b| compare(a, b, sort_by)),
        // Comparing b to a instead of reversing keeps equal keys in input order
        SortOrder::Desc => sorted.sort_by(|a, b| compare(b, a, sort_by)),
    }
    sorted
}
