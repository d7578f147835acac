//! Budget types for the finance tracker
//!
//! A budget is a monthly spending ceiling for one category. There is at most
//! one budget per category and setting a new one replaces the old value.

use super::transaction::Category;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Monthly budget amounts keyed by category
///
/// Iteration follows category declaration order, which is the order budget
/// reports are shown in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Budgets {
    amounts: BTreeMap<Category, Decimal>,
}

impl Budgets {
    /// Create an empty budget mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the budget for a category, returning the value it replaced
    pub fn set(&mut self, category: Category, amount: Decimal) -> Option<Decimal> {
        self.amounts.insert(category, amount)
    }

    /// Budget for a category, if one was set
    pub fn get(&self, category: Category) -> Option<Decimal> {
        self.amounts.get(&category).copied()
    }

    /// Iterate over `(category, amount)` pairs in category order
    pub fn iter(&self) -> impl Iterator<Item = (Category, Decimal)> + '_ {
        self.amounts.iter().map(|(category, amount)| (*category, *amount))
    }

    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }
}

impl FromIterator<(Category, Decimal)> for Budgets {
    fn from_iter<I: IntoIterator<Item = (Category, Decimal)>>(iter: I) -> Self {
        Budgets {
            amounts: iter.into_iter().collect(),
        }
    }
}
