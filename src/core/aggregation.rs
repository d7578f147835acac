//! Aggregation over transaction records
//!
//! Pure functions that turn a list of transactions into totals, groupings and
//! statistics. None of them mutate their input and none of them fail: empty
//! lists and zero denominators produce neutral values instead of errors.
//!
//! Every function accepts anything that iterates over `&Transaction`, so both
//! a full slice (`ledger.transactions()`) and a filtered selection
//! (`Vec<&Transaction>`) can be passed directly. Callers choose the subset:
//! `calculate_total_expenses` sums whatever it is given.
//!
//! Arithmetic saturates at the bounds of `Decimal`: a stored ledger may hold
//! amounts whose sums or ratios are out of range, and reports over it still
//! complete.

use crate::types::{
    category_label, month_key, Category, TrackerError, Transaction, TransactionType,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

pub(crate) const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

fn saturated(negative: bool) -> Decimal {
    if negative {
        Decimal::MIN
    } else {
        Decimal::MAX
    }
}

/// `total + amount`, clamped to the range of `Decimal`
pub(crate) fn add_saturating(total: Decimal, amount: Decimal) -> Decimal {
    total
        .checked_add(amount)
        .unwrap_or_else(|| saturated(amount.is_sign_negative()))
}

/// `minuend - subtrahend`, clamped to the range of `Decimal`
pub(crate) fn sub_saturating(minuend: Decimal, subtrahend: Decimal) -> Decimal {
    minuend
        .checked_sub(subtrahend)
        .unwrap_or_else(|| saturated(subtrahend.is_sign_positive()))
}

/// `part / whole * 100` for a non-zero `whole`, clamped to the range of `Decimal`
pub(crate) fn ratio_percent(part: Decimal, whole: Decimal) -> Decimal {
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(ONE_HUNDRED))
        .unwrap_or_else(|| saturated(part.is_sign_negative() != whole.is_sign_negative()))
}

/// Running total, count and members of a set of transactions
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExpenseGroup<'a> {
    pub total: Decimal,
    pub count: usize,
    pub items: Vec<&'a Transaction>,
}

impl<'a> ExpenseGroup<'a> {
    fn push(&mut self, transaction: &'a Transaction) {
        self.total = add_saturating(self.total, transaction.amount);
        self.count += 1;
        self.items.push(transaction);
    }
}

/// Transactions sharing one category
///
/// `category` is `None` for records without a recognised category; those are
/// reported under the "Uncategorized" label.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup<'a> {
    pub category: Option<Category>,
    pub expenses: ExpenseGroup<'a>,
}

impl CategoryGroup<'_> {
    pub fn label(&self) -> &'static str {
        category_label(self.category)
    }

    pub fn total(&self) -> Decimal {
        self.expenses.total
    }
}

/// Share of the overall total taken by one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: Option<Category>,
    pub label: String,
    pub total: Decimal,
    /// Percentage of the overall total, rounded to two decimals
    pub percentage: Decimal,
}

/// A `(category, amount)` pair that occurs repeatedly
#[derive(Debug, Clone, PartialEq)]
pub struct RecurringExpense<'a> {
    pub category: Option<Category>,
    pub amount: Decimal,
    pub occurrences: Vec<&'a Transaction>,
}

impl RecurringExpense<'_> {
    pub fn count(&self) -> usize {
        self.occurrences.len()
    }
}

/// Dashboard headline figures
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub balance: Decimal,
    pub savings_rate: Decimal,
    pub transaction_count: usize,
}

/// Sum of `amount` across all given records
pub fn calculate_total_expenses<'a, I>(transactions: I) -> Decimal
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .fold(Decimal::ZERO, |total, t| add_saturating(total, t.amount))
}

/// Group records by category, preserving the order categories first appear in
pub fn group_expenses_by_category<'a, I>(transactions: I) -> Vec<CategoryGroup<'a>>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut positions: HashMap<Option<Category>, usize> = HashMap::new();
    let mut groups: Vec<CategoryGroup<'a>> = Vec::new();

    for transaction in transactions {
        let index = *positions.entry(transaction.category).or_insert_with(|| {
            groups.push(CategoryGroup {
                category: transaction.category,
                expenses: ExpenseGroup::default(),
            });
            groups.len() - 1
        });
        groups[index].expenses.push(transaction);
    }

    groups
}

/// Group records by `YYYY-MM` month key, ordered by month
pub fn group_expenses_by_month<'a, I>(transactions: I) -> BTreeMap<String, ExpenseGroup<'a>>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut months: BTreeMap<String, ExpenseGroup<'a>> = BTreeMap::new();
    for transaction in transactions {
        months
            .entry(transaction.month_key())
            .or_default()
            .push(transaction);
    }
    months
}

/// Records dated within `start..=end`
///
/// Both boundaries are included: dates carry no time of day, so a record on
/// `start` or on `end` is always inside the range. An inverted range yields
/// nothing.
pub fn filter_expenses_by_date_range<'a, I>(
    transactions: I,
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<&'a Transaction>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .filter(|t| start <= t.date && t.date <= end)
        .collect()
}

/// Records whose date falls in the given `YYYY-MM` month
pub fn transactions_in_month<'a, I>(transactions: I, month: &str) -> Vec<&'a Transaction>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .filter(|t| t.month_key() == month)
        .collect()
}

/// Categories with the highest totals, at most `limit` of them
///
/// Equal totals keep the order in which the categories first appeared.
pub fn get_top_categories<'a, I>(transactions: I, limit: usize) -> Vec<CategoryGroup<'a>>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut groups = group_expenses_by_category(transactions);
    // sort_by is stable
    groups.sort_by(|a, b| b.total().cmp(&a.total()));
    groups.truncate(limit);
    groups
}

/// Each category's percentage of the overall total, largest first
pub fn category_distribution<'a, I>(transactions: I) -> Vec<CategoryShare>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let groups = get_top_categories(transactions, usize::MAX);
    let total = groups
        .iter()
        .fold(Decimal::ZERO, |total, group| add_saturating(total, group.total()));

    groups
        .iter()
        .map(|group| CategoryShare {
            category: group.category,
            label: group.label().to_string(),
            total: group.total(),
            percentage: percentage_of(group.total(), total),
        })
        .collect()
}

/// Median amount, 0 for an empty list
pub fn calculate_median_expense<'a, I>(transactions: I) -> Decimal
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut amounts: Vec<Decimal> = transactions.into_iter().map(|t| t.amount).collect();
    if amounts.is_empty() {
        return Decimal::ZERO;
    }
    amounts.sort();

    let middle = amounts.len() / 2;
    if amounts.len() % 2 == 0 {
        let (lower, upper) = (amounts[middle - 1], amounts[middle]);
        match lower.checked_add(upper) {
            Some(sum) => sum / Decimal::TWO,
            None => lower / Decimal::TWO + upper / Decimal::TWO,
        }
    } else {
        amounts[middle]
    }
}

/// Percentage change from `previous` to `current`
///
/// With nothing to compare against (`previous` is zero) any positive spend
/// counts as a 100% increase and no spend as no change.
pub fn calculate_spending_trend(current: Decimal, previous: Decimal) -> Decimal {
    if previous.is_zero() {
        return if current > Decimal::ZERO {
            ONE_HUNDRED
        } else {
            Decimal::ZERO
        };
    }
    ratio_percent(sub_saturating(current, previous), previous)
}

/// Share of income left after expenses, in percent; 0 without income
pub fn calculate_savings_rate(income: Decimal, expenses: Decimal) -> Decimal {
    if income.is_zero() {
        return Decimal::ZERO;
    }
    ratio_percent(sub_saturating(income, expenses), income)
}

/// `(category, amount)` pairs that occur at least `threshold` times
///
/// Groups are reported in the order their first member appears.
pub fn identify_recurring_expenses<'a, I>(
    transactions: I,
    threshold: usize,
) -> Vec<RecurringExpense<'a>>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut positions: HashMap<(Option<Category>, Decimal), usize> = HashMap::new();
    let mut patterns: Vec<RecurringExpense<'a>> = Vec::new();

    for transaction in transactions {
        let key = (transaction.category, transaction.amount);
        let index = *positions.entry(key).or_insert_with(|| {
            patterns.push(RecurringExpense {
                category: transaction.category,
                amount: transaction.amount,
                occurrences: Vec::new(),
            });
            patterns.len() - 1
        });
        patterns[index].occurrences.push(transaction);
    }

    patterns.retain(|pattern| pattern.count() >= threshold);
    patterns
}

/// Income, expenses, balance and savings rate over all given records
pub fn calculate_summary<'a, I>(transactions: I) -> Summary
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut total_income = Decimal::ZERO;
    let mut total_expenses = Decimal::ZERO;
    let mut transaction_count = 0;

    for transaction in transactions {
        match transaction.transaction_type {
            TransactionType::Income => {
                total_income = add_saturating(total_income, transaction.amount)
            }
            TransactionType::Expense => {
                total_expenses = add_saturating(total_expenses, transaction.amount)
            }
        }
        transaction_count += 1;
    }

    Summary {
        total_income,
        total_expenses,
        balance: sub_saturating(total_income, total_expenses),
        savings_rate: calculate_savings_rate(total_income, total_expenses),
        transaction_count,
    }
}

/// `part` as a percentage of `whole`, rounded to two decimals; 0 when `whole` is 0
pub(crate) fn percentage_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    ratio_percent(part, whole).round_dp(2)
}

/// First day of a `YYYY-MM` month key
pub fn parse_month_key(month: &str) -> Result<NaiveDate, TrackerError> {
    let month = month.trim();
    if month.len() != 7 {
        return Err(TrackerError::invalid_month(month));
    }
    NaiveDate::parse_from_str(&format!("{}-01", month), "%Y-%m-%d")
        .map_err(|_| TrackerError::invalid_month(month))
}

/// Key of the month before the given `YYYY-MM` month
pub fn previous_month_key(month: &str) -> Result<String, TrackerError> {
    let first_day = parse_month_key(month)?;
    let previous = first_day
        .pred_opt()
        .ok_or_else(|| TrackerError::invalid_month(month))?;
    Ok(month_key(previous))
}
