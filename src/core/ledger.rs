//! The ledger: owned transaction and budget collections
//!
//! This module provides the `Ledger` that holds every transaction and budget in
//! memory and mirrors them to a [`KeyValueStore`] after each mutation.
//!
//! # Storage Layout
//!
//! Two fixed keys are used:
//! - [`TRANSACTIONS_KEY`]: JSON array of transaction records
//! - [`BUDGETS_KEY`]: JSON object mapping category key to monthly amount
//!
//! # Loading
//!
//! Missing keys load as empty collections. Individual records that cannot be
//! read (bad date, missing id) and budget entries with unknown categories are
//! left out of the in-memory collections with a warning and loading continues.
//! A value of the wrong overall shape (e.g. transactions stored as an object)
//! is an error.
//!
//! # Persistence
//!
//! Every mutation re-persists both collections in full. Records and budget
//! entries are written back exactly as they were loaded, including the ones
//! that could not be read, so saving never loses stored data. Only records
//! added since loading are serialized from their typed form.
//!
//! There is no partial write or rollback: if saving fails the in-memory state
//! keeps the change and the error is returned to the caller.

use crate::core::traits::KeyValueStore;
use crate::core::validation::{BudgetDraft, TransactionDraft};
use crate::types::transaction::parse_amount_value;
use crate::types::{Budgets, Category, TrackerError, Transaction};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::str::FromStr;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Store key holding the transaction list
pub const TRANSACTIONS_KEY: &str = "finance_transactions";

/// Store key holding the budget mapping
pub const BUDGETS_KEY: &str = "finance_budgets";

/// One entry of the stored transaction list
#[derive(Debug)]
enum StoredRecord {
    /// Readable record, kept as loaded
    Loaded(Value),
    /// Record added since loading
    Added,
    /// Record that could not be read, kept as loaded
    Unreadable(Value),
}

impl StoredRecord {
    fn is_readable(&self) -> bool {
        !matches!(self, StoredRecord::Unreadable(_))
    }
}

/// In-memory transactions and budgets backed by a key-value store
pub struct Ledger<S: KeyValueStore> {
    store: S,
    /// Readable records, in stored order
    transactions: Vec<Transaction>,
    /// Every stored record; the k-th readable entry belongs to `transactions[k]`
    records: Vec<StoredRecord>,
    budgets: Budgets,
    /// Budget entries with an unknown category or unreadable amount
    unreadable_budgets: Map<String, Value>,
}

impl<S: KeyValueStore> Ledger<S> {
    /// Load the ledger from a store
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or a key holds a value of
    /// the wrong shape.
    pub fn load(store: S) -> Result<Self, TrackerError> {
        let (transactions, records) = match store.get(TRANSACTIONS_KEY)? {
            None | Some(Value::Null) => (Vec::new(), Vec::new()),
            Some(Value::Array(items)) => read_transactions(items),
            Some(_) => {
                return Err(TrackerError::invalid_store_shape(
                    TRANSACTIONS_KEY,
                    "an array",
                ))
            }
        };

        let (budgets, unreadable_budgets) = match store.get(BUDGETS_KEY)? {
            None | Some(Value::Null) => (Budgets::new(), Map::new()),
            Some(Value::Object(entries)) => read_budgets(entries),
            Some(_) => return Err(TrackerError::invalid_store_shape(BUDGETS_KEY, "an object")),
        };

        debug!(
            transactions = transactions.len(),
            unreadable = records.len() - transactions.len(),
            budgets = budgets.len(),
            "Ledger loaded"
        );

        Ok(Ledger {
            store,
            transactions,
            records,
            budgets,
            unreadable_budgets,
        })
    }

    /// All transactions in insertion order
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Expense records only
    pub fn expenses(&self) -> Vec<&Transaction> {
        self.transactions.iter().filter(|t| t.is_expense()).collect()
    }

    /// Income records only
    pub fn income(&self) -> Vec<&Transaction> {
        self.transactions.iter().filter(|t| t.is_income()).collect()
    }

    pub fn budgets(&self) -> &Budgets {
        &self.budgets
    }

    /// Look up a transaction by identifier
    pub fn find(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    /// Validate a draft and append it as a new transaction
    ///
    /// The record gets a fresh UUID and the current time as its timestamp.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::Validation` if the draft is rejected (nothing is
    /// added), or a storage error if persisting fails.
    pub fn add_transaction(
        &mut self,
        draft: TransactionDraft,
    ) -> Result<&Transaction, TrackerError> {
        let transaction = draft.into_transaction(Uuid::new_v4().to_string(), Utc::now())?;
        info!(
            id = %transaction.id,
            kind = %transaction.transaction_type,
            amount = %transaction.amount,
            "Transaction added"
        );
        self.transactions.push(transaction);
        self.records.push(StoredRecord::Added);
        self.save()?;

        let index = self.transactions.len() - 1;
        Ok(&self.transactions[index])
    }

    /// Remove a transaction by identifier, returning it
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::TransactionNotFound` if no record has the id.
    pub fn delete_transaction(&mut self, id: &str) -> Result<Transaction, TrackerError> {
        let position = self
            .transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| TrackerError::transaction_not_found(id))?;

        let removed = self.transactions.remove(position);
        if let Some(slot) = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, record)| record.is_readable())
            .nth(position)
            .map(|(slot, _)| slot)
        {
            self.records.remove(slot);
        }
        info!(id = %removed.id, "Transaction deleted");
        self.save()?;
        Ok(removed)
    }

    /// Validate a budget draft and set it, replacing any previous value
    ///
    /// Returns the category and amount that were set. An unreadable stored
    /// entry for the same category is replaced.
    pub fn set_budget(
        &mut self,
        draft: &BudgetDraft,
    ) -> Result<(Category, Decimal), TrackerError> {
        let (category, amount) = draft.parse()?;
        let previous = self.budgets.set(category, amount);
        self.unreadable_budgets
            .retain(|key, _| !matches!(Category::from_str(key), Ok(c) if c == category));
        info!(
            category = category.key(),
            %amount,
            previous = ?previous,
            "Budget set"
        );
        self.save()?;
        Ok((category, amount))
    }

    /// Write both collections to the store
    pub fn save(&mut self) -> Result<(), TrackerError> {
        let transactions = self.stored_transactions()?;
        let budgets = self.stored_budgets()?;
        self.store.set(TRANSACTIONS_KEY, transactions)?;
        self.store.set(BUDGETS_KEY, budgets)?;
        debug!(
            transactions = self.transactions.len(),
            records = self.records.len(),
            "Ledger saved"
        );
        Ok(())
    }

    fn stored_transactions(&self) -> Result<Value, TrackerError> {
        let mut transactions = self.transactions.iter();
        let mut items = Vec::with_capacity(self.records.len());
        for record in &self.records {
            match record {
                StoredRecord::Loaded(raw) => {
                    transactions.next();
                    items.push(raw.clone());
                }
                StoredRecord::Added => {
                    if let Some(transaction) = transactions.next() {
                        items.push(serde_json::to_value(transaction)?);
                    }
                }
                StoredRecord::Unreadable(raw) => items.push(raw.clone()),
            }
        }
        Ok(Value::Array(items))
    }

    fn stored_budgets(&self) -> Result<Value, TrackerError> {
        let mut entries = self.unreadable_budgets.clone();
        if let Value::Object(readable) = serde_json::to_value(&self.budgets)? {
            entries.extend(readable);
        }
        Ok(Value::Object(entries))
    }

    /// The underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

fn read_transactions(items: Vec<Value>) -> (Vec<Transaction>, Vec<StoredRecord>) {
    let mut transactions = Vec::with_capacity(items.len());
    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match Transaction::deserialize(&item) {
            Ok(transaction) => {
                transactions.push(transaction);
                records.push(StoredRecord::Loaded(item));
            }
            Err(e) => {
                warn!(index, error = %e, "Skipping unreadable transaction record");
                records.push(StoredRecord::Unreadable(item));
            }
        }
    }
    (transactions, records)
}

fn read_budgets(entries: Map<String, Value>) -> (Budgets, Map<String, Value>) {
    let mut budgets = Budgets::new();
    let mut unreadable = Map::new();
    for (key, value) in entries {
        let Ok(category) = Category::from_str(&key) else {
            warn!(key = %key, "Skipping budget for unknown category");
            unreadable.insert(key, value);
            continue;
        };
        match parse_amount_value(&value) {
            Some(amount) => {
                budgets.set(category, amount);
            }
            None => {
                warn!(key = %key, "Skipping budget with unreadable amount");
                unreadable.insert(key, value);
            }
        }
    }
    (budgets, unreadable)
}
