//! Core traits for the persistence boundary
//!
//! The ledger never talks to files or browsers directly. It reads and writes
//! JSON values through a [`KeyValueStore`], so the same ledger logic runs
//! against an in-memory map in tests and a JSON file on disk in the CLI.

use crate::types::TrackerError;
use serde_json::Value;

/// Key-value store of JSON values
///
/// Contract: `get` returns whatever was last `set` under the key, or `None`.
/// There are no transactions and no schema versioning; the last write wins.
pub trait KeyValueStore {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> Result<Option<Value>, TrackerError>;

    /// Replace the value stored under `key`
    fn set(&mut self, key: &str, value: Value) -> Result<(), TrackerError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<Value>, TrackerError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), TrackerError> {
        (**self).set(key, value)
    }
}
