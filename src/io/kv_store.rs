//! Key-value store implementations
//!
//! - `MemoryStore` keeps values in a `HashMap`; used by tests and embedders
//!   that handle persistence themselves.
//! - `JsonFileStore` keeps every key in a single pretty-printed JSON object on
//!   disk. A missing file is an empty store; every `set` rewrites the file.

use crate::core::traits::KeyValueStore;
use crate::types::TrackerError;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// In-memory key-value store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, TrackerError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), TrackerError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// Key-value store backed by one JSON file
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: Map<String, Value>,
}

impl JsonFileStore {
    /// Open the store at `path`
    ///
    /// # Returns
    ///
    /// * `Ok(JsonFileStore)` - with the file's contents, or empty if the file does not exist
    /// * `Err(TrackerError)` - if the file cannot be read, is not JSON, or is not an object
    pub fn open(path: &Path) -> Result<Self, TrackerError> {
        let values = if path.exists() {
            let text = fs::read_to_string(path).map_err(|e| TrackerError::IoError {
                message: format!("Failed to read store '{}': {}", path.display(), e),
            })?;
            if text.trim().is_empty() {
                Map::new()
            } else {
                match serde_json::from_str::<Value>(&text)? {
                    Value::Object(values) => values,
                    _ => {
                        return Err(TrackerError::invalid_store_shape(
                            &path.display().to_string(),
                            "a JSON object",
                        ))
                    }
                }
            }
        } else {
            debug!(path = %path.display(), "Store file not found, starting empty");
            Map::new()
        };

        Ok(JsonFileStore {
            path: path.to_path_buf(),
            values,
        })
    }

    fn flush(&self) -> Result<(), TrackerError> {
        let text = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, text).map_err(|e| TrackerError::IoError {
            message: format!("Failed to write store '{}': {}", self.path.display(), e),
        })
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<Value>, TrackerError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), TrackerError> {
        self.values.insert(key.to_string(), value);
        self.flush()
    }
}
