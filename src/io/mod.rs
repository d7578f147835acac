//! I/O module
//!
//! Handles persistence and export payloads.
//!
//! # Components
//!
//! - `kv_store` - Key-value store implementations (in-memory, JSON file)
//! - `csv_format` - CSV export (raw or quoted)
//! - `json_format` - JSON export and re-import
//! - `export_file` - Writing export payloads to disk

pub mod csv_format;
pub mod export_file;
pub mod json_format;
pub mod kv_store;

pub use csv_format::{export_to_csv, CsvMode};
pub use export_file::save_export;
pub use json_format::{export_to_json, parse_json_export};
pub use kv_store::{JsonFileStore, MemoryStore};
