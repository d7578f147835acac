//! Saving export payloads to disk

use crate::types::TrackerError;
use std::fs;
use std::path::Path;
use tracing::info;

/// Write an export payload to `path`, replacing any existing file
pub fn save_export(path: &Path, payload: &str) -> Result<(), TrackerError> {
    fs::write(path, payload).map_err(|e| TrackerError::IoError {
        message: format!("Failed to write export '{}': {}", path.display(), e),
    })?;
    info!(path = %path.display(), bytes = payload.len(), "Export saved");
    Ok(())
}
