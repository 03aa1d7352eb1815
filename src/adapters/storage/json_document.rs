//! JSON document helpers - corruption-recovering load and atomic write.
//!
//! Every persisted document is one JSON file rewritten whole on each
//! confirmed edit. Loading is self-healing: an absent file yields the empty
//! default, and an unparseable file is logged, reset to the default, and the
//! reset persisted immediately. The process never aborts on a bad document.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::warn;

use crate::ports::StorageError;

/// Loads a document, recovering from absence and corruption.
pub async fn load_or_reset<T>(path: &Path) -> Result<T, StorageError>
where
    T: DeserializeOwned + Serialize + Default,
{
    let raw = match fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(T::default()),
        Err(e) => {
            return Err(StorageError::io(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            )))
        }
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(T::default());
    }

    match serde_json::from_str(trimmed) {
        Ok(value) => Ok(value),
        Err(e) => {
            warn!(
                path = %path.display(),
                error = %e,
                "document corrupt, resetting to empty"
            );
            let reset = T::default();
            write_atomic(path, &reset).await?;
            Ok(reset)
        }
    }
}

/// Writes a document with the write-to-temp-then-rename pattern:
/// 1. Write content to `<file>.tmp`
/// 2. Sync to disk
/// 3. Rename to `<file>`
pub async fn write_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::io(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let json = serde_json::to_string_pretty(value)
        .map_err(|e| StorageError::serialize(e.to_string()))?;

    let temp_path = temp_path(path);

    let mut file = fs::File::create(&temp_path).await.map_err(|e| {
        StorageError::io(format!(
            "Failed to create temp file {}: {}",
            temp_path.display(),
            e
        ))
    })?;

    file.write_all(json.as_bytes()).await.map_err(|e| {
        StorageError::io(format!(
            "Failed to write temp file {}: {}",
            temp_path.display(),
            e
        ))
    })?;

    file.sync_all().await.map_err(|e| {
        StorageError::io(format!(
            "Failed to sync temp file {}: {}",
            temp_path.display(),
            e
        ))
    })?;

    fs::rename(&temp_path, path).await.map_err(|e| {
        StorageError::io(format!(
            "Failed to rename {} to {}: {}",
            temp_path.display(),
            path.display(),
            e
        ))
    })
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}
