//! Storage error type shared by the repository ports.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors raised by document storage.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// Filesystem failure while reading or writing a document.
    #[error("Storage I/O failure: {reason}")]
    Io { reason: String },

    /// A document failed to parse. Adapters recover from this at load time
    /// by resetting the document; the variant surfaces only if recovery
    /// itself fails.
    #[error("Document {path} is corrupt: {reason}")]
    Corrupt { path: String, reason: String },

    /// A value could not be serialized for writing.
    #[error("Failed to serialize document: {reason}")]
    Serialize { reason: String },
}

impl StorageError {
    /// Creates an I/O error.
    pub fn io(reason: impl Into<String>) -> Self {
        StorageError::Io {
            reason: reason.into(),
        }
    }

    /// Creates a corrupt-document error.
    pub fn corrupt(path: impl Into<String>, reason: impl Into<String>) -> Self {
        StorageError::Corrupt {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Creates a serialization error.
    pub fn serialize(reason: impl Into<String>) -> Self {
        StorageError::Serialize {
            reason: reason.into(),
        }
    }
}

impl From<StorageError> for DomainError {
    fn from(err: StorageError) -> Self {
        let code = match &err {
            StorageError::Corrupt { .. } => ErrorCode::StorageCorrupt,
            _ => ErrorCode::StorageWriteFailure,
        };
        DomainError::new(code, err.to_string())
    }
}
