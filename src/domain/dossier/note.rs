//! Dossier note value object.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

/// One free-text note on a dossier.
///
/// Notes are append-only except for explicit index-based deletion. External
/// numbering is 1-based and matches the sequence position at read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// The note body.
    pub text: String,

    /// Display name of the user who added the note.
    pub added_by: String,

    /// When the note was added.
    pub timestamp: Timestamp,
}

impl Note {
    /// Creates a note stamped with the current time.
    pub fn new(text: impl Into<String>, added_by: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            added_by: added_by.into(),
            timestamp: Timestamp::now(),
        }
    }
}
