//! Rank table and code formatting.
//!
//! Rank codes are a leading letter track plus digits ("e1", "o8"). The
//! display rule inserts a hyphen between the track letter and the digits and
//! joins the table name: `"e1"` formats as `"E-1"` and labels as
//! `"E-1 | Recruit"`. Formatting is idempotent so already-formatted codes
//! pass through unchanged.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Formats a rank code: `"e1"` → `"E-1"`.
///
/// Input that is not letter+digits shaped (e.g. "Unassigned") is returned
/// unchanged; repeated application is stable either way.
pub fn format_code(code: &str) -> String {
    let code = code.trim();
    let split = code
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(code.len());
    let (track, tail) = code.split_at(split);
    let digits = tail.strip_prefix('-').unwrap_or(tail);

    if track.is_empty() || digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return code.to_string();
    }
    format!("{}-{}", track.to_uppercase(), digits)
}

/// Formats a full rank label: `("e1", "Recruit")` → `"E-1 | Recruit"`.
pub fn format_label(code: &str, name: &str) -> String {
    format!("{} | {}", format_code(code), name)
}

/// One entry of the rank table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankDefinition {
    /// Lowercase table code, e.g. "e1".
    pub code: String,

    /// Display name, e.g. "Recruit".
    pub name: String,
}

impl RankDefinition {
    /// Returns the formatted label for this entry.
    pub fn label(&self) -> String {
        format_label(&self.code, &self.name)
    }
}

/// The static ordered rank table, read-only after load.
///
/// Ordering: enlisted track before officer track, numeric within a track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankTable {
    entries: Vec<RankDefinition>,
}

impl RankTable {
    /// Builds a table from a code → name mapping, sorting entries by track
    /// letter then numeric grade.
    pub fn from_map(map: BTreeMap<String, String>) -> Self {
        let mut entries: Vec<RankDefinition> = map
            .into_iter()
            .map(|(code, name)| RankDefinition {
                code: code.trim().to_lowercase(),
                name,
            })
            .collect();
        entries.sort_by_key(|e| sort_key(&e.code));
        Self { entries }
    }

    /// Returns the entries in display order.
    pub fn entries(&self) -> &[RankDefinition] {
        &self.entries
    }

    /// Returns true when the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up the display name for a code.
    pub fn name_of(&self, code: &str) -> Option<&str> {
        let code = code.trim().to_lowercase();
        self.entries
            .iter()
            .find(|e| e.code == code)
            .map(|e| e.name.as_str())
    }

    /// Looks up the formatted label for a code, e.g. `"E-1 | Recruit"`.
    pub fn label_of(&self, code: &str) -> Option<String> {
        self.name_of(code)
            .map(|name| format_label(code, name))
    }
}

fn sort_key(code: &str) -> (String, u32) {
    let split = code
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(code.len());
    let (track, digits) = code.split_at(split);
    (track.to_string(), digits.parse().unwrap_or(0))
}

/// Built-in rank ladder, used when no rank document is present on disk.
pub static DEFAULT_RANKS: Lazy<RankTable> = Lazy::new(|| {
    let pairs = [
        ("e1", "Recruit"),
        ("e2", "Private"),
        ("e3", "Specialist"),
        ("e4", "Corporal"),
        ("e5", "Sergeant"),
        ("e6", "Staff Sergeant"),
        ("e7", "Sergeant First Class"),
        ("e8", "Master Sergeant"),
        ("e9", "Sergeant Major"),
        ("o1", "Second Lieutenant"),
        ("o2", "First Lieutenant"),
        ("o3", "Captain"),
        ("o4", "Major"),
        ("o5", "Lieutenant Colonel"),
        ("o6", "Colonel"),
        ("o7", "Commander"),
        ("o8", "Chief Executive Officer"),
    ];
    RankTable::from_map(
        pairs
            .into_iter()
            .map(|(c, n)| (c.to_string(), n.to_string()))
            .collect(),
    )
});
