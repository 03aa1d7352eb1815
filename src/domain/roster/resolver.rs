//! Entity resolver - free-text queries against the roster.
//!
//! Resolution order: exact id, exact name (username or display name), then
//! substring match over the whole roster. Ambiguity is reported back to the
//! caller, which routes it to a single-choice prompt with its own timeout.

use crate::domain::foundation::MemberId;

/// One candidate entity from the platform roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    /// Stable platform identifier.
    pub id: MemberId,

    /// Platform account name.
    pub username: String,

    /// Server display name.
    pub display_name: String,
}

impl RosterEntry {
    pub fn new(id: MemberId, username: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            display_name: display_name.into(),
        }
    }
}

/// Outcome of resolving a query against the roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Exactly one entity matched.
    Unique(RosterEntry),

    /// Nothing matched.
    NotFound,

    /// More than one substring hit; the caller must disambiguate.
    Ambiguous(Vec<RosterEntry>),
}

impl Resolution {
    /// Returns true for the `Unique` variant.
    pub fn is_unique(&self) -> bool {
        matches!(self, Resolution::Unique(_))
    }
}

/// Resolves a free-text query to a roster entry.
///
/// The query is lowercased and trimmed first. Exact id and exact name
/// matches short-circuit; otherwise every entry whose username or display
/// name contains the query is a candidate.
pub fn resolve(query: &str, roster: &[RosterEntry]) -> Resolution {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Resolution::NotFound;
    }

    if let Some(entry) = roster.iter().find(|e| e.id.as_str() == query) {
        return Resolution::Unique(entry.clone());
    }

    if let Some(entry) = roster.iter().find(|e| {
        e.username.to_lowercase() == query || e.display_name.to_lowercase() == query
    }) {
        return Resolution::Unique(entry.clone());
    }

    let matches: Vec<RosterEntry> = roster
        .iter()
        .filter(|e| {
            e.username.to_lowercase().contains(&query)
                || e.display_name.to_lowercase().contains(&query)
        })
        .cloned()
        .collect();

    match matches.len() {
        0 => Resolution::NotFound,
        1 => Resolution::Unique(matches.into_iter().next().unwrap()),
        _ => Resolution::Ambiguous(matches),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn entry(id: &str, username: &str, display: &str) -> RosterEntry {
        RosterEntry::new(MemberId::new(id).unwrap(), username, display)
    }

    fn roster() -> Vec<RosterEntry> {
        vec![
            entry("100", "thomasp", "Thomas Picklini"),
            entry("200", "tedge", "Thomas Edge"),
            entry("300", "rvale", "Rosa Vale"),
        ]
    }

    #[test]
    fn exact_id_match_wins() {
        let resolution = resolve("200", &roster());
        assert_eq!(
            resolution,
            Resolution::Unique(entry("200", "tedge", "Thomas Edge"))
        );
    }

    #[test]
    fn exact_display_name_match_is_unique_despite_substring_siblings() {
        // "thomas picklini" is also a substring hit for nobody else, but the
        // exact-name rule must fire before substring scanning.
        let resolution = resolve("Thomas Picklini", &roster());
        assert!(matches!(resolution, Resolution::Unique(e) if e.id.as_str() == "100"));
    }

    #[test]
    fn exact_username_match_is_unique() {
        let resolution = resolve("RVALE", &roster());
        assert!(matches!(resolution, Resolution::Unique(e) if e.id.as_str() == "300"));
    }

    #[test]
    fn single_substring_hit_is_unique() {
        // Scenario: roster contains one Thomas only.
        let roster = vec![entry("100", "thomasp", "Thomas Picklini")];
        let resolution = resolve("thomas", &roster);
        assert!(matches!(resolution, Resolution::Unique(e) if e.id.as_str() == "100"));
    }

    #[test]
    fn multiple_substring_hits_are_ambiguous() {
        let resolution = resolve("thomas", &roster());
        match resolution {
            Resolution::Ambiguous(candidates) => {
                assert_eq!(candidates.len(), 2);
                assert!(candidates.iter().any(|e| e.id.as_str() == "100"));
                assert!(candidates.iter().any(|e| e.id.as_str() == "200"));
            }
            other => panic!("expected Ambiguous, got {:?}", other),
        }
    }

    #[test]
    fn no_hits_is_not_found() {
        assert_eq!(resolve("zebra", &roster()), Resolution::NotFound);
    }

    #[test]
    fn empty_query_is_not_found() {
        assert_eq!(resolve("   ", &roster()), Resolution::NotFound);
    }

    #[test]
    fn query_is_trimmed_and_case_folded() {
        let resolution = resolve("  THOMAS EDGE  ", &roster());
        assert!(matches!(resolution, Resolution::Unique(e) if e.id.as_str() == "200"));
    }

    proptest! {
        // Same roster and query always classify the same way, and a Unique
        // result always binds the same entity.
        #[test]
        fn resolution_is_deterministic(query in "[a-zA-Z0-9 ]{0,12}") {
            let roster = roster();
            let first = resolve(&query, &roster);
            let second = resolve(&query, &roster);
            prop_assert_eq!(first, second);
        }
    }
}
