//! Dossier record aggregate.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, MemberId, ValidationError};

use super::Note;

/// Rank label used before any rank has been assigned.
pub const UNASSIGNED_RANK: &str = "Unassigned";

/// Dossier record - the stored profile for one member.
///
/// # Invariants
///
/// - At most one record exists per `member_id` (enforced by the store's map
///   key and the onboarding workflow's AlreadyExists check).
/// - `specializations` holds catalog codes; duplicates collapse and order is
///   insignificant. A code may dangle if removed from the catalog later.
/// - `notes` is ordered; external numbering is 1-based at read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DossierRecord {
    member_id: MemberId,
    username: String,
    display_name: String,
    rank: String,
    specializations: BTreeSet<String>,
    notes: Vec<Note>,
}

impl DossierRecord {
    /// Creates the record written by a confirmed onboarding: the given rank
    /// label, no specializations, and one auto-generated note.
    pub fn onboarded(
        member_id: MemberId,
        username: impl Into<String>,
        display_name: impl Into<String>,
        rank_label: impl Into<String>,
        actor_display: &str,
    ) -> Self {
        let rank_label = rank_label.into();
        let note = Note::new(
            format!("Onboarded at {} — by {}", rank_label, actor_display),
            actor_display,
        );
        Self {
            member_id,
            username: username.into(),
            display_name: display_name.into(),
            rank: rank_label,
            specializations: BTreeSet::new(),
            notes: vec![note],
        }
    }

    /// Creates an empty record for a member with no dossier on file yet.
    ///
    /// Used by the dossier-editing workflow so edits against an unknown
    /// member have something to stage; nothing is persisted until the first
    /// sub-step confirms.
    pub fn unassigned(
        member_id: MemberId,
        username: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            member_id,
            username: username.into(),
            display_name: display_name.into(),
            rank: UNASSIGNED_RANK.to_string(),
            specializations: BTreeSet::new(),
            notes: Vec::new(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the member identifier.
    pub fn member_id(&self) -> &MemberId {
        &self.member_id
    }

    /// Returns the member's platform username snapshot.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the member's display name snapshot.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns the current rank label.
    pub fn rank(&self) -> &str {
        &self.rank
    }

    /// Returns the assigned specialization codes.
    pub fn specializations(&self) -> &BTreeSet<String> {
        &self.specializations
    }

    /// Returns the notes in order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Refreshes the denormalized name snapshot.
    pub fn refresh_identity(&mut self, username: impl Into<String>, display_name: impl Into<String>) {
        self.username = username.into();
        self.display_name = display_name.into();
    }

    /// Changes the rank label and appends the audit note, returning the old
    /// label.
    pub fn change_rank(&mut self, new_label: impl Into<String>, actor_display: &str) -> String {
        let new_label = new_label.into();
        let old = std::mem::replace(&mut self.rank, new_label.clone());
        self.notes.push(Note::new(
            format!("Rank changed: {} → {} — by {}", old, new_label, actor_display),
            actor_display,
        ));
        old
    }

    /// Replaces the specialization set and appends the audit note.
    ///
    /// Duplicates in the input collapse; order is insignificant.
    pub fn set_specializations<I, S>(&mut self, codes: I, actor_display: &str)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.specializations = codes.into_iter().map(Into::into).collect();
        self.notes.push(Note::new(
            format!(
                "Specializations updated ({}) — by {}",
                self.specializations.len(),
                actor_display
            ),
            actor_display,
        ));
    }

    /// Appends a free-text note. Add-note does not double-log: the note
    /// itself is the only entry written.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the text is empty or whitespace
    pub fn add_note(
        &mut self,
        text: impl Into<String>,
        actor_display: &str,
    ) -> Result<(), ValidationError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ValidationError::empty_field("note"));
        }
        self.notes.push(Note::new(text, actor_display));
        Ok(())
    }

    /// Deletes the note at the given 1-based index, returning it.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if the index is outside `[1, notes.len()]`; the
    ///   record is left unchanged.
    pub fn delete_note(&mut self, index: usize) -> Result<Note, DomainError> {
        if index < 1 || index > self.notes.len() {
            return Err(DomainError::invalid_input(format!(
                "Invalid note number: {} (have {})",
                index,
                self.notes.len()
            )));
        }
        Ok(self.notes.remove(index - 1))
    }
}
