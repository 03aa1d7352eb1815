//! Session aggregate.

use std::time::Duration;

use crate::domain::foundation::{DomainError, ErrorCode, MemberId, SessionId};
use crate::domain::roster::RosterEntry;

use super::{SessionPhase, TerminalState};

/// Deadline policy for a session's event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadlinePolicy {
    /// One deadline set at session start, never extended.
    FixedWindow(Duration),

    /// A fresh deadline is armed after every successful action.
    PerStep(Duration),
}

impl DeadlinePolicy {
    /// The length of one deadline window.
    pub fn window(&self) -> Duration {
        match self {
            DeadlinePolicy::FixedWindow(d) | DeadlinePolicy::PerStep(d) => *d,
        }
    }

    /// Whether a successful action restarts the window.
    pub fn resets_on_action(&self) -> bool {
        matches!(self, DeadlinePolicy::PerStep(_))
    }
}

/// Session aggregate - one user's live run through a workflow.
///
/// # Invariants
///
/// - Only the owner may drive the session; every incoming event is checked
///   against `owner_id` by the access gate.
/// - The phase moves `Active` → `Terminal(..)` exactly once.
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    owner_id: MemberId,
    owner_display: String,
    target: Option<RosterEntry>,
    phase: SessionPhase,
    policy: DeadlinePolicy,
}

impl Session {
    /// Creates a new active session for the invoking user.
    pub fn new(owner_id: MemberId, owner_display: impl Into<String>, policy: DeadlinePolicy) -> Self {
        Self {
            id: SessionId::new(),
            owner_id,
            owner_display: owner_display.into(),
            target: None,
            phase: SessionPhase::Active,
            policy,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the session ID.
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Returns the owner's member ID.
    pub fn owner_id(&self) -> &MemberId {
        &self.owner_id
    }

    /// Returns the owner's display name.
    pub fn owner_display(&self) -> &str {
        &self.owner_display
    }

    /// Returns the bound target entity, if resolution has happened.
    pub fn target(&self) -> Option<&RosterEntry> {
        self.target.as_ref()
    }

    /// Returns the current phase.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Returns the deadline policy.
    pub fn policy(&self) -> DeadlinePolicy {
        self.policy
    }

    /// Checks if the given member owns this session.
    pub fn is_owner(&self, member_id: &MemberId) -> bool {
        &self.owner_id == member_id
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Binds the resolved target entity.
    pub fn bind_target(&mut self, entry: RosterEntry) {
        self.target = Some(entry);
    }

    /// Moves the session into a terminal phase.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the session already ended
    pub fn finish(&mut self, terminal: TerminalState) -> Result<(), DomainError> {
        let target = SessionPhase::Terminal(terminal);
        if !self.phase.can_transition_to(&target) {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Session already ended ({:?})", self.phase),
            ));
        }
        self.phase = target;
        Ok(())
    }
}
