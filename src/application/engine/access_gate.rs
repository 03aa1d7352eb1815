//! Access gate - authorization predicate for session events.
//!
//! Rules, in order: a workflow reachable only through the umbrella dispatch
//! panel rejects direct invocation; session events from anyone but the owner
//! are denied with a transient notice and never touch the deadline; and
//! destructive catalog operations are denied silently to everyone outside
//! the configured privileged-identity set.

use std::collections::HashSet;

use crate::domain::foundation::MemberId;
use crate::domain::session::Session;
use crate::ports::PanelEvent;

/// Result of a gate check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// The event may proceed.
    Allowed,
    /// The event is denied for the given reason.
    Denied(DenialReason),
}

impl GateDecision {
    /// Returns true when the decision allows the event.
    pub fn is_allowed(&self) -> bool {
        matches!(self, GateDecision::Allowed)
    }
}

/// Why the gate denied an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialReason {
    /// The workflow was invoked outside the umbrella admin panel.
    NotFromAdminPanel,

    /// The event came from someone other than the session owner.
    NotSessionOwner,

    /// A destructive operation was attempted by a non-privileged identity.
    NotPrivileged,
}

impl DenialReason {
    /// User-facing denial text.
    pub fn user_message(&self) -> &'static str {
        match self {
            DenialReason::NotFromAdminPanel => {
                "This module can only be opened via the admin panel."
            }
            DenialReason::NotSessionOwner => {
                "Only the command executor can use this panel."
            }
            DenialReason::NotPrivileged => "",
        }
    }

    /// Whether the denial produces no user-visible reply at all.
    pub fn is_silent(&self) -> bool {
        matches!(self, DenialReason::NotPrivileged)
    }
}

/// Authorization predicate shared by all workflows.
#[derive(Debug, Clone, Default)]
pub struct AccessGate {
    privileged: HashSet<MemberId>,
}

impl AccessGate {
    /// Creates a gate with the configured privileged-identity set.
    pub fn new(privileged: impl IntoIterator<Item = MemberId>) -> Self {
        Self {
            privileged: privileged.into_iter().collect(),
        }
    }

    /// Rule 1: umbrella-panel-only workflows reject direct invocation.
    pub fn allow_entry(&self, called_from_admin: bool) -> GateDecision {
        if called_from_admin {
            GateDecision::Allowed
        } else {
            GateDecision::Denied(DenialReason::NotFromAdminPanel)
        }
    }

    /// Rule 2: only the session owner may drive the session.
    pub fn allow_session_event(&self, session: &Session, event: &PanelEvent) -> GateDecision {
        if session.is_owner(&event.actor) {
            GateDecision::Allowed
        } else {
            GateDecision::Denied(DenialReason::NotSessionOwner)
        }
    }

    /// Rule 3: destructive operations require a privileged identity.
    pub fn allow_destructive(&self, actor: &MemberId) -> GateDecision {
        if self.privileged.contains(actor) {
            GateDecision::Allowed
        } else {
            GateDecision::Denied(DenialReason::NotPrivileged)
        }
    }
}
