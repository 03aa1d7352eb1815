//! Session lifecycle phases.

use std::fmt;

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalState {
    /// The terminal step confirmed (or the panel was finished explicitly).
    Confirmed,

    /// The owner cancelled.
    Cancelled,

    /// The deadline elapsed with no terminating event.
    TimedOut,
}

impl fmt::Display for TerminalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TerminalState::Confirmed => "confirmed",
            TerminalState::Cancelled => "cancelled",
            TerminalState::TimedOut => "timed out",
        };
        write!(f, "{}", s)
    }
}

/// Lifecycle phase of a session.
///
/// The only valid transition is `Active` → `Terminal(..)`; terminal phases
/// have no outgoing transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// The session is live and awaiting events.
    Active,

    /// The session ended.
    Terminal(TerminalState),
}

impl SessionPhase {
    /// Returns true if transition from self to target is valid.
    pub fn can_transition_to(&self, target: &Self) -> bool {
        matches!((self, target), (SessionPhase::Active, SessionPhase::Terminal(_)))
    }

    /// Checks if this phase is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionPhase::Terminal(_))
    }
}
