//! Session module - Transient interactive session state.
//!
//! A session is one user's live run through a workflow: single owner,
//! optionally bound target entity, and a bounded lifetime governed by a
//! deadline policy. Sessions are never persisted.

mod phase;
mod session;

pub use phase::{SessionPhase, TerminalState};
pub use session::{DeadlinePolicy, Session};
