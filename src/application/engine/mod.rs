//! Engine - the reusable pieces every workflow is built from.
//!
//! - `SessionEngine` / `WorkflowSteps` - the step-sequenced session driver
//! - `SessionTimer` - bounded-lifetime cleanup token
//! - `AccessGate` - owner / umbrella-entry / privileged-identity checks
//! - `targeting` - the shared resolve-a-member entry flow

mod access_gate;
mod session_engine;
mod targeting;
mod timer;

pub use access_gate::{AccessGate, DenialReason, GateDecision};
pub use session_engine::{
    SessionEngine, StepOutcome, WorkflowSteps, EXPLICIT_GRACE, TIMEOUT_GRACE,
};
pub use targeting::{resolve_target, DISAMBIGUATION_WINDOW, TARGET_PROMPT_WINDOW};
pub use timer::SessionTimer;
