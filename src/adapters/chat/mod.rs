//! Chat adapters.
//!
//! The production platform integration lives outside this crate; what ships
//! here is the scripted in-memory client used by workflow and integration
//! tests.

mod scripted;

pub use scripted::ScriptedChatClient;
