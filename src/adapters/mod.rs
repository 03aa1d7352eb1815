//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `storage` - JSON document stores with corruption recovery
//! - `chat` - scripted in-memory chat client for tests
//! - `http` - keep-alive listener for uptime monitoring

pub mod chat;
pub mod http;
pub mod storage;

pub use chat::ScriptedChatClient;
pub use storage::{JsonCatalogStore, JsonDossierStore};
