//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ChatClient` - everything the core consumes from the host platform:
//!   roster enumeration, bounded prompts, panel lifecycle, notices, and
//!   best-effort role assignment
//! - `DossierRepository` - the always-resident dossier document
//! - `CatalogRepository` - the specialization catalog document

mod catalog_repository;
mod chat_client;
mod dossier_repository;
mod storage_error;

pub use catalog_repository::CatalogRepository;
pub use chat_client::{
    ButtonSpec, ButtonStyle, ChatClient, ChatError, ChoicePrompt, ChoiceReply, FormPrompt,
    PanelAction, PanelEvent, PanelField, PanelView, SelectMenu, SelectOption, TextField,
    TextPrompt,
};
pub use dossier_repository::DossierRepository;
pub use storage_error::StorageError;
