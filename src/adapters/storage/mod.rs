//! Storage adapters - JSON document implementations of the repository ports.

mod catalog_store;
mod dossier_store;
mod json_document;
mod rank_table;

pub use catalog_store::JsonCatalogStore;
pub use dossier_store::JsonDossierStore;
pub use json_document::{load_or_reset, write_atomic};
pub use rank_table::load_rank_table;
