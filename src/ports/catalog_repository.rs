//! Specialization catalog repository port.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::domain::catalog::SpecializationDefinition;

use super::StorageError;

/// Port for the specialization catalog document.
///
/// Codes are lowercase-normalized map keys; upserting an existing code
/// overwrites its entry.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Returns the whole catalog, ordered by code.
    async fn all(&self) -> Result<BTreeMap<String, SpecializationDefinition>, StorageError>;

    /// Fetches one entry by code.
    async fn get(&self, code: &str) -> Result<Option<SpecializationDefinition>, StorageError>;

    /// Inserts or replaces an entry and rewrites the document.
    async fn upsert_and_save(
        &self,
        code: &str,
        definition: SpecializationDefinition,
    ) -> Result<(), StorageError>;

    /// Removes an entry and rewrites the document. Returns whether the code
    /// was present.
    async fn remove_and_save(&self, code: &str) -> Result<bool, StorageError>;
}
