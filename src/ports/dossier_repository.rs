//! Dossier repository port.

use async_trait::async_trait;

use crate::domain::dossier::DossierRecord;
use crate::domain::foundation::MemberId;

use super::StorageError;

/// Port for the always-resident dossier document.
///
/// Implementors hold the whole mapping in memory and flush the full document
/// on every confirmed write. There is no cross-process locking; concurrent
/// writes to the same member are last-writer-wins.
#[async_trait]
pub trait DossierRepository: Send + Sync {
    /// Fetches the record for a member, if one exists.
    async fn get(&self, member_id: &MemberId) -> Result<Option<DossierRecord>, StorageError>;

    /// Checks whether a record exists for a member.
    async fn contains(&self, member_id: &MemberId) -> Result<bool, StorageError>;

    /// Replaces the in-memory entry and rewrites the document.
    async fn upsert_and_save(&self, record: DossierRecord) -> Result<(), StorageError>;

    /// Number of records on file.
    async fn count(&self) -> Result<usize, StorageError>;
}
