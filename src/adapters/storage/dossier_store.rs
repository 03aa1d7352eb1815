//! JSON file dossier store - Implementation of DossierRepository.

use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::adapters::storage::json_document::{load_or_reset, write_atomic};
use crate::domain::dossier::DossierRecord;
use crate::domain::foundation::MemberId;
use crate::ports::{DossierRepository, StorageError};

/// Always-resident dossier document backed by one JSON file.
///
/// The whole mapping lives in memory; every confirmed write replaces the
/// entry and rewrites the file. Writes to different members touch disjoint
/// keys; writes to the same member are last-writer-wins.
pub struct JsonDossierStore {
    path: PathBuf,
    records: Mutex<BTreeMap<MemberId, DossierRecord>>,
}

impl JsonDossierStore {
    /// Loads the document at `path`, recovering from absence or corruption.
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let records = load_or_reset(&path).await?;
        Ok(Self {
            path,
            records: Mutex::new(records),
        })
    }
}

#[async_trait]
impl DossierRepository for JsonDossierStore {
    async fn get(&self, member_id: &MemberId) -> Result<Option<DossierRecord>, StorageError> {
        Ok(self.records.lock().await.get(member_id).cloned())
    }

    async fn contains(&self, member_id: &MemberId) -> Result<bool, StorageError> {
        Ok(self.records.lock().await.contains_key(member_id))
    }

    async fn upsert_and_save(&self, record: DossierRecord) -> Result<(), StorageError> {
        let mut records = self.records.lock().await;
        records.insert(record.member_id().clone(), record);
        write_atomic(&self.path, &*records).await
    }

    async fn count(&self) -> Result<usize, StorageError> {
        Ok(self.records.lock().await.len())
    }
}
