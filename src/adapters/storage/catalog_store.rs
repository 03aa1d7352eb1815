//! JSON file catalog store - Implementation of CatalogRepository.

use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::adapters::storage::json_document::{load_or_reset, write_atomic};
use crate::domain::catalog::{normalize_code, SpecializationDefinition};
use crate::ports::{CatalogRepository, StorageError};

/// Specialization catalog backed by one JSON file, keyed by normalized code.
pub struct JsonCatalogStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, SpecializationDefinition>>,
}

impl JsonCatalogStore {
    /// Loads the document at `path`, recovering from absence or corruption.
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let raw: BTreeMap<String, SpecializationDefinition> = load_or_reset(&path).await?;
        // Hand-edited documents may carry uppercase keys.
        let entries = raw
            .into_iter()
            .map(|(code, def)| (normalize_code(&code), def))
            .collect();
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }
}

#[async_trait]
impl CatalogRepository for JsonCatalogStore {
    async fn all(&self) -> Result<BTreeMap<String, SpecializationDefinition>, StorageError> {
        Ok(self.entries.lock().await.clone())
    }

    async fn get(&self, code: &str) -> Result<Option<SpecializationDefinition>, StorageError> {
        Ok(self.entries.lock().await.get(&normalize_code(code)).cloned())
    }

    async fn upsert_and_save(
        &self,
        code: &str,
        definition: SpecializationDefinition,
    ) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().await;
        entries.insert(normalize_code(code), definition);
        write_atomic(&self.path, &*entries).await
    }

    async fn remove_and_save(&self, code: &str) -> Result<bool, StorageError> {
        let mut entries = self.entries.lock().await;
        let removed = entries.remove(&normalize_code(code)).is_some();
        if removed {
            write_atomic(&self.path, &*entries).await?;
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn medic() -> SpecializationDefinition {
        SpecializationDefinition::new("Medic", "Field medicine").unwrap()
    }

    async fn store(dir: &TempDir) -> JsonCatalogStore {
        JsonCatalogStore::load(dir.path().join("specializations.json"))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn missing_document_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir).await;
        assert!(store.all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn upsert_normalizes_code() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir).await;

        store.upsert_and_save("  32M ", medic()).await.unwrap();

        assert!(store.get("32m").await.unwrap().is_some());
        assert!(store.get("32M").await.unwrap().is_some());
        let all = store.all().await.unwrap();
        assert!(all.contains_key("32m"));
    }

    #[tokio::test]
    async fn upsert_overwrites_existing_code() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir).await;

        store.upsert_and_save("32m", medic()).await.unwrap();
        let replacement =
            SpecializationDefinition::new("Combat Medic", "Front-line medicine").unwrap();
        store.upsert_and_save("32m", replacement).await.unwrap();

        let all = store.all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all["32m"].name, "Combat Medic");
    }

    #[tokio::test]
    async fn remove_reports_presence() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir).await;

        store.upsert_and_save("32m", medic()).await.unwrap();
        assert!(store.remove_and_save("32m").await.unwrap());
        assert!(!store.remove_and_save("32m").await.unwrap());
        assert!(store.get("32m").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn entries_survive_reload() {
        let dir = TempDir::new().unwrap();
        {
            let store = store(&dir).await;
            store.upsert_and_save("32m", medic()).await.unwrap();
        }
        let reloaded = store(&dir).await;
        assert_eq!(reloaded.get("32m").await.unwrap().unwrap().name, "Medic");
    }

    #[tokio::test]
    async fn hand_edited_uppercase_keys_normalize_at_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("specializations.json");
        std::fs::write(
            &path,
            r#"{"32M": {"name": "Medic", "description": "Field medicine"}}"#,
        )
        .unwrap();

        let store = JsonCatalogStore::load(&path).await.unwrap();
        assert!(store.get("32m").await.unwrap().is_some());
    }
}
