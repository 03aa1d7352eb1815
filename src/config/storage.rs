//! Document storage configuration.

use std::path::PathBuf;

use serde::Deserialize;

use super::ValidationError;

/// Locations of the persisted JSON documents.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding all documents.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Dossier document file name.
    #[serde(default = "default_dossier_file")]
    pub dossier_file: String,

    /// Specialization catalog file name.
    #[serde(default = "default_catalog_file")]
    pub catalog_file: String,

    /// Rank table file name (read-only).
    #[serde(default = "default_rank_file")]
    pub rank_file: String,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_dossier_file() -> String {
    "dossiers.json".to_string()
}

fn default_catalog_file() -> String {
    "specializations.json".to_string()
}

fn default_rank_file() -> String {
    "ranks.json".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            dossier_file: default_dossier_file(),
            catalog_file: default_catalog_file(),
            rank_file: default_rank_file(),
        }
    }
}

impl StorageConfig {
    /// Full path of the dossier document.
    pub fn dossier_path(&self) -> PathBuf {
        self.data_dir.join(&self.dossier_file)
    }

    /// Full path of the catalog document.
    pub fn catalog_path(&self) -> PathBuf {
        self.data_dir.join(&self.catalog_file)
    }

    /// Full path of the rank document.
    pub fn rank_path(&self) -> PathBuf {
        self.data_dir.join(&self.rank_file)
    }

    /// Validates the section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, name) in [
            ("storage.dossier_file", &self.dossier_file),
            ("storage.catalog_file", &self.catalog_file),
            ("storage.rank_file", &self.rank_file),
        ] {
            if name.trim().is_empty() {
                return Err(ValidationError::new(field, "must not be empty"));
            }
        }
        Ok(())
    }
}
