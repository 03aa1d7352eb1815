//! Rank table loader.
//!
//! The rank document is read-only reference data: code → display name.
//! Unlike the writable documents it is never reset on corruption; a bad or
//! absent file just falls back to the built-in ladder.

use std::collections::BTreeMap;
use std::path::Path;

use tokio::fs;
use tracing::warn;

use crate::domain::rank::{RankTable, DEFAULT_RANKS};

/// Loads the rank table from `path`, falling back to the built-in ladder
/// when the document is absent or unparseable.
pub async fn load_rank_table(path: &Path) -> RankTable {
    let raw = match fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return DEFAULT_RANKS.clone();
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read rank document, using built-in table");
            return DEFAULT_RANKS.clone();
        }
    };

    match serde_json::from_str::<BTreeMap<String, String>>(&raw) {
        Ok(map) if !map.is_empty() => RankTable::from_map(map),
        Ok(_) => DEFAULT_RANKS.clone(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "rank document corrupt, using built-in table");
            DEFAULT_RANKS.clone()
        }
    }
}
