//! Rank Warden - process entry point.
//!
//! Initializes logging, loads configuration and the persisted documents,
//! and keeps the keep-alive listener up until shutdown. The chat platform
//! adapter attaches through the library's [`rank_warden::ports::ChatClient`]
//! port and dispatches into the workflows in
//! [`rank_warden::application::workflows`].

use std::error::Error;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use rank_warden::adapters::http::keepalive;
use rank_warden::adapters::storage::{load_rank_table, JsonCatalogStore, JsonDossierStore};
use rank_warden::config::AppConfig;
use rank_warden::ports::{CatalogRepository, DossierRepository};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::load()?;
    config.validate()?;

    let dossiers: Arc<dyn DossierRepository> =
        Arc::new(JsonDossierStore::load(config.storage.dossier_path()).await?);
    let catalog: Arc<dyn CatalogRepository> =
        Arc::new(JsonCatalogStore::load(config.storage.catalog_path()).await?);
    let ranks = load_rank_table(&config.storage.rank_path()).await;

    info!(
        dossiers = dossiers.count().await?,
        specializations = catalog.all().await?.len(),
        ranks = ranks.entries().len(),
        privileged = config.access.privileged_ids().len(),
        "documents loaded"
    );

    let addr = config.server.socket_addr()?;
    tokio::select! {
        served = keepalive::serve(addr) => served?,
        _ = tokio::signal::ctrl_c() => info!("shutdown signal received"),
    }

    Ok(())
}
