//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Configuration is loaded with the
//! `RANK_WARDEN` prefix and nested values use double underscores as
//! separators.
//!
//! # Example
//!
//! ```no_run
//! use rank_warden::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod access;
mod chat;
mod error;
mod server;
mod storage;

pub use access::AccessConfig;
pub use chat::ChatConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};
pub use storage::StorageConfig;

use serde::Deserialize;

/// Root application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Keep-alive listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// JSON document locations.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Chat platform credentials.
    pub chat: ChatConfig,

    /// Privileged-identity set.
    #[serde(default)]
    pub access: AccessConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// 1. Loads `.env` if present (development)
    /// 2. Reads environment variables with the `RANK_WARDEN` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `RANK_WARDEN__SERVER__PORT=3000` -> `server.port = 3000`
    /// - `RANK_WARDEN__CHAT__BOT_TOKEN=...` -> `chat.bot_token = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("RANK_WARDEN")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.storage.validate()?;
        self.chat.validate()?;
        self.access.validate()?;
        Ok(())
    }

    /// Check if running in production environment.
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
