//! Chat platform configuration.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::ValidationError;

/// Credentials and addressing for the host chat platform.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    /// Bot authentication token. Never logged.
    pub bot_token: SecretString,

    /// Server (guild) the bot administers, when pinned to one.
    #[serde(default)]
    pub guild_id: Option<String>,
}

impl ChatConfig {
    /// Validates the section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.bot_token.expose_secret().trim().is_empty() {
            return Err(ValidationError::new("chat.bot_token", "must not be empty"));
        }
        if let Some(guild_id) = &self.guild_id {
            if guild_id.trim().is_empty() {
                return Err(ValidationError::new(
                    "chat.guild_id",
                    "must not be empty when set",
                ));
            }
        }
        Ok(())
    }
}
