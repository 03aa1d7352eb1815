//! Access control configuration.

use serde::Deserialize;

use crate::domain::foundation::MemberId;

use super::ValidationError;

/// Privileged-identity configuration.
///
/// The identities allowed to perform destructive catalog operations live
/// here rather than in code. Empty by default: Remove is denied to everyone
/// until configured.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccessConfig {
    /// Comma-separated member ids with destructive-operation rights.
    #[serde(default)]
    pub privileged_user_ids: String,
}

impl AccessConfig {
    /// Parses the configured identities.
    pub fn privileged_ids(&self) -> Vec<MemberId> {
        self.privileged_user_ids
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .filter_map(|id| MemberId::new(id).ok())
            .collect()
    }

    /// Validates the section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for raw in self
            .privileged_user_ids
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
        {
            if MemberId::new(raw).is_err() {
                return Err(ValidationError::new(
                    "access.privileged_user_ids",
                    format!("'{}' is not a valid member id", raw),
                ));
            }
        }
        Ok(())
    }
}
