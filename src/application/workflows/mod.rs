//! Workflows - the fixed set of interactive flows.
//!
//! Each workflow is one instance of the session engine with its own step
//! logic:
//!
//! - `AdminPanelWorkflow` - the umbrella dispatch panel
//! - `OnboardWorkflow` - create a dossier for a new member
//! - `EditDossierWorkflow` - rank/specialization/note editing
//! - `EditCatalogWorkflow` - specialization catalog administration
//! - `ViewDossierWorkflow` - self-service private dossier view
//! - `BrowseCatalogWorkflow` - read-only specialization browser

mod admin_panel;
mod browse_catalog;
mod edit_catalog;
mod edit_dossier;
mod onboard;
mod view_dossier;
mod views;

pub use admin_panel::AdminPanelWorkflow;
pub use browse_catalog::BrowseCatalogWorkflow;
pub use edit_catalog::EditCatalogWorkflow;
pub use edit_dossier::EditDossierWorkflow;
pub use onboard::OnboardWorkflow;
pub use view_dossier::ViewDossierWorkflow;

use crate::domain::foundation::MemberId;

/// Context carried by a command or panel dispatch into a workflow.
#[derive(Debug, Clone)]
pub struct DispatchContext {
    /// The invoking user; becomes the session owner.
    pub actor: MemberId,

    /// The invoking user's display name, used in audit notes and status
    /// messages.
    pub actor_display: String,

    /// True when the dispatch came through the umbrella admin panel.
    pub called_from_admin: bool,

    /// True when the platform reports the invoking user as an administrator
    /// (controls visibility of training material in the catalog browser).
    pub is_admin: bool,
}

impl DispatchContext {
    /// Creates a direct-invocation context (not via the admin panel).
    pub fn direct(actor: MemberId, actor_display: impl Into<String>) -> Self {
        Self {
            actor,
            actor_display: actor_display.into(),
            called_from_admin: false,
            is_admin: false,
        }
    }

    /// Returns the same context marked as dispatched from the admin panel.
    pub fn via_admin(&self) -> Self {
        Self {
            called_from_admin: true,
            ..self.clone()
        }
    }

    /// Returns the same context with the platform-admin flag set.
    pub fn as_admin(mut self) -> Self {
        self.is_admin = true;
        self
    }
}
