//! Umbrella admin panel - the dispatch surface for the three admin flows.
//!
//! One fixed 300 s panel routing to onboarding, dossier editing, and
//! catalog administration. Sub-workflows run inline with
//! `called_from_admin` set; only this panel may reach them. Finish deletes
//! the panel immediately after the 1 s grace.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::session::{DeadlinePolicy, Session, TerminalState};
use crate::ports::{ButtonSpec, ButtonStyle, ChatClient, PanelAction, PanelEvent, PanelView};

use crate::application::engine::{AccessGate, SessionEngine, StepOutcome, WorkflowSteps};

use super::{DispatchContext, EditCatalogWorkflow, EditDossierWorkflow, OnboardWorkflow};

/// Fixed panel window.
pub const PANEL_WINDOW: Duration = Duration::from_secs(300);

/// The umbrella dispatch panel.
pub struct AdminPanelWorkflow {
    client: Arc<dyn ChatClient>,
    gate: AccessGate,
    onboard: Arc<OnboardWorkflow>,
    edit_dossier: Arc<EditDossierWorkflow>,
    edit_catalog: Arc<EditCatalogWorkflow>,
}

impl AdminPanelWorkflow {
    pub fn new(
        client: Arc<dyn ChatClient>,
        gate: AccessGate,
        onboard: Arc<OnboardWorkflow>,
        edit_dossier: Arc<EditDossierWorkflow>,
        edit_catalog: Arc<EditCatalogWorkflow>,
    ) -> Self {
        Self {
            client,
            gate,
            onboard,
            edit_dossier,
            edit_catalog,
        }
    }

    /// Runs the panel for one dispatch. Platform-side permission checks have
    /// already restricted the command to administrators.
    pub async fn run(&self, ctx: DispatchContext) -> Result<(), DomainError> {
        let session = Session::new(
            ctx.actor.clone(),
            ctx.actor_display.clone(),
            DeadlinePolicy::FixedWindow(PANEL_WINDOW),
        );

        let steps = AdminPanelSteps {
            ctx,
            onboard: Arc::clone(&self.onboard),
            edit_dossier: Arc::clone(&self.edit_dossier),
            edit_catalog: Arc::clone(&self.edit_catalog),
        };

        SessionEngine::new(Arc::clone(&self.client), self.gate.clone())
            .run(session, steps)
            .await?;
        Ok(())
    }
}

struct AdminPanelSteps {
    ctx: DispatchContext,
    onboard: Arc<OnboardWorkflow>,
    edit_dossier: Arc<EditDossierWorkflow>,
    edit_catalog: Arc<EditCatalogWorkflow>,
}

#[async_trait]
impl WorkflowSteps for AdminPanelSteps {
    async fn render(&self) -> PanelView {
        PanelView::new("Command Admin Panel")
            .with_body(concat!(
                "Welcome to the **Command Center**.\n\n",
                "Select one of the options below:\n",
                "• **Edit Players** - Manage dossiers, ranks, and notes.\n",
                "• **Edit Specializations** - Manage specialization data and training info.\n",
                "• **Onboard Members** - Add new members to the database.\n\n",
                "_Panel closes automatically after 5 minutes of inactivity or when **Finish** is pressed._"
            ))
            .button(ButtonSpec::new("edit_players", "Edit Players", ButtonStyle::Primary))
            .button(ButtonSpec::new(
                "edit_specializations",
                "Edit Specializations",
                ButtonStyle::Secondary,
            ))
            .button(ButtonSpec::new("add_players", "Onboard Members", ButtonStyle::Success))
            .button(ButtonSpec::new("finish_admin", "Finish", ButtonStyle::Danger))
    }

    async fn on_event(&mut self, event: &PanelEvent) -> Result<StepOutcome, DomainError> {
        match &event.action {
            PanelAction::Button { id } if id == "edit_players" => {
                self.edit_dossier.run(self.ctx.via_admin()).await?;
                Ok(StepOutcome::Refresh)
            }
            PanelAction::Button { id } if id == "edit_specializations" => {
                self.edit_catalog.run(self.ctx.via_admin()).await?;
                Ok(StepOutcome::Refresh)
            }
            PanelAction::Button { id } if id == "add_players" => {
                self.onboard.run(self.ctx.via_admin()).await?;
                Ok(StepOutcome::Refresh)
            }
            PanelAction::Button { id } if id == "finish_admin" => {
                Ok(StepOutcome::Terminal(TerminalState::Confirmed))
            }
            _ => Ok(StepOutcome::Idle),
        }
    }

    fn terminal_view(&self, terminal: TerminalState) -> PanelView {
        match terminal {
            TerminalState::Confirmed | TerminalState::Cancelled => {
                PanelView::new("Admin Panel Closed").with_body("Admin Panel closed manually.")
            }
            TerminalState::TimedOut => PanelView::new("Session Expired")
                .with_body("Session expired - Admin Panel closed."),
        }
    }
}
