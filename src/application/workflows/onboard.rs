//! Onboard workflow - create a dossier for a new member.
//!
//! Flow: resolve the target member (modal, 120 s; ambiguous selection,
//! 60 s) → reject if a dossier already exists → rank panel (select plus
//! confirm/cancel, one fixed 180 s window) → confirm writes the record with
//! its auto-generated onboarding note and assigns the rank role
//! best-effort. Only the confirm step touches storage.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::error;

use crate::domain::dossier::DossierRecord;
use crate::domain::foundation::DomainError;
use crate::domain::rank::RankTable;
use crate::domain::roster::RosterEntry;
use crate::domain::session::{DeadlinePolicy, Session, TerminalState};
use crate::ports::{
    ButtonSpec, ButtonStyle, ChatClient, DossierRepository, PanelAction, PanelEvent, PanelView,
    SelectMenu, SelectOption, TextPrompt,
};

use crate::application::engine::{
    resolve_target, AccessGate, GateDecision, SessionEngine, StepOutcome, WorkflowSteps,
};

use super::DispatchContext;

/// One fixed window covering rank selection and confirmation.
pub const RANK_PANEL_WINDOW: Duration = Duration::from_secs(180);

/// Onboarding entry point, reachable only through the admin panel.
pub struct OnboardWorkflow {
    client: Arc<dyn ChatClient>,
    dossiers: Arc<dyn DossierRepository>,
    ranks: Arc<RankTable>,
    gate: AccessGate,
}

impl OnboardWorkflow {
    pub fn new(
        client: Arc<dyn ChatClient>,
        dossiers: Arc<dyn DossierRepository>,
        ranks: Arc<RankTable>,
        gate: AccessGate,
    ) -> Self {
        Self {
            client,
            dossiers,
            ranks,
            gate,
        }
    }

    /// Runs the workflow for one dispatch.
    pub async fn run(&self, ctx: DispatchContext) -> Result<(), DomainError> {
        if let GateDecision::Denied(reason) = self.gate.allow_entry(ctx.called_from_admin) {
            self.client.notice(&ctx.actor, reason.user_message()).await?;
            return Ok(());
        }

        let prompt = TextPrompt::short("Onboard Member", "Enter Member Name or ID")
            .with_placeholder("Example: Thomas Picklini, Thomas, 123456789012345678");
        let target = match resolve_target(&self.client, &ctx.actor, prompt).await? {
            Some(target) => target,
            None => return Ok(()),
        };

        if self.dossiers.contains(&target.id).await.map_err(DomainError::from)? {
            self.client
                .notice(
                    &ctx.actor,
                    &format!("{} already has a dossier entry.", target.display_name),
                )
                .await?;
            return Ok(());
        }

        let mut session = Session::new(
            ctx.actor.clone(),
            ctx.actor_display.clone(),
            DeadlinePolicy::FixedWindow(RANK_PANEL_WINDOW),
        );
        session.bind_target(target.clone());

        let steps = OnboardSteps {
            client: Arc::clone(&self.client),
            dossiers: Arc::clone(&self.dossiers),
            ranks: Arc::clone(&self.ranks),
            target,
            actor_display: ctx.actor_display.clone(),
            selected: None,
            applied_label: None,
        };

        SessionEngine::new(Arc::clone(&self.client), self.gate.clone())
            .run(session, steps)
            .await?;
        Ok(())
    }
}

struct OnboardSteps {
    client: Arc<dyn ChatClient>,
    dossiers: Arc<dyn DossierRepository>,
    ranks: Arc<RankTable>,
    target: RosterEntry,
    actor_display: String,
    selected: Option<String>,
    applied_label: Option<String>,
}

impl OnboardSteps {
    fn rank_menu(&self) -> SelectMenu {
        let options = self
            .ranks
            .entries()
            .iter()
            .map(|e| {
                SelectOption::new(&e.code, e.label())
                    .preselected(self.selected.as_deref() == Some(e.code.as_str()))
            })
            .collect();
        SelectMenu::single("onboard_rank", "Select starting rank...", options)
    }
}

#[async_trait]
impl WorkflowSteps for OnboardSteps {
    async fn render(&self) -> PanelView {
        let body = match &self.selected {
            Some(code) => {
                let label = self.ranks.label_of(code).unwrap_or_else(|| code.clone());
                format!(
                    "**{}** will be onboarded as **{}**.\nClick **Confirm Onboard** to finalize.",
                    self.target.display_name, label
                )
            }
            None => concat!(
                "Select the member's **initial rank** below.\n\n",
                "Once confirmed, this will automatically:\n",
                "• Create their dossier entry\n",
                "• Assign their rank role\n",
                "• Log the onboarding note"
            )
            .to_string(),
        };

        let confirm = ButtonSpec::new("onboard_confirm", "Confirm Onboard", ButtonStyle::Success);
        let confirm = if self.selected.is_some() {
            confirm
        } else {
            confirm.disabled()
        };

        PanelView::new(format!("Onboard {}", self.target.display_name))
            .with_body(body)
            .select(self.rank_menu())
            .button(confirm)
            .button(ButtonSpec::new("onboard_cancel", "Cancel", ButtonStyle::Danger))
    }

    async fn on_event(&mut self, event: &PanelEvent) -> Result<StepOutcome, DomainError> {
        match &event.action {
            PanelAction::Select { id, values } if id == "onboard_rank" => {
                let code = values
                    .first()
                    .ok_or_else(|| DomainError::invalid_input("No rank selected."))?;
                if self.ranks.label_of(code).is_none() {
                    return Err(DomainError::invalid_input(format!("Unknown rank: {}", code)));
                }
                self.selected = Some(code.clone());
                Ok(StepOutcome::Refresh)
            }
            PanelAction::Button { id } if id == "onboard_cancel" => {
                Ok(StepOutcome::Terminal(TerminalState::Cancelled))
            }
            PanelAction::Button { id } if id == "onboard_confirm" => {
                let code = self.selected.as_ref().ok_or_else(|| {
                    DomainError::invalid_input("Please select a rank before confirming.")
                })?;
                let label = self
                    .ranks
                    .label_of(code)
                    .ok_or_else(|| DomainError::invalid_input(format!("Unknown rank: {}", code)))?;

                let record = DossierRecord::onboarded(
                    self.target.id.clone(),
                    &self.target.username,
                    &self.target.display_name,
                    &label,
                    &self.actor_display,
                );
                if let Err(e) = self.dossiers.upsert_and_save(record).await {
                    error!(error = %e, member = %self.target.id, "failed to write dossier document");
                }

                // Role assignment is best-effort; a failure never blocks the
                // record write.
                let _ = self.client.assign_role(&self.target.id, &label).await;

                self.applied_label = Some(label);
                Ok(StepOutcome::Terminal(TerminalState::Confirmed))
            }
            _ => Ok(StepOutcome::Idle),
        }
    }

    fn terminal_view(&self, terminal: TerminalState) -> PanelView {
        match terminal {
            TerminalState::Confirmed => {
                let label = self.applied_label.as_deref().unwrap_or("Unassigned");
                PanelView::new("Member Onboarded").with_body(format!(
                    "**{}** successfully onboarded at **{}**.\nDossier created and note logged.",
                    self.target.display_name, label
                ))
            }
            TerminalState::Cancelled => PanelView::new("Onboarding Cancelled")
                .with_body(format!("Operation cancelled by {}.", self.actor_display)),
            TerminalState::TimedOut => {
                PanelView::new("Session Expired").with_body("Onboarding session closed.")
            }
        }
    }
}
