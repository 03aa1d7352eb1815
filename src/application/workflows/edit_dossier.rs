//! Dossier editing workflow - the player administration panel.
//!
//! Flow: resolve the target member, stage their record (or an empty one for
//! members with no dossier yet), then serve a menu panel with independent
//! sub-steps: rank edit, specialization edit, add note, delete note. Each
//! confirmed sub-step writes the document once and refreshes the panel; the
//! 300 s menu window restarts on every successful action. Rank and
//! specialization changes append an audit note; add/delete note do not
//! double-log.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::error;

use crate::domain::dossier::DossierRecord;
use crate::domain::foundation::{DomainError, MemberId};
use crate::domain::rank::RankTable;
use crate::domain::session::{DeadlinePolicy, Session, TerminalState};
use crate::ports::{
    ButtonSpec, ButtonStyle, CatalogRepository, ChatClient, ChoicePrompt, ChoiceReply,
    DossierRepository, PanelAction, PanelEvent, PanelView, SelectOption, TextPrompt,
};

use crate::application::engine::{
    resolve_target, AccessGate, GateDecision, SessionEngine, StepOutcome, WorkflowSteps,
};

use super::views::dossier_view;
use super::DispatchContext;

/// Menu window; restarts on every successful action.
pub const MENU_WINDOW: Duration = Duration::from_secs(300);

/// Wait for the rank / specialization selection sub-steps.
pub const SUB_SELECT_WINDOW: Duration = Duration::from_secs(60);

/// Wait for the add-note / delete-note modals.
pub const NOTE_MODAL_WINDOW: Duration = Duration::from_secs(120);

/// Dossier editing entry point, reachable only through the admin panel.
pub struct EditDossierWorkflow {
    client: Arc<dyn ChatClient>,
    dossiers: Arc<dyn DossierRepository>,
    catalog: Arc<dyn CatalogRepository>,
    ranks: Arc<RankTable>,
    gate: AccessGate,
}

impl EditDossierWorkflow {
    pub fn new(
        client: Arc<dyn ChatClient>,
        dossiers: Arc<dyn DossierRepository>,
        catalog: Arc<dyn CatalogRepository>,
        ranks: Arc<RankTable>,
        gate: AccessGate,
    ) -> Self {
        Self {
            client,
            dossiers,
            catalog,
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

        let prompt = TextPrompt::short("Select Member to Edit", "Enter Member Name or ID")
            .with_placeholder("e.g. Thomas Picklini, Thomas, 123456789012345678");
        let target = match resolve_target(&self.client, &ctx.actor, prompt).await? {
            Some(target) => target,
            None => return Ok(()),
        };

        // Stage the record in memory; members without a dossier get an empty
        // one that is persisted only when the first sub-step confirms.
        let record = match self.dossiers.get(&target.id).await.map_err(DomainError::from)? {
            Some(mut record) => {
                record.refresh_identity(&target.username, &target.display_name);
                record
            }
            None => DossierRecord::unassigned(
                target.id.clone(),
                &target.username,
                &target.display_name,
            ),
        };

        let mut session = Session::new(
            ctx.actor.clone(),
            ctx.actor_display.clone(),
            DeadlinePolicy::PerStep(MENU_WINDOW),
        );
        session.bind_target(target.clone());

        let steps = EditDossierSteps {
            client: Arc::clone(&self.client),
            dossiers: Arc::clone(&self.dossiers),
            catalog: Arc::clone(&self.catalog),
            ranks: Arc::clone(&self.ranks),
            actor: ctx.actor.clone(),
            actor_display: ctx.actor_display.clone(),
            record,
        };

        SessionEngine::new(Arc::clone(&self.client), self.gate.clone())
            .run(session, steps)
            .await?;
        Ok(())
    }
}

struct EditDossierSteps {
    client: Arc<dyn ChatClient>,
    dossiers: Arc<dyn DossierRepository>,
    catalog: Arc<dyn CatalogRepository>,
    ranks: Arc<RankTable>,
    actor: MemberId,
    actor_display: String,
    record: DossierRecord,
}

impl EditDossierSteps {
    /// Flushes the staged record; a write failure is logged and the flow
    /// proceeds.
    async fn persist(&self) {
        if let Err(e) = self.dossiers.upsert_and_save(self.record.clone()).await {
            error!(
                error = %e,
                member = %self.record.member_id(),
                "failed to write dossier document"
            );
        }
    }

    async fn edit_rank(&mut self) -> Result<StepOutcome, DomainError> {
        let options = self
            .ranks
            .entries()
            .iter()
            .map(|e| SelectOption::new(&e.code, e.label()))
            .collect();
        let prompt = ChoicePrompt::single("Select new rank or cancel:", options).cancellable();

        match self
            .client
            .prompt_choice(&self.actor, prompt, SUB_SELECT_WINDOW)
            .await?
        {
            None => {
                self.client.notice(&self.actor, "Timed out.").await?;
                Ok(StepOutcome::Idle)
            }
            Some(ChoiceReply::Cancelled) => Ok(StepOutcome::Idle),
            Some(ChoiceReply::Selected(values)) => {
                let code = values
                    .first()
                    .ok_or_else(|| DomainError::invalid_input("No rank selected."))?;
                let label = self
                    .ranks
                    .label_of(code)
                    .ok_or_else(|| DomainError::invalid_input(format!("Unknown rank: {}", code)))?;

                self.record.change_rank(&label, &self.actor_display);
                self.persist().await;
                let _ = self
                    .client
                    .assign_role(self.record.member_id(), &label)
                    .await;
                Ok(StepOutcome::Refresh)
            }
        }
    }

    async fn edit_specializations(&mut self) -> Result<StepOutcome, DomainError> {
        let catalog = self.catalog.all().await.map_err(DomainError::from)?;
        if catalog.is_empty() {
            return Err(DomainError::invalid_input("No specializations available."));
        }

        let options = catalog
            .iter()
            .map(|(code, def)| {
                SelectOption::new(code, format!("{} ({})", def.name, code.to_uppercase()))
                    .preselected(self.record.specializations().contains(code))
            })
            .collect();
        let prompt =
            ChoicePrompt::multi("Select specializations or cancel:", options).cancellable();

        match self
            .client
            .prompt_choice(&self.actor, prompt, SUB_SELECT_WINDOW)
            .await?
        {
            None => {
                self.client.notice(&self.actor, "Timed out.").await?;
                Ok(StepOutcome::Idle)
            }
            Some(ChoiceReply::Cancelled) => Ok(StepOutcome::Idle),
            Some(ChoiceReply::Selected(values)) => {
                self.record.set_specializations(values, &self.actor_display);
                self.persist().await;
                Ok(StepOutcome::Refresh)
            }
        }
    }

    async fn add_note(&mut self) -> Result<StepOutcome, DomainError> {
        let prompt = TextPrompt::paragraph(
            format!("Add Note for {}", self.record.display_name()),
            "New Note",
        )
        .with_placeholder("Type note here...");

        match self
            .client
            .prompt_text(&self.actor, prompt, NOTE_MODAL_WINDOW)
            .await?
        {
            None => Ok(StepOutcome::Idle),
            Some(text) => {
                self.record
                    .add_note(text, &self.actor_display)
                    .map_err(|e| DomainError::invalid_input(e.to_string()))?;
                self.persist().await;
                Ok(StepOutcome::Refresh)
            }
        }
    }

    async fn delete_note(&mut self) -> Result<StepOutcome, DomainError> {
        let prompt = TextPrompt::short(
            format!("Delete Note for {}", self.record.display_name()),
            "Enter note number to delete",
        )
        .with_placeholder("Note number");

        match self
            .client
            .prompt_text(&self.actor, prompt, NOTE_MODAL_WINDOW)
            .await?
        {
            None => Ok(StepOutcome::Idle),
            Some(raw) => {
                let index: usize = raw
                    .trim()
                    .parse()
                    .map_err(|_| DomainError::invalid_input("Invalid note number."))?;
                self.record.delete_note(index)?;
                self.persist().await;
                Ok(StepOutcome::Refresh)
            }
        }
    }
}

#[async_trait]
impl WorkflowSteps for EditDossierSteps {
    async fn render(&self) -> PanelView {
        let catalog = self.catalog.all().await.unwrap_or_default();
        dossier_view(&self.record, &catalog)
            .button(ButtonSpec::new("rank", "Edit Rank", ButtonStyle::Primary))
            .button(ButtonSpec::new("spec", "Edit Specializations", ButtonStyle::Secondary))
            .button(ButtonSpec::new("note", "Add Note", ButtonStyle::Secondary))
            .button(ButtonSpec::new("delnote", "Delete Note", ButtonStyle::Danger))
            .button(ButtonSpec::new("finish", "Finish", ButtonStyle::Success))
    }

    async fn on_event(&mut self, event: &PanelEvent) -> Result<StepOutcome, DomainError> {
        match &event.action {
            PanelAction::Button { id } if id == "rank" => self.edit_rank().await,
            PanelAction::Button { id } if id == "spec" => self.edit_specializations().await,
            PanelAction::Button { id } if id == "note" => self.add_note().await,
            PanelAction::Button { id } if id == "delnote" => self.delete_note().await,
            PanelAction::Button { id } if id == "finish" => {
                Ok(StepOutcome::Terminal(TerminalState::Confirmed))
            }
            _ => Ok(StepOutcome::Idle),
        }
    }

    fn terminal_view(&self, terminal: TerminalState) -> PanelView {
        match terminal {
            TerminalState::Confirmed | TerminalState::Cancelled => {
                PanelView::new("Dossier Closed")
                    .with_body(format!("Dossier for {} closed.", self.record.display_name()))
            }
            TerminalState::TimedOut => PanelView::new("Session Expired")
                .with_body("Session expired - dossier closed."),
        }
    }
}
