//! Specialization catalog administration workflow.
//!
//! One fixed 300 s panel with four operations: Add (an identity-field modal
//! and a detail-field modal joined by an intermediate continue button, each
//! hop waiting 120 s), Edit (select an existing code, then update its
//! identity fields), Remove (privileged identities only, denied silently to
//! everyone else), and Finish.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::error;

use crate::domain::catalog::{normalize_code, SpecializationDefinition};
use crate::domain::foundation::{DomainError, MemberId};
use crate::domain::session::{DeadlinePolicy, Session, TerminalState};
use crate::ports::{
    ButtonSpec, ButtonStyle, CatalogRepository, ChatClient, ChoicePrompt, ChoiceReply, FormPrompt,
    PanelAction, PanelEvent, PanelView, SelectOption, TextField,
};

use crate::application::engine::{
    AccessGate, GateDecision, SessionEngine, StepOutcome, WorkflowSteps,
};

use super::DispatchContext;

/// Fixed panel window.
pub const PANEL_WINDOW: Duration = Duration::from_secs(300);

/// Wait at each hop of the two-modal Add flow.
pub const MODAL_WINDOW: Duration = Duration::from_secs(120);

/// Wait for the Edit/Remove code selection.
pub const SELECT_WINDOW: Duration = Duration::from_secs(60);

/// Catalog administration entry point, reachable only through the admin
/// panel.
pub struct EditCatalogWorkflow {
    client: Arc<dyn ChatClient>,
    catalog: Arc<dyn CatalogRepository>,
    gate: AccessGate,
}

impl EditCatalogWorkflow {
    pub fn new(
        client: Arc<dyn ChatClient>,
        catalog: Arc<dyn CatalogRepository>,
        gate: AccessGate,
    ) -> Self {
        Self {
            client,
            catalog,
            gate,
        }
    }

    /// Runs the workflow for one dispatch.
    pub async fn run(&self, ctx: DispatchContext) -> Result<(), DomainError> {
        if let GateDecision::Denied(reason) = self.gate.allow_entry(ctx.called_from_admin) {
            self.client.notice(&ctx.actor, reason.user_message()).await?;
            return Ok(());
        }

        let session = Session::new(
            ctx.actor.clone(),
            ctx.actor_display.clone(),
            DeadlinePolicy::FixedWindow(PANEL_WINDOW),
        );

        let steps = CatalogSteps {
            client: Arc::clone(&self.client),
            catalog: Arc::clone(&self.catalog),
            gate: self.gate.clone(),
            actor: ctx.actor.clone(),
        };

        SessionEngine::new(Arc::clone(&self.client), self.gate.clone())
            .run(session, steps)
            .await?;
        Ok(())
    }
}

struct CatalogSteps {
    client: Arc<dyn ChatClient>,
    catalog: Arc<dyn CatalogRepository>,
    gate: AccessGate,
    actor: MemberId,
}

impl CatalogSteps {
    /// Flushes one entry; a write failure is logged and the flow proceeds.
    async fn persist(&self, code: &str, definition: SpecializationDefinition) {
        if let Err(e) = self.catalog.upsert_and_save(code, definition).await {
            error!(error = %e, code, "failed to write catalog document");
        }
    }

    async fn select_code(&self, placeholder: &str) -> Result<Option<String>, DomainError> {
        let catalog = self.catalog.all().await.map_err(DomainError::from)?;
        if catalog.is_empty() {
            return Err(DomainError::invalid_input("No specializations on file."));
        }

        let options = catalog
            .iter()
            .map(|(code, def)| {
                let description = if def.description.is_empty() {
                    "No description".to_string()
                } else {
                    def.description.chars().take(50).collect()
                };
                SelectOption::new(code, &def.name).with_description(description)
            })
            .collect();
        let prompt = ChoicePrompt::single(placeholder, options).cancellable();

        match self
            .client
            .prompt_choice(&self.actor, prompt, SELECT_WINDOW)
            .await?
        {
            None | Some(ChoiceReply::Cancelled) => Ok(None),
            Some(ChoiceReply::Selected(values)) => Ok(values.into_iter().next()),
        }
    }

    async fn add(&mut self) -> Result<StepOutcome, DomainError> {
        let step1 = FormPrompt::new(
            "Add Specialization - Step 1",
            vec![
                TextField::short("spec_code", "Specialization Code", true),
                TextField::short("spec_name", "Name", true),
                TextField::paragraph("spec_desc", "Description", true),
            ],
        );
        let identity = match self
            .client
            .prompt_form(&self.actor, step1, MODAL_WINDOW)
            .await?
        {
            Some(values) => values,
            None => return Ok(StepOutcome::Idle),
        };
        let [code, name, description] = identity.as_slice() else {
            return Err(DomainError::invalid_input("Incomplete specialization form."));
        };
        let code = normalize_code(code);
        if code.is_empty() {
            return Err(DomainError::invalid_input("Specialization code cannot be empty."));
        }
        let definition = SpecializationDefinition::new(name.clone(), description.clone())
            .map_err(|e| DomainError::invalid_input(e.to_string()))?;

        // Intermediate confirmation between the two modals.
        let continue_prompt = ChoicePrompt::single(
            format!(
                "Step 1 complete for **{}** ({}). Continue below.",
                definition.name, code
            ),
            vec![SelectOption::new("continue", "Continue to Step 2")],
        )
        .cancellable();
        match self
            .client
            .prompt_choice(&self.actor, continue_prompt, MODAL_WINDOW)
            .await?
        {
            Some(ChoiceReply::Selected(_)) => {}
            None | Some(ChoiceReply::Cancelled) => return Ok(StepOutcome::Idle),
        }

        let step2 = FormPrompt::new(
            "Add Specialization - Step 2",
            vec![
                TextField::paragraph("spec_sop", "SOP", false),
                TextField::paragraph("spec_radio", "Radio Info", false),
                TextField::paragraph("spec_terms", "Common Terms", false),
                TextField::paragraph("spec_training", "Training", false),
            ],
        );
        let details = match self
            .client
            .prompt_form(&self.actor, step2, MODAL_WINDOW)
            .await?
        {
            Some(values) => values,
            None => return Ok(StepOutcome::Idle),
        };
        let mut details = details.into_iter();
        let definition = definition.with_sections(
            details.next().unwrap_or_default(),
            details.next().unwrap_or_default(),
            details.next().unwrap_or_default(),
            details.next().unwrap_or_default(),
        );

        let name = definition.name.clone();
        self.persist(&code, definition).await;
        self.client
            .notice(
                &self.actor,
                &format!("Specialization **{}** ({}) successfully added.", name, code),
            )
            .await?;
        Ok(StepOutcome::Refresh)
    }

    async fn edit(&mut self) -> Result<StepOutcome, DomainError> {
        let code = match self.select_code("Select specialization to edit...").await? {
            Some(code) => code,
            None => return Ok(StepOutcome::Idle),
        };
        let existing = self
            .catalog
            .get(&code)
            .await
            .map_err(DomainError::from)?
            .ok_or_else(|| DomainError::invalid_input(format!("Unknown specialization: {}", code)))?;

        let form = FormPrompt::new(
            format!("Edit Specialization - {}", existing.name),
            vec![
                TextField::short("spec_name", "Name", true),
                TextField::paragraph("spec_desc", "Description", true),
            ],
        );
        let identity = match self
            .client
            .prompt_form(&self.actor, form, MODAL_WINDOW)
            .await?
        {
            Some(values) => values,
            None => return Ok(StepOutcome::Idle),
        };
        let [name, description] = identity.as_slice() else {
            return Err(DomainError::invalid_input("Incomplete specialization form."));
        };

        // Identity fields change; detail sections are preserved.
        let updated = SpecializationDefinition::new(name.clone(), description.clone())
            .map_err(|e| DomainError::invalid_input(e.to_string()))?
            .with_sections(
                existing.sop.clone(),
                existing.radio.clone(),
                existing.terms.clone(),
                existing.training.clone(),
            );
        self.persist(&code, updated).await;
        Ok(StepOutcome::Refresh)
    }

    async fn remove(&mut self) -> Result<StepOutcome, DomainError> {
        // Destructive: silently denied outside the privileged set.
        if !self.gate.allow_destructive(&self.actor).is_allowed() {
            return Ok(StepOutcome::Idle);
        }

        let code = match self
            .select_code("Select specialization to remove...")
            .await?
        {
            Some(code) => code,
            None => return Ok(StepOutcome::Idle),
        };

        match self.catalog.remove_and_save(&code).await {
            Ok(_) => Ok(StepOutcome::Refresh),
            Err(e) => {
                error!(error = %e, code, "failed to write catalog document");
                Ok(StepOutcome::Refresh)
            }
        }
    }
}

#[async_trait]
impl WorkflowSteps for CatalogSteps {
    async fn render(&self) -> PanelView {
        let catalog = self.catalog.all().await.unwrap_or_default();
        let listing = if catalog.is_empty() {
            "_No specializations added yet._".to_string()
        } else {
            catalog
                .iter()
                .map(|(code, def)| format!("• **{}** ({})", def.name, code))
                .collect::<Vec<_>>()
                .join("\n")
        };

        let mut view = PanelView::new("Specialization Administration Panel")
            .with_body("Manage all registered specializations.")
            .field("Current Specializations", listing)
            .button(ButtonSpec::new("add_spec", "Add", ButtonStyle::Success))
            .button(ButtonSpec::new("edit_spec", "Edit", ButtonStyle::Primary));

        // The Remove button renders only for privileged identities.
        if self.gate.allow_destructive(&self.actor).is_allowed() {
            view = view.button(ButtonSpec::new("remove_spec", "Remove", ButtonStyle::Danger));
        }

        view.button(ButtonSpec::new("finish_spec", "Finish", ButtonStyle::Secondary))
    }

    async fn on_event(&mut self, event: &PanelEvent) -> Result<StepOutcome, DomainError> {
        match &event.action {
            PanelAction::Button { id } if id == "add_spec" => self.add().await,
            PanelAction::Button { id } if id == "edit_spec" => self.edit().await,
            PanelAction::Button { id } if id == "remove_spec" => self.remove().await,
            PanelAction::Button { id } if id == "finish_spec" => {
                Ok(StepOutcome::Terminal(TerminalState::Confirmed))
            }
            _ => Ok(StepOutcome::Idle),
        }
    }

    fn terminal_view(&self, terminal: TerminalState) -> PanelView {
        match terminal {
            TerminalState::Confirmed | TerminalState::Cancelled => {
                PanelView::new("Specialization Panel Closed")
                    .with_body("Specialization panel closed.")
            }
            TerminalState::TimedOut => PanelView::new("Session Expired")
                .with_body("Session expired - specialization panel closed."),
        }
    }
}
