//! Self-service dossier view.
//!
//! A member privately views their own dossier. No record on file produces a
//! notice pointing at a command officer; otherwise the panel shows rank and
//! specializations with a Close button. Read-only; the engine's owner check
//! keeps anyone else from closing it.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::dossier::DossierRecord;
use crate::domain::foundation::DomainError;
use crate::domain::session::{DeadlinePolicy, Session, TerminalState};
use crate::ports::{
    ButtonSpec, ButtonStyle, CatalogRepository, ChatClient, DossierRepository, PanelAction,
    PanelEvent, PanelView,
};

use crate::application::engine::{AccessGate, SessionEngine, StepOutcome, WorkflowSteps};

use super::views::dossier_view;
use super::DispatchContext;

/// Fixed panel window.
pub const PANEL_WINDOW: Duration = Duration::from_secs(300);

/// Self-service dossier view entry point. Open to every member; no admin
/// gate.
pub struct ViewDossierWorkflow {
    client: Arc<dyn ChatClient>,
    dossiers: Arc<dyn DossierRepository>,
    catalog: Arc<dyn CatalogRepository>,
    gate: AccessGate,
}

impl ViewDossierWorkflow {
    pub fn new(
        client: Arc<dyn ChatClient>,
        dossiers: Arc<dyn DossierRepository>,
        catalog: Arc<dyn CatalogRepository>,
        gate: AccessGate,
    ) -> Self {
        Self {
            client,
            dossiers,
            catalog,
            gate,
        }
    }

    /// Runs the workflow for one dispatch; the viewer is always the target.
    pub async fn run(&self, ctx: DispatchContext) -> Result<(), DomainError> {
        let record = match self.dossiers.get(&ctx.actor).await.map_err(DomainError::from)? {
            Some(record) => record,
            None => {
                self.client
                    .notice(
                        &ctx.actor,
                        &format!(
                            "No dossier found for **{}**.\nPlease contact a Command Officer for onboarding.",
                            ctx.actor_display
                        ),
                    )
                    .await?;
                return Ok(());
            }
        };

        let session = Session::new(
            ctx.actor.clone(),
            ctx.actor_display.clone(),
            DeadlinePolicy::FixedWindow(PANEL_WINDOW),
        );

        let steps = ViewDossierSteps {
            catalog: Arc::clone(&self.catalog),
            record,
        };

        SessionEngine::new(Arc::clone(&self.client), self.gate.clone())
            .run(session, steps)
            .await?;
        Ok(())
    }
}

struct ViewDossierSteps {
    catalog: Arc<dyn CatalogRepository>,
    record: DossierRecord,
}

#[async_trait]
impl WorkflowSteps for ViewDossierSteps {
    async fn render(&self) -> PanelView {
        let catalog = self.catalog.all().await.unwrap_or_default();
        dossier_view(&self.record, &catalog)
            .button(ButtonSpec::new("close", "Close", ButtonStyle::Danger))
    }

    async fn on_event(&mut self, event: &PanelEvent) -> Result<StepOutcome, DomainError> {
        match &event.action {
            PanelAction::Button { id } if id == "close" => {
                Ok(StepOutcome::Terminal(TerminalState::Confirmed))
            }
            _ => Ok(StepOutcome::Idle),
        }
    }

    fn terminal_view(&self, terminal: TerminalState) -> PanelView {
        match terminal {
            TerminalState::Confirmed | TerminalState::Cancelled => {
                PanelView::new("Dossier Closed").with_body("Dossier view closed.")
            }
            TerminalState::TimedOut => {
                PanelView::new("Session Expired").with_body("Dossier view closed.")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::chat::ScriptedChatClient;
    use crate::domain::catalog::SpecializationDefinition;
    use crate::domain::foundation::MemberId;
    use crate::ports::StorageError;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    struct InMemoryDossierRepo {
        records: Mutex<BTreeMap<MemberId, DossierRecord>>,
    }

    #[async_trait]
    impl DossierRepository for InMemoryDossierRepo {
        async fn get(&self, member_id: &MemberId) -> Result<Option<DossierRecord>, StorageError> {
            Ok(self.records.lock().unwrap().get(member_id).cloned())
        }

        async fn contains(&self, member_id: &MemberId) -> Result<bool, StorageError> {
            Ok(self.records.lock().unwrap().contains_key(member_id))
        }

        async fn upsert_and_save(&self, record: DossierRecord) -> Result<(), StorageError> {
            self.records
                .lock()
                .unwrap()
                .insert(record.member_id().clone(), record);
            Ok(())
        }

        async fn count(&self) -> Result<usize, StorageError> {
            Ok(self.records.lock().unwrap().len())
        }
    }

    struct EmptyCatalogRepo;

    #[async_trait]
    impl CatalogRepository for EmptyCatalogRepo {
        async fn all(
            &self,
        ) -> Result<BTreeMap<String, SpecializationDefinition>, StorageError> {
            Ok(BTreeMap::new())
        }

        async fn get(
            &self,
            _code: &str,
        ) -> Result<Option<SpecializationDefinition>, StorageError> {
            Ok(None)
        }

        async fn upsert_and_save(
            &self,
            _code: &str,
            _definition: SpecializationDefinition,
        ) -> Result<(), StorageError> {
            Ok(())
        }

        async fn remove_and_save(&self, _code: &str) -> Result<bool, StorageError> {
            Ok(false)
        }
    }

    fn member(id: &str) -> MemberId {
        MemberId::new(id).unwrap()
    }

    fn workflow(client: &Arc<ScriptedChatClient>, records: Vec<DossierRecord>) -> ViewDossierWorkflow {
        let repo = InMemoryDossierRepo {
            records: Mutex::new(
                records
                    .into_iter()
                    .map(|r| (r.member_id().clone(), r))
                    .collect(),
            ),
        };
        ViewDossierWorkflow::new(
            Arc::clone(client) as Arc<dyn ChatClient>,
            Arc::new(repo) as Arc<dyn DossierRepository>,
            Arc::new(EmptyCatalogRepo) as Arc<dyn CatalogRepository>,
            AccessGate::default(),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn missing_record_produces_onboarding_notice() {
        let client = Arc::new(ScriptedChatClient::new(vec![]));
        let workflow = workflow(&client, vec![]);

        workflow
            .run(DispatchContext::direct(member("100"), "Thomas Picklini"))
            .await
            .unwrap();

        assert!(client.notices()[0].1.contains("No dossier found"));
        assert!(client.rendered_panels().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn close_button_ends_the_view() {
        let client = Arc::new(ScriptedChatClient::new(vec![]));
        let record = DossierRecord::onboarded(
            member("100"),
            "thomasp",
            "Thomas Picklini",
            "E-1 | Recruit",
            "HQ",
        );
        let workflow = workflow(&client, vec![record]);
        client.script_event(PanelEvent::button(member("100"), "close"));

        workflow
            .run(DispatchContext::direct(member("100"), "Thomas Picklini"))
            .await
            .unwrap();

        let panel = client.rendered_panels()[0];
        let first = &client.panel_history(&panel)[0];
        assert_eq!(first.title, "Dossier: Thomas Picklini");
        assert_eq!(first.fields[0].value, "E-1 | Recruit");
    }

    #[tokio::test(start_paused = true)]
    async fn someone_else_cannot_close_the_view() {
        let client = Arc::new(ScriptedChatClient::new(vec![]));
        let record = DossierRecord::onboarded(
            member("100"),
            "thomasp",
            "Thomas Picklini",
            "E-1 | Recruit",
            "HQ",
        );
        let workflow = workflow(&client, vec![record]);
        client.script_event(PanelEvent::button(member("intruder"), "close"));
        client.script_event(PanelEvent::button(member("100"), "close"));

        workflow
            .run(DispatchContext::direct(member("100"), "Thomas Picklini"))
            .await
            .unwrap();

        assert_eq!(client.notices().len(), 1);
        assert_eq!(client.notices()[0].0, member("intruder"));
    }
}
