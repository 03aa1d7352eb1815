//! Read-only specialization browser.
//!
//! Overview list with a selection menu; picking a code shows its
//! description with SOP / Radio / Terms section buttons, plus Training for
//! platform administrators, and back navigation. Fixed 300 s window, no
//! writes.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::catalog::SectionKind;
use crate::domain::foundation::DomainError;
use crate::domain::session::{DeadlinePolicy, Session, TerminalState};
use crate::ports::{
    ButtonSpec, ButtonStyle, CatalogRepository, ChatClient, PanelAction, PanelEvent, PanelView,
    SelectMenu, SelectOption,
};

use crate::application::engine::{AccessGate, SessionEngine, StepOutcome, WorkflowSteps};

use super::DispatchContext;

/// Fixed panel window.
pub const PANEL_WINDOW: Duration = Duration::from_secs(300);

/// Catalog browsing entry point. Open to every member; the training section
/// renders only for platform administrators.
pub struct BrowseCatalogWorkflow {
    client: Arc<dyn ChatClient>,
    catalog: Arc<dyn CatalogRepository>,
    gate: AccessGate,
}

impl BrowseCatalogWorkflow {
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

    /// Runs the browser for one dispatch.
    pub async fn run(&self, ctx: DispatchContext) -> Result<(), DomainError> {
        let session = Session::new(
            ctx.actor.clone(),
            ctx.actor_display.clone(),
            DeadlinePolicy::FixedWindow(PANEL_WINDOW),
        );

        let steps = BrowseSteps {
            catalog: Arc::clone(&self.catalog),
            is_admin: ctx.is_admin,
            view: BrowseView::Overview,
        };

        SessionEngine::new(Arc::clone(&self.client), self.gate.clone())
            .run(session, steps)
            .await?;
        Ok(())
    }
}

/// Navigation state of the browser.
enum BrowseView {
    Overview,
    Detail(String),
    Section(String, SectionKind),
}

struct BrowseSteps {
    catalog: Arc<dyn CatalogRepository>,
    is_admin: bool,
    view: BrowseView,
}

impl BrowseSteps {
    fn section_from_button(&self, id: &str) -> Option<SectionKind> {
        match id {
            "sop" => Some(SectionKind::Sop),
            "radio" => Some(SectionKind::Radio),
            "terms" => Some(SectionKind::Terms),
            // Training stays admin-only; everyone else's press is ignored.
            "training" if self.is_admin => Some(SectionKind::Training),
            _ => None,
        }
    }
}

#[async_trait]
impl WorkflowSteps for BrowseSteps {
    async fn render(&self) -> PanelView {
        let catalog = self.catalog.all().await.unwrap_or_default();

        match &self.view {
            BrowseView::Overview => {
                let listing = if catalog.is_empty() {
                    "_No specializations on file._".to_string()
                } else {
                    catalog
                        .iter()
                        .map(|(code, def)| format!("• **{}** ({})", def.name, code.to_uppercase()))
                        .collect::<Vec<_>>()
                        .join("\n")
                };
                let options = catalog
                    .iter()
                    .map(|(code, def)| {
                        let description = if def.description.is_empty() {
                            "No description available".to_string()
                        } else {
                            def.description.chars().take(90).collect()
                        };
                        SelectOption::new(code, &def.name).with_description(description)
                    })
                    .collect();

                PanelView::new("Specializations Overview")
                    .with_body(format!(
                        "{}\n\nSelect one below to view detailed information.",
                        listing
                    ))
                    .select(SelectMenu::single(
                        "spec_select",
                        "Select a specialization...",
                        options,
                    ))
            }
            BrowseView::Detail(code) => match catalog.get(code) {
                Some(def) => {
                    let description = if def.description.trim().is_empty() {
                        "_No description available._".to_string()
                    } else {
                        def.description.clone()
                    };
                    let mut view = PanelView::new(&def.name)
                        .with_body(description)
                        .field("Specialization Code", code.to_uppercase())
                        .button(ButtonSpec::new("sop", "SOP", ButtonStyle::Primary))
                        .button(ButtonSpec::new("radio", "Radio Information", ButtonStyle::Secondary))
                        .button(ButtonSpec::new("terms", "Common Terms", ButtonStyle::Secondary));
                    if self.is_admin {
                        view = view.button(ButtonSpec::new("training", "Training", ButtonStyle::Success));
                    }
                    view.button(ButtonSpec::new("back_list", "Back to List", ButtonStyle::Danger))
                }
                None => PanelView::new("Specialization Removed")
                    .with_body("_This specialization no longer exists._")
                    .button(ButtonSpec::new("back_list", "Back to List", ButtonStyle::Danger)),
            },
            BrowseView::Section(code, kind) => {
                let (name, text) = match catalog.get(code) {
                    Some(def) => (
                        def.name.clone(),
                        def.section(*kind)
                            .map(str::to_string)
                            .unwrap_or_else(|| "_No data available._".to_string()),
                    ),
                    None => (code.clone(), "_No data available._".to_string()),
                };
                PanelView::new(format!("{} - {}", kind.title(), name))
                    .with_body(text)
                    .button(ButtonSpec::new("back_spec", "Back", ButtonStyle::Danger))
            }
        }
    }

    async fn on_event(&mut self, event: &PanelEvent) -> Result<StepOutcome, DomainError> {
        match &event.action {
            PanelAction::Select { id, values } if id == "spec_select" => {
                match values.first() {
                    Some(code) => {
                        self.view = BrowseView::Detail(code.clone());
                        Ok(StepOutcome::Refresh)
                    }
                    None => Ok(StepOutcome::Idle),
                }
            }
            PanelAction::Button { id } if id == "back_list" => {
                self.view = BrowseView::Overview;
                Ok(StepOutcome::Refresh)
            }
            PanelAction::Button { id } if id == "back_spec" => {
                if let BrowseView::Section(code, _) = &self.view {
                    self.view = BrowseView::Detail(code.clone());
                    return Ok(StepOutcome::Refresh);
                }
                Ok(StepOutcome::Idle)
            }
            PanelAction::Button { id } => {
                let Some(kind) = self.section_from_button(id) else {
                    return Ok(StepOutcome::Idle);
                };
                if let BrowseView::Detail(code) = &self.view {
                    self.view = BrowseView::Section(code.clone(), kind);
                    return Ok(StepOutcome::Refresh);
                }
                Ok(StepOutcome::Idle)
            }
            _ => Ok(StepOutcome::Idle),
        }
    }

    fn terminal_view(&self, _terminal: TerminalState) -> PanelView {
        PanelView::new("Specialization Index Closed")
            .with_body("Specialization index closed.")
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

    struct InMemoryCatalogRepo {
        entries: Mutex<BTreeMap<String, SpecializationDefinition>>,
    }

    impl InMemoryCatalogRepo {
        fn with_medic() -> Self {
            let mut entries = BTreeMap::new();
            entries.insert(
                "32m".to_string(),
                SpecializationDefinition::new("Medic", "Field medicine")
                    .unwrap()
                    .with_sections("Stabilize first", "", "", "Two-week course"),
            );
            Self {
                entries: Mutex::new(entries),
            }
        }
    }

    #[async_trait]
    impl CatalogRepository for InMemoryCatalogRepo {
        async fn all(
            &self,
        ) -> Result<BTreeMap<String, SpecializationDefinition>, StorageError> {
            Ok(self.entries.lock().unwrap().clone())
        }

        async fn get(
            &self,
            code: &str,
        ) -> Result<Option<SpecializationDefinition>, StorageError> {
            Ok(self.entries.lock().unwrap().get(code).cloned())
        }

        async fn upsert_and_save(
            &self,
            code: &str,
            definition: SpecializationDefinition,
        ) -> Result<(), StorageError> {
            self.entries
                .lock()
                .unwrap()
                .insert(code.to_string(), definition);
            Ok(())
        }

        async fn remove_and_save(&self, code: &str) -> Result<bool, StorageError> {
            Ok(self.entries.lock().unwrap().remove(code).is_some())
        }
    }

    fn member(id: &str) -> MemberId {
        MemberId::new(id).unwrap()
    }

    fn workflow(client: &Arc<ScriptedChatClient>) -> BrowseCatalogWorkflow {
        BrowseCatalogWorkflow::new(
            Arc::clone(client) as Arc<dyn ChatClient>,
            Arc::new(InMemoryCatalogRepo::with_medic()) as Arc<dyn CatalogRepository>,
            AccessGate::default(),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn selecting_a_code_shows_its_detail() {
        let client = Arc::new(ScriptedChatClient::new(vec![]));
        client.script_event(PanelEvent::select(
            member("u1"),
            "spec_select",
            vec!["32m".to_string()],
        ));

        workflow(&client)
            .run(DispatchContext::direct(member("u1"), "User One"))
            .await
            .unwrap();

        let panel = client.rendered_panels()[0];
        let history = client.panel_history(&panel);
        assert_eq!(history[0].title, "Specializations Overview");
        assert_eq!(history[1].title, "Medic");
        assert_eq!(history[1].fields[0].value, "32M");
    }

    #[tokio::test(start_paused = true)]
    async fn section_navigation_round_trips() {
        let client = Arc::new(ScriptedChatClient::new(vec![]));
        client.script_event(PanelEvent::select(
            member("u1"),
            "spec_select",
            vec!["32m".to_string()],
        ));
        client.script_event(PanelEvent::button(member("u1"), "sop"));
        client.script_event(PanelEvent::button(member("u1"), "back_spec"));
        client.script_event(PanelEvent::button(member("u1"), "back_list"));

        workflow(&client)
            .run(DispatchContext::direct(member("u1"), "User One"))
            .await
            .unwrap();

        let panel = client.rendered_panels()[0];
        let history = client.panel_history(&panel);
        assert_eq!(history[2].title, "SOP - Medic");
        assert_eq!(history[2].body, "Stabilize first");
        assert_eq!(history[3].title, "Medic");
        assert_eq!(history[4].title, "Specializations Overview");
    }

    #[tokio::test(start_paused = true)]
    async fn training_button_renders_only_for_admins() {
        let client = Arc::new(ScriptedChatClient::new(vec![]));
        client.script_event(PanelEvent::select(
            member("u1"),
            "spec_select",
            vec!["32m".to_string()],
        ));

        workflow(&client)
            .run(DispatchContext::direct(member("u1"), "User One"))
            .await
            .unwrap();

        let panel = client.rendered_panels()[0];
        let detail = &client.panel_history(&panel)[1];
        assert!(!detail.buttons.iter().any(|b| b.id == "training"));
    }

    #[tokio::test(start_paused = true)]
    async fn training_press_is_ignored_for_non_admins() {
        let client = Arc::new(ScriptedChatClient::new(vec![]));
        client.script_event(PanelEvent::select(
            member("u1"),
            "spec_select",
            vec!["32m".to_string()],
        ));
        client.script_event(PanelEvent::button(member("u1"), "training"));

        workflow(&client)
            .run(DispatchContext::direct(member("u1"), "User One"))
            .await
            .unwrap();

        let panel = client.rendered_panels()[0];
        // Only overview, detail, and the terminal view: no training section.
        let history = client.panel_history(&panel);
        assert_eq!(history.len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn training_section_opens_for_admins() {
        let client = Arc::new(ScriptedChatClient::new(vec![]));
        client.script_event(PanelEvent::select(
            member("u1"),
            "spec_select",
            vec!["32m".to_string()],
        ));
        client.script_event(PanelEvent::button(member("u1"), "training"));

        workflow(&client)
            .run(DispatchContext::direct(member("u1"), "User One").as_admin())
            .await
            .unwrap();

        let panel = client.rendered_panels()[0];
        let history = client.panel_history(&panel);
        assert_eq!(history[2].title, "Training - Medic");
        assert_eq!(history[2].body, "Two-week course");
    }
}
