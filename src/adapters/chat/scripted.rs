//! Scripted chat client - in-memory ChatClient for tests.
//!
//! Prompt replies and panel events are scripted ahead of a workflow run and
//! consumed in order; everything the core sends back (panels, notices, role
//! assignments, deletions) is recorded for assertions.
//!
//! Panel events live in one global queue regardless of panel id, matching
//! the strictly sequential way the workflows await them. When the event
//! queue runs dry, `next_panel_event` pends forever - under a paused tokio
//! clock that lets the engine's deadline fire deterministically.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::foundation::{MemberId, PanelId};
use crate::domain::roster::RosterEntry;
use crate::ports::{
    ChatClient, ChatError, ChoicePrompt, ChoiceReply, FormPrompt, PanelEvent, PanelView,
    TextPrompt,
};

/// Scripted, recording ChatClient.
#[derive(Default)]
pub struct ScriptedChatClient {
    roster: Vec<RosterEntry>,
    text_replies: Mutex<VecDeque<Option<String>>>,
    form_replies: Mutex<VecDeque<Option<Vec<String>>>>,
    choice_replies: Mutex<VecDeque<Option<ChoiceReply>>>,
    panel_events: Mutex<VecDeque<PanelEvent>>,
    panels: Mutex<Vec<(PanelId, Vec<PanelView>)>>,
    deleted: Mutex<Vec<PanelId>>,
    notices: Mutex<Vec<(MemberId, String)>>,
    roles: Mutex<Vec<(MemberId, String)>>,
}

impl ScriptedChatClient {
    /// Creates a client over a fixed roster.
    pub fn new(roster: Vec<RosterEntry>) -> Self {
        Self {
            roster,
            ..Self::default()
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Scripting
    // ───────────────────────────────────────────────────────────────

    /// Queues a text prompt reply; `None` scripts a no-response timeout.
    pub fn script_text(&self, reply: Option<&str>) {
        self.text_replies
            .lock()
            .unwrap()
            .push_back(reply.map(str::to_string));
    }

    /// Queues a form prompt reply; `None` scripts a no-response timeout.
    pub fn script_form(&self, reply: Option<Vec<&str>>) {
        self.form_replies
            .lock()
            .unwrap()
            .push_back(reply.map(|fields| fields.into_iter().map(str::to_string).collect()));
    }

    /// Queues a choice prompt reply; `None` scripts a no-response timeout.
    pub fn script_choice(&self, reply: Option<ChoiceReply>) {
        self.choice_replies.lock().unwrap().push_back(reply);
    }

    /// Queues the next panel event.
    pub fn script_event(&self, event: PanelEvent) {
        self.panel_events.lock().unwrap().push_back(event);
    }

    // ───────────────────────────────────────────────────────────────
    // Recorded output
    // ───────────────────────────────────────────────────────────────

    /// Panels rendered so far, in order.
    pub fn rendered_panels(&self) -> Vec<PanelId> {
        self.panels.lock().unwrap().iter().map(|(id, _)| *id).collect()
    }

    /// The latest view of a panel, if it was ever rendered.
    pub fn last_view(&self, panel: &PanelId) -> Option<PanelView> {
        self.panels
            .lock()
            .unwrap()
            .iter()
            .find(|(id, _)| id == panel)
            .and_then(|(_, history)| history.last().cloned())
    }

    /// Full render/update history of a panel.
    pub fn panel_history(&self, panel: &PanelId) -> Vec<PanelView> {
        self.panels
            .lock()
            .unwrap()
            .iter()
            .find(|(id, _)| id == panel)
            .map(|(_, history)| history.clone())
            .unwrap_or_default()
    }

    /// Panels deleted so far.
    pub fn deleted_panels(&self) -> Vec<PanelId> {
        self.deleted.lock().unwrap().clone()
    }

    /// Transient notices sent so far.
    pub fn notices(&self) -> Vec<(MemberId, String)> {
        self.notices.lock().unwrap().clone()
    }

    /// Role assignments performed so far.
    pub fn assigned_roles(&self) -> Vec<(MemberId, String)> {
        self.roles.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatClient for ScriptedChatClient {
    async fn roster(&self) -> Result<Vec<RosterEntry>, ChatError> {
        Ok(self.roster.clone())
    }

    async fn prompt_text(
        &self,
        _user: &MemberId,
        _prompt: TextPrompt,
        _timeout: Duration,
    ) -> Result<Option<String>, ChatError> {
        Ok(self.text_replies.lock().unwrap().pop_front().flatten())
    }

    async fn prompt_form(
        &self,
        _user: &MemberId,
        _prompt: FormPrompt,
        _timeout: Duration,
    ) -> Result<Option<Vec<String>>, ChatError> {
        Ok(self.form_replies.lock().unwrap().pop_front().flatten())
    }

    async fn prompt_choice(
        &self,
        _user: &MemberId,
        _prompt: ChoicePrompt,
        _timeout: Duration,
    ) -> Result<Option<ChoiceReply>, ChatError> {
        Ok(self.choice_replies.lock().unwrap().pop_front().flatten())
    }

    async fn render_panel(&self, view: PanelView) -> Result<PanelId, ChatError> {
        let id = PanelId::new();
        self.panels.lock().unwrap().push((id, vec![view]));
        Ok(id)
    }

    async fn update_panel(&self, panel: &PanelId, view: PanelView) -> Result<(), ChatError> {
        let mut panels = self.panels.lock().unwrap();
        match panels.iter_mut().find(|(id, _)| id == panel) {
            Some((_, history)) => {
                history.push(view);
                Ok(())
            }
            None => Err(ChatError::panel_not_found(panel)),
        }
    }

    async fn delete_panel(&self, panel: &PanelId) -> Result<(), ChatError> {
        self.deleted.lock().unwrap().push(*panel);
        Ok(())
    }

    async fn next_panel_event(&self, _panel: &PanelId) -> Result<PanelEvent, ChatError> {
        let next = self.panel_events.lock().unwrap().pop_front();
        match next {
            Some(event) => Ok(event),
            // Out of scripted events: pend so the caller's deadline decides.
            None => std::future::pending().await,
        }
    }

    async fn notice(&self, user: &MemberId, text: &str) -> Result<(), ChatError> {
        self.notices
            .lock()
            .unwrap()
            .push((user.clone(), text.to_string()));
        Ok(())
    }

    async fn assign_role(&self, member: &MemberId, role_name: &str) -> Result<(), ChatError> {
        self.roles
            .lock()
            .unwrap()
            .push((member.clone(), role_name.to_string()));
        Ok(())
    }
}
