//! Session engine - the generic interactive workflow driver.
//!
//! One loop serves every workflow: render the panel, race the next panel
//! event against the session deadline, gate the event to the owner, apply
//! the step transition, and re-render. The concrete workflows differ only
//! in their step logic, supplied through [`WorkflowSteps`].
//!
//! # Lifecycle
//!
//! On any terminal state (confirmed, cancelled, timed out) the engine
//! renders a final status message, then schedules deletion of the panel
//! after a short grace delay so the final message stays visible - 1 s for
//! explicit actions, 2 s for timeouts. Deletion is fire-and-forget and
//! failures are swallowed; teardown never blocks on it.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, error};

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::session::{Session, TerminalState};
use crate::ports::{ChatClient, PanelEvent, PanelView};

use super::{AccessGate, GateDecision, SessionTimer};

/// Grace delay before deleting the panel after an explicit Finish/Cancel or
/// a confirmed terminal step.
pub const EXPLICIT_GRACE: Duration = Duration::from_secs(1);

/// Grace delay before deleting the panel after a deadline expiry.
pub const TIMEOUT_GRACE: Duration = Duration::from_secs(2);

/// Outcome of handling one panel event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The action succeeded: re-render the panel and, under the per-step
    /// policy, restart the deadline window.
    Refresh,

    /// Nothing changed (cancelled sub-step, silent denial): keep waiting
    /// without re-rendering or touching the deadline.
    Idle,

    /// The session ended.
    Terminal(TerminalState),
}

/// Step logic of one workflow, driven by [`SessionEngine::run`].
#[async_trait]
pub trait WorkflowSteps: Send {
    /// Renders the panel for the current state.
    async fn render(&self) -> PanelView;

    /// Handles one owner-attributed panel event.
    ///
    /// Returning `Err` with [`ErrorCode::InvalidInput`] rejects the input:
    /// the engine sends the message as a transient notice, the step is not
    /// advanced, nothing is mutated, and the deadline is not reset.
    async fn on_event(&mut self, event: &PanelEvent) -> Result<StepOutcome, DomainError>;

    /// Renders the final status message for a terminal state.
    fn terminal_view(&self, terminal: TerminalState) -> PanelView;
}

/// The generic session driver.
pub struct SessionEngine {
    client: Arc<dyn ChatClient>,
    gate: AccessGate,
}

impl SessionEngine {
    pub fn new(client: Arc<dyn ChatClient>, gate: AccessGate) -> Self {
        Self { client, gate }
    }

    /// Runs a session to its terminal state.
    ///
    /// The deadline policy comes from the session: fixed-window deadlines
    /// are armed once, per-step deadlines restart after every successful
    /// action. Denied and invalid events never extend the window.
    pub async fn run(
        &self,
        mut session: Session,
        mut steps: impl WorkflowSteps,
    ) -> Result<TerminalState, DomainError> {
        let panel = self.client.render_panel(steps.render().await).await?;
        let window = session.policy().window();
        let mut deadline = Instant::now() + window;

        let terminal = loop {
            let event = match timeout_at(deadline, self.client.next_panel_event(&panel)).await {
                Err(_elapsed) => break TerminalState::TimedOut,
                Ok(Err(chat_err)) => {
                    // The panel is gone or the platform failed; tear down.
                    let _ = self.client.delete_panel(&panel).await;
                    return Err(chat_err.into());
                }
                Ok(Ok(event)) => event,
            };

            if let GateDecision::Denied(reason) = self.gate.allow_session_event(&session, &event) {
                if !reason.is_silent() {
                    let _ = self.client.notice(&event.actor, reason.user_message()).await;
                }
                continue;
            }

            match steps.on_event(&event).await {
                Ok(StepOutcome::Refresh) => {
                    self.client.update_panel(&panel, steps.render().await).await?;
                    if session.policy().resets_on_action() {
                        deadline = Instant::now() + window;
                    }
                }
                Ok(StepOutcome::Idle) => {}
                Ok(StepOutcome::Terminal(terminal)) => break terminal,
                Err(err) if err.code == ErrorCode::InvalidInput => {
                    let _ = self.client.notice(&event.actor, &err.message).await;
                }
                Err(err) => {
                    // Unexpected failure: log, tell the owner, keep the
                    // session (and every other live session) running.
                    error!(error = %err, session = %session.id(), "event handling failed");
                    let _ = self
                        .client
                        .notice(&event.actor, "An error occurred while processing this interaction.")
                        .await;
                }
            }
        };

        session.finish(terminal)?;
        let _ = self
            .client
            .update_panel(&panel, steps.terminal_view(terminal))
            .await;

        let grace = match terminal {
            TerminalState::TimedOut => TIMEOUT_GRACE,
            _ => EXPLICIT_GRACE,
        };
        let client = Arc::clone(&self.client);
        SessionTimer::arm(grace, move || async move {
            if let Err(e) = client.delete_panel(&panel).await {
                debug!(error = %e, "panel cleanup failed");
            }
        })
        .detach();

        Ok(terminal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::chat::ScriptedChatClient;
    use crate::domain::foundation::MemberId;
    use crate::domain::session::DeadlinePolicy;
    use crate::ports::{ButtonSpec, ButtonStyle};
    use tokio::time::{advance, sleep};

    fn owner() -> MemberId {
        MemberId::new("owner-1").unwrap()
    }

    fn session(policy: DeadlinePolicy) -> Session {
        Session::new(owner(), "Owner", policy)
    }

    /// Minimal steps: "poke" refreshes, "bad" rejects input, "cancel" and
    /// "finish" terminate.
    struct TestSteps {
        pokes: usize,
    }

    impl TestSteps {
        fn new() -> Self {
            Self { pokes: 0 }
        }
    }

    #[async_trait]
    impl WorkflowSteps for TestSteps {
        async fn render(&self) -> PanelView {
            PanelView::new(format!("panel-{}", self.pokes))
                .button(ButtonSpec::new("finish", "Finish", ButtonStyle::Success))
        }

        async fn on_event(&mut self, event: &PanelEvent) -> Result<StepOutcome, DomainError> {
            match &event.action {
                crate::ports::PanelAction::Button { id } if id == "poke" => {
                    self.pokes += 1;
                    Ok(StepOutcome::Refresh)
                }
                crate::ports::PanelAction::Button { id } if id == "bad" => {
                    Err(DomainError::invalid_input("Invalid input."))
                }
                crate::ports::PanelAction::Button { id } if id == "cancel" => {
                    Ok(StepOutcome::Terminal(TerminalState::Cancelled))
                }
                crate::ports::PanelAction::Button { id } if id == "finish" => {
                    Ok(StepOutcome::Terminal(TerminalState::Confirmed))
                }
                _ => Ok(StepOutcome::Idle),
            }
        }

        fn terminal_view(&self, terminal: TerminalState) -> PanelView {
            PanelView::new(format!("done-{}", terminal))
        }
    }

    fn engine(client: &Arc<ScriptedChatClient>) -> SessionEngine {
        SessionEngine::new(
            Arc::clone(client) as Arc<dyn ChatClient>,
            AccessGate::default(),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn finish_confirms_and_deletes_after_explicit_grace() {
        let client = Arc::new(ScriptedChatClient::new(vec![]));
        client.script_event(PanelEvent::button(owner(), "finish"));

        let terminal = engine(&client)
            .run(
                session(DeadlinePolicy::FixedWindow(Duration::from_secs(300))),
                TestSteps::new(),
            )
            .await
            .unwrap();
        assert_eq!(terminal, TerminalState::Confirmed);

        let panel = client.rendered_panels()[0];
        assert_eq!(client.last_view(&panel).unwrap().title, "done-confirmed");
        assert!(client.deleted_panels().is_empty());

        advance(EXPLICIT_GRACE + Duration::from_millis(100)).await;
        sleep(Duration::from_millis(1)).await;
        assert_eq!(client.deleted_panels(), vec![panel]);
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_expiry_times_out_and_deletes_after_timeout_grace() {
        let client = Arc::new(ScriptedChatClient::new(vec![]));

        let terminal = engine(&client)
            .run(
                session(DeadlinePolicy::FixedWindow(Duration::from_secs(300))),
                TestSteps::new(),
            )
            .await
            .unwrap();
        assert_eq!(terminal, TerminalState::TimedOut);

        let panel = client.rendered_panels()[0];
        assert_eq!(client.last_view(&panel).unwrap().title, "done-timed out");

        advance(Duration::from_secs(1)).await;
        sleep(Duration::from_millis(1)).await;
        assert!(client.deleted_panels().is_empty(), "timeout grace is 2s");

        advance(Duration::from_secs(2)).await;
        sleep(Duration::from_millis(1)).await;
        assert_eq!(client.deleted_panels(), vec![panel]);
    }

    #[tokio::test(start_paused = true)]
    async fn refresh_re_renders_panel() {
        let client = Arc::new(ScriptedChatClient::new(vec![]));
        client.script_event(PanelEvent::button(owner(), "poke"));
        client.script_event(PanelEvent::button(owner(), "poke"));
        client.script_event(PanelEvent::button(owner(), "finish"));

        engine(&client)
            .run(
                session(DeadlinePolicy::PerStep(Duration::from_secs(300))),
                TestSteps::new(),
            )
            .await
            .unwrap();

        let panel = client.rendered_panels()[0];
        let history = client.panel_history(&panel);
        // initial render, two refreshes, terminal view
        assert_eq!(history.len(), 4);
        assert_eq!(history[1].title, "panel-1");
        assert_eq!(history[2].title, "panel-2");
    }

    #[tokio::test(start_paused = true)]
    async fn non_owner_event_is_denied_and_session_continues() {
        let client = Arc::new(ScriptedChatClient::new(vec![]));
        let intruder = MemberId::new("intruder").unwrap();
        client.script_event(PanelEvent::button(intruder.clone(), "finish"));
        client.script_event(PanelEvent::button(owner(), "finish"));

        let terminal = engine(&client)
            .run(
                session(DeadlinePolicy::FixedWindow(Duration::from_secs(300))),
                TestSteps::new(),
            )
            .await
            .unwrap();

        assert_eq!(terminal, TerminalState::Confirmed);
        let notices = client.notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].0, intruder);
        assert!(notices[0].1.contains("command executor"));
    }

    #[tokio::test(start_paused = true)]
    async fn invalid_input_notifies_without_advancing() {
        let client = Arc::new(ScriptedChatClient::new(vec![]));
        client.script_event(PanelEvent::button(owner(), "bad"));
        client.script_event(PanelEvent::button(owner(), "cancel"));

        let terminal = engine(&client)
            .run(
                session(DeadlinePolicy::FixedWindow(Duration::from_secs(300))),
                TestSteps::new(),
            )
            .await
            .unwrap();

        assert_eq!(terminal, TerminalState::Cancelled);
        let notices = client.notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].1, "Invalid input.");

        // No refresh happened for the rejected input.
        let panel = client.rendered_panels()[0];
        let history = client.panel_history(&panel);
        assert_eq!(history.len(), 2); // initial render + terminal view
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_renders_cancelled_status() {
        let client = Arc::new(ScriptedChatClient::new(vec![]));
        client.script_event(PanelEvent::button(owner(), "cancel"));

        let terminal = engine(&client)
            .run(
                session(DeadlinePolicy::FixedWindow(Duration::from_secs(300))),
                TestSteps::new(),
            )
            .await
            .unwrap();

        assert_eq!(terminal, TerminalState::Cancelled);
        let panel = client.rendered_panels()[0];
        assert_eq!(client.last_view(&panel).unwrap().title, "done-cancelled");
    }
}
