//! Chat platform client port.
//!
//! This port is the entire surface the core consumes from the host chat
//! platform: roster enumeration, prompt/response primitives with declared
//! timeouts, a render/update/delete primitive for the session's persistent
//! panel, transient notices, and best-effort role assignment.
//!
//! # Design
//!
//! Prompt primitives own their wait: they return `Ok(None)` when the user
//! gives no response within the declared timeout. The session panel's event
//! stream is different - `next_panel_event` pends until the next interaction
//! arrives, and the engine races it against the session deadline.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, MemberId, PanelId};
use crate::domain::roster::RosterEntry;

/// Errors raised by the chat platform.
#[derive(Debug, Clone, Error)]
pub enum ChatError {
    /// The platform could not be reached or answered with a failure.
    #[error("Chat platform failure: {reason}")]
    Platform { reason: String },

    /// A message or panel could not be delivered or edited.
    #[error("Delivery failed: {reason}")]
    Delivery { reason: String },

    /// The referenced panel no longer exists.
    #[error("Panel {panel} not found")]
    PanelNotFound { panel: String },
}

impl ChatError {
    /// Creates a platform failure.
    pub fn platform(reason: impl Into<String>) -> Self {
        ChatError::Platform {
            reason: reason.into(),
        }
    }

    /// Creates a delivery failure.
    pub fn delivery(reason: impl Into<String>) -> Self {
        ChatError::Delivery {
            reason: reason.into(),
        }
    }

    /// Creates a panel-not-found failure.
    pub fn panel_not_found(panel: &PanelId) -> Self {
        ChatError::PanelNotFound {
            panel: panel.to_string(),
        }
    }
}

impl From<ChatError> for DomainError {
    fn from(err: ChatError) -> Self {
        DomainError::new(ErrorCode::ChatPlatformError, err.to_string())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// View model
// ─────────────────────────────────────────────────────────────────────────────

/// Visual weight of a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonStyle {
    Primary,
    Secondary,
    Success,
    Danger,
}

/// One button on a panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonSpec {
    pub id: String,
    pub label: String,
    pub style: ButtonStyle,
    pub enabled: bool,
}

impl ButtonSpec {
    pub fn new(id: impl Into<String>, label: impl Into<String>, style: ButtonStyle) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            style,
            enabled: true,
        }
    }

    /// Renders the button greyed out.
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// One option in a selection menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub description: String,
    pub selected: bool,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            description: String::new(),
            selected: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Marks the option as pre-selected.
    pub fn preselected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

/// A selection menu attached to a panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectMenu {
    pub id: String,
    pub placeholder: String,
    pub multi: bool,
    pub options: Vec<SelectOption>,
}

impl SelectMenu {
    pub fn single(id: impl Into<String>, placeholder: impl Into<String>, options: Vec<SelectOption>) -> Self {
        Self {
            id: id.into(),
            placeholder: placeholder.into(),
            multi: false,
            options,
        }
    }

    pub fn multi(id: impl Into<String>, placeholder: impl Into<String>, options: Vec<SelectOption>) -> Self {
        Self {
            id: id.into(),
            placeholder: placeholder.into(),
            multi: true,
            options,
        }
    }
}

/// A named field on a panel body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelField {
    pub name: String,
    pub value: String,
}

/// Platform-neutral description of the session's persistent message.
///
/// Rendering the same domain state must produce an equal `PanelView`; the
/// engine compares nothing, but tests rely on the equality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelView {
    pub title: String,
    pub body: String,
    pub fields: Vec<PanelField>,
    pub selects: Vec<SelectMenu>,
    pub buttons: Vec<ButtonSpec>,
}

impl PanelView {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: String::new(),
            fields: Vec::new(),
            selects: Vec::new(),
            buttons: Vec::new(),
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(PanelField {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn select(mut self, menu: SelectMenu) -> Self {
        self.selects.push(menu);
        self
    }

    pub fn button(mut self, button: ButtonSpec) -> Self {
        self.buttons.push(button);
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Prompts
// ─────────────────────────────────────────────────────────────────────────────

/// A single short-text or paragraph input prompt (one modal field).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextPrompt {
    pub title: String,
    pub label: String,
    pub placeholder: String,
    pub paragraph: bool,
}

impl TextPrompt {
    pub fn short(title: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            label: label.into(),
            placeholder: String::new(),
            paragraph: false,
        }
    }

    pub fn paragraph(title: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            label: label.into(),
            placeholder: String::new(),
            paragraph: true,
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }
}

/// One field of a multi-field form prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextField {
    pub id: String,
    pub label: String,
    pub paragraph: bool,
    pub required: bool,
}

impl TextField {
    pub fn short(id: impl Into<String>, label: impl Into<String>, required: bool) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            paragraph: false,
            required,
        }
    }

    pub fn paragraph(id: impl Into<String>, label: impl Into<String>, required: bool) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            paragraph: true,
            required,
        }
    }
}

/// A multi-field form prompt (a modal with several inputs).
///
/// A reply carries one string per field, in field order; optional fields
/// reply with an empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPrompt {
    pub title: String,
    pub fields: Vec<TextField>,
}

impl FormPrompt {
    pub fn new(title: impl Into<String>, fields: Vec<TextField>) -> Self {
        Self {
            title: title.into(),
            fields,
        }
    }
}

/// A single- or multi-choice prompt with an optional cancel affordance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoicePrompt {
    pub prompt: String,
    pub options: Vec<SelectOption>,
    pub multi: bool,
    pub cancellable: bool,
}

impl ChoicePrompt {
    pub fn single(prompt: impl Into<String>, options: Vec<SelectOption>) -> Self {
        Self {
            prompt: prompt.into(),
            options,
            multi: false,
            cancellable: false,
        }
    }

    pub fn multi(prompt: impl Into<String>, options: Vec<SelectOption>) -> Self {
        Self {
            prompt: prompt.into(),
            options,
            multi: true,
            cancellable: false,
        }
    }

    pub fn cancellable(mut self) -> Self {
        self.cancellable = true;
        self
    }
}

/// The user's answer to a choice prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChoiceReply {
    /// The selected option values.
    Selected(Vec<String>),

    /// The user pressed the cancel affordance.
    Cancelled,
}

// ─────────────────────────────────────────────────────────────────────────────
// Panel events
// ─────────────────────────────────────────────────────────────────────────────

/// An interaction delivered to a panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelAction {
    /// A button press.
    Button { id: String },

    /// A selection-menu pick.
    Select { id: String, values: Vec<String> },
}

/// One event on a session panel, attributed to the interacting user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelEvent {
    pub actor: MemberId,
    pub action: PanelAction,
}

impl PanelEvent {
    /// Convenience constructor for a button press.
    pub fn button(actor: MemberId, id: impl Into<String>) -> Self {
        Self {
            actor,
            action: PanelAction::Button { id: id.into() },
        }
    }

    /// Convenience constructor for a selection.
    pub fn select(actor: MemberId, id: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            actor,
            action: PanelAction::Select {
                id: id.into(),
                values,
            },
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Port
// ─────────────────────────────────────────────────────────────────────────────

/// Port for everything the core needs from the chat platform.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Enumerates the server roster.
    async fn roster(&self) -> Result<Vec<RosterEntry>, ChatError>;

    /// Shows a single-input modal and waits up to `timeout` for the reply.
    /// `Ok(None)` means no response.
    async fn prompt_text(
        &self,
        user: &MemberId,
        prompt: TextPrompt,
        timeout: Duration,
    ) -> Result<Option<String>, ChatError>;

    /// Shows a multi-field modal and waits up to `timeout` for the reply.
    /// `Ok(None)` means no response.
    async fn prompt_form(
        &self,
        user: &MemberId,
        prompt: FormPrompt,
        timeout: Duration,
    ) -> Result<Option<Vec<String>>, ChatError>;

    /// Shows a choice prompt and waits up to `timeout`. `Ok(None)` means no
    /// response.
    async fn prompt_choice(
        &self,
        user: &MemberId,
        prompt: ChoicePrompt,
        timeout: Duration,
    ) -> Result<Option<ChoiceReply>, ChatError>;

    /// Renders a new session panel and returns its handle.
    async fn render_panel(&self, view: PanelView) -> Result<PanelId, ChatError>;

    /// Replaces a panel's content.
    async fn update_panel(&self, panel: &PanelId, view: PanelView) -> Result<(), ChatError>;

    /// Deletes a panel. Callers treat failures as best-effort.
    async fn delete_panel(&self, panel: &PanelId) -> Result<(), ChatError>;

    /// Waits for the next interaction on a panel. Pends until one arrives;
    /// the caller owns any deadline.
    async fn next_panel_event(&self, panel: &PanelId) -> Result<PanelEvent, ChatError>;

    /// Sends a transient notice to a user.
    async fn notice(&self, user: &MemberId, text: &str) -> Result<(), ChatError>;

    /// Assigns a named role to a member. Best-effort on confirmation paths.
    async fn assign_role(&self, member: &MemberId, role_name: &str) -> Result<(), ChatError>;
}
