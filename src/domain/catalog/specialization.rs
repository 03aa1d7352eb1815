//! Specialization catalog entry.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Normalizes a specialization code: lowercase, trimmed.
///
/// Codes are the catalog's map keys; normalization keeps the uniqueness
/// invariant case-insensitive.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_lowercase()
}

/// The optional free-text sections of a specialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Sop,
    Radio,
    Terms,
    Training,
}

impl SectionKind {
    /// Section title as shown on detail panels.
    pub fn title(&self) -> &'static str {
        match self {
            SectionKind::Sop => "SOP",
            SectionKind::Radio => "Radio Information",
            SectionKind::Terms => "Common Terms",
            SectionKind::Training => "Training",
        }
    }
}

/// One catalog entry, keyed by its lowercase-normalized code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecializationDefinition {
    /// Human-readable name, e.g. "Medic".
    pub name: String,

    /// Brief summary of duties.
    pub description: String,

    /// Standard operating procedure text, if any.
    #[serde(default)]
    pub sop: String,

    /// Radio usage notes, if any.
    #[serde(default)]
    pub radio: String,

    /// Common terminology, if any.
    #[serde(default)]
    pub terms: String,

    /// Training material, if any.
    #[serde(default)]
    pub training: String,
}

impl SpecializationDefinition {
    /// Creates a definition with the identity fields; detail sections start
    /// empty and are filled by the second step of the Add flow.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if name or description is blank
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        let description = description.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        if description.trim().is_empty() {
            return Err(ValidationError::empty_field("description"));
        }
        Ok(Self {
            name,
            description,
            sop: String::new(),
            radio: String::new(),
            terms: String::new(),
            training: String::new(),
        })
    }

    /// Sets the four optional detail sections.
    pub fn with_sections(
        mut self,
        sop: impl Into<String>,
        radio: impl Into<String>,
        terms: impl Into<String>,
        training: impl Into<String>,
    ) -> Self {
        self.sop = sop.into();
        self.radio = radio.into();
        self.terms = terms.into();
        self.training = training.into();
        self
    }

    /// Returns a section's text, or `None` when it is blank.
    pub fn section(&self, kind: SectionKind) -> Option<&str> {
        let text = match kind {
            SectionKind::Sop => &self.sop,
            SectionKind::Radio => &self.radio,
            SectionKind::Terms => &self.terms,
            SectionKind::Training => &self.training,
        };
        if text.trim().is_empty() {
            None
        } else {
            Some(text.as_str())
        }
    }
}
