//! Shared dossier rendering.
//!
//! Rendering is pure over the record and catalog: the same inputs always
//! produce the same view, which the panel tests rely on.

use std::collections::BTreeMap;

use crate::domain::catalog::SpecializationDefinition;
use crate::domain::dossier::{DossierRecord, Note};
use crate::ports::PanelView;

/// Renders the dossier panel body (no buttons; callers attach their own).
pub(crate) fn dossier_view(
    record: &DossierRecord,
    catalog: &BTreeMap<String, SpecializationDefinition>,
) -> PanelView {
    PanelView::new(format!("Dossier: {}", record.display_name()))
        .field("Rank", record.rank())
        .field("Specializations", specialization_lines(record, catalog))
        .field("Notes", note_lines(record.notes()))
}

/// Lists assigned specializations; a code no longer in the catalog renders
/// raw.
pub(crate) fn specialization_lines(
    record: &DossierRecord,
    catalog: &BTreeMap<String, SpecializationDefinition>,
) -> String {
    if record.specializations().is_empty() {
        return "_No specializations assigned._".to_string();
    }
    record
        .specializations()
        .iter()
        .map(|code| match catalog.get(code) {
            Some(def) => format!("• **{}** ({})", def.name, code.to_uppercase()),
            None => format!("• {}", code),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Lists notes with their 1-based numbers.
pub(crate) fn note_lines(notes: &[Note]) -> String {
    if notes.is_empty() {
        return "_No notes on file._".to_string();
    }
    notes
        .iter()
        .enumerate()
        .map(|(i, n)| {
            format!(
                "**Note {}:**\n{}\n> {} - by {}",
                i + 1,
                n.text,
                n.timestamp.to_rfc3339(),
                n.added_by
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
