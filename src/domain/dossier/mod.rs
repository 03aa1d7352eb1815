//! Dossier module - Personnel record aggregate.
//!
//! A dossier is the stored profile for one member: rank, specialization
//! codes, and an ordered list of free-text notes. At most one record exists
//! per member; records are created only by the onboarding workflow.

mod note;
mod record;

pub use note::Note;
pub use record::{DossierRecord, UNASSIGNED_RANK};
