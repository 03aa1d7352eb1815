//! Catalog module - Specialization reference table.

mod specialization;

pub use specialization::{normalize_code, SectionKind, SpecializationDefinition};
