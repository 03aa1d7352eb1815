//! Rank module - Static ordered rank table and label formatting.

mod table;

pub use table::{format_code, format_label, RankDefinition, RankTable, DEFAULT_RANKS};
