//! Roster module - Member lookup against the platform roster.

mod resolver;

pub use resolver::{resolve, Resolution, RosterEntry};
