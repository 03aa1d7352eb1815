//! Rank Warden - Chat-Platform Administrative Bot
//!
//! This crate maintains personnel dossier records (rank, specializations,
//! free-text notes) for members of an organization and exposes CRUD
//! operations through interactive, bounded-lifetime menu sessions.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
