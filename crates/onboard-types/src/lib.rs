//! Shared types, adapter traits, and core utilities for the beta onboarding service.
//!
//! Adapter implementations depend only on this crate, so the storage and mail
//! backends compile independently of the onboarding logic.

pub mod email_adapter;
pub mod error;
pub mod memory_sheet;
pub mod prelude;
pub mod sheet_adapter;
pub mod types;

// vim: ts=4
