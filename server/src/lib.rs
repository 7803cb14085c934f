//! Lunar Landing API beta onboarding service
//!
//! Command line entry points for the operator tasks and an HTTP webhook that
//! receives form submissions.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod app;
pub mod cli;
pub mod routes;

mod prelude;

pub use app::AppState;

// vim: ts=4
