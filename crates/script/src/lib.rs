//! Scripted play - line-delimited JSON commands against a game
//!
//! Used by the `blockfit` binary and by integration tests to drive the
//! placement controller without any input device or renderer.

pub mod protocol;
pub mod runner;

pub use blockfit_engine as engine;

pub use protocol::{parse_command, Command, DropOutcome, DropPreview, Response};
pub use runner::{RunSummary, Runner};
