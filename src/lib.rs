//! Blockfit (workspace facade crate).
//!
//! Re-exports the `blockfit::{core,engine,script,types}` public API; the
//! implementation lives in dedicated crates under `crates/`.

pub use blockfit_core as core;
pub use blockfit_engine as engine;
pub use blockfit_script as script;
pub use blockfit_types as types;
