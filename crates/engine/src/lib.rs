//! Game engine - rack, placement controller and session rules
//!
//! Builds on `blockfit-core`: the core owns blocks, cells and the board; the
//! engine decides when blocks are committed or reverted, which lines clear,
//! how bombs count down, and when a game ends.

pub mod config;
pub mod events;
pub mod game;
pub mod place;
pub mod rack;
pub mod snapshot;
pub mod timer;

pub use blockfit_core as core;
pub use blockfit_types as types;

pub use config::{ConfigError, GameConfig};
pub use events::{GameEvent, GameOverReason};
pub use game::{ArmError, Game};
pub use place::{
    apply_place, begin_drag, drag_by, preview, release, return_all, PlaceError, PlaceOutcome,
    Placement, Preview,
};
pub use rack::{Rack, RackPiece};
pub use snapshot::{GameSnapshot, RackSlotSnapshot};
pub use timer::RoundTimer;
