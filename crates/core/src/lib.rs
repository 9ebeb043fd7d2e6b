//! Core puzzle logic - pure, deterministic, and testable
//!
//! This crate contains the block/cell state machines and the board rules.
//! It has **no dependencies** on rendering, input, audio, or I/O:
//!
//! - **Deterministic**: same seed deals identical pieces
//! - **Side-effect local**: every operation mutates only its own block/cell/board
//! - **Fail fast**: API misuse is rejected with a typed error instead of
//!   corrupting counter or fill state
//!
//! # Module Structure
//!
//! - [`block`]: movable piece with drag/commit/revert position tracking
//! - [`cell`]: board slot with fill state and bomb countdown
//! - [`board`]: grid of cells, atomic placement, line clearing, bomb ticks
//! - [`shapes`]: catalog of block-puzzle pieces
//! - [`rng`]: seeded shape dealing
//! - [`scoring`]: placement, line and combo points
//! - [`effects`]: optional presentation hooks
//! - [`snapshot`]: serializable board view
//!
//! # Example
//!
//! ```
//! use blockfit_core::{Block, Board, Fit};
//! use blockfit_types::{GridPos, PieceId, Position};
//!
//! let mut board = Board::default();
//! let shape = vec![GridPos::new(0, 0), GridPos::new(0, 1)];
//! let mut block = Block::new(1, shape, Position::new(2.5, 3.5), 0).unwrap();
//!
//! // Drag one row down and drop.
//! block.update_pos(Position::new(1.0, 0.0));
//! let cells = block.block_positions();
//! assert_eq!(cells, vec![GridPos::new(3, 3), GridPos::new(3, 4)]);
//!
//! if board.check_fit(&cells).is_fit() {
//!     block.update_correct_move();
//!     assert_eq!(board.place(&cells, PieceId(block.id())), Fit::Fits);
//! } else {
//!     block.update_incorrect_move();
//! }
//! assert!(board.is_occupied(GridPos::new(3, 4)));
//! ```

pub mod block;
pub mod board;
pub mod cell;
pub mod effects;
pub mod error;
pub mod rng;
pub mod scoring;
pub mod shapes;
pub mod snapshot;

pub use blockfit_types as types;

// Re-export commonly used types for convenience
pub use block::{Block, BlockPhase};
pub use board::{Board, ClearedLines, Fit, LineClear};
pub use cell::{Cell, CounterTick};
pub use effects::{Effect, Effects, NoEffects, RecordedEffects};
pub use error::{BlockError, BoardError, CellError};
pub use rng::{ShapePicker, SimpleRng};
pub use scoring::{calculate_score, ScoreResult};
pub use shapes::ShapeKind;
pub use snapshot::{BoardSnapshot, BombSnapshot};
