//! Contract-violation errors raised by the core state machines.
//!
//! An invalid placement is not an error (see [`crate::board::Fit`]); these
//! variants only cover misuse of the Block/Cell API.

use thiserror::Error;

use crate::types::GridPos;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BlockError {
    #[error("a block must occupy at least one cell")]
    EmptyShape,
    #[error("shape offset {0} appears more than once")]
    DuplicateOffset(GridPos),
}

impl BlockError {
    pub fn code(self) -> &'static str {
        match self {
            BlockError::EmptyShape => "empty_shape",
            BlockError::DuplicateOffset(_) => "duplicate_offset",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CellError {
    #[error("cell is already filled")]
    AlreadyFilled,
    #[error("cell must be filled before it can hold a bomb")]
    NotFilled,
    #[error("cell is not an armed bomb")]
    NotBomb,
    #[error("bomb counter already reached zero")]
    CounterExhausted,
    #[error("bomb counter must be positive")]
    ZeroCounter,
    #[error("clearing an armed bomb requires removing its bomb state")]
    ArmedBombRetained,
}

impl CellError {
    pub fn code(self) -> &'static str {
        match self {
            CellError::AlreadyFilled => "already_filled",
            CellError::NotFilled => "not_filled",
            CellError::NotBomb => "not_bomb",
            CellError::CounterExhausted => "counter_exhausted",
            CellError::ZeroCounter => "zero_counter",
            CellError::ArmedBombRetained => "armed_bomb_retained",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("board dimensions {rows}x{cols} are outside 1..={max}")]
    InvalidDimensions { rows: usize, cols: usize, max: usize },
    #[error("cell {0} is outside the board")]
    OutOfBounds(GridPos),
    #[error("cell {pos}: {source}")]
    Cell {
        pos: GridPos,
        #[source]
        source: CellError,
    },
}

impl BoardError {
    pub fn code(self) -> &'static str {
        match self {
            BoardError::InvalidDimensions { .. } => "invalid_dimensions",
            BoardError::OutOfBounds(_) => "out_of_bounds",
            BoardError::Cell { source, .. } => source.code(),
        }
    }
}
