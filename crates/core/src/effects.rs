//! Effects capability - optional presentation hooks
//!
//! State transitions never depend on these hooks. A renderer, tweener or
//! sound layer implements [`Effects`] to follow along; [`NoEffects`] is the
//! capability when nothing is attached.
//!
//! While a block is dragged, [`Effects::cells_highlighted`] follows the cells
//! it would fill; it is only called for drops that fit.
//!
//! The counter display of a bomb cell is [`Effects::counter_changed`]: it is
//! handed to the game once at construction and receives the cell position
//! with the new counter value (`None` when the counter is removed).

use crate::types::{GridPos, PieceId, Position};

pub trait Effects {
    /// A block was dragged to `pos`
    fn block_moved(&mut self, _block: u32, _pos: Position) {}

    /// A block was snapped and committed at `pos`
    fn block_committed(&mut self, _block: u32, _pos: Position) {}

    /// An invalid drop sent the block back to `pos`
    fn block_reverted(&mut self, _block: u32, _pos: Position) {}

    /// A block was returned to its spawn position
    fn block_returned(&mut self, _block: u32, _pos: Position) {}

    /// The dragged block would land on `cells` if dropped now
    fn cells_highlighted(&mut self, _cells: &[GridPos]) {}

    /// The drop preview is gone
    fn highlight_cleared(&mut self) {}

    fn cell_filled(&mut self, _cell: GridPos, _occupant: PieceId) {}

    fn cell_cleared(&mut self, _cell: GridPos) {}

    fn counter_changed(&mut self, _cell: GridPos, _counter: Option<u8>) {}

    fn bomb_counter_over(&mut self, _cell: GridPos) {}
}

/// The absent capability
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEffects;

impl Effects for NoEffects {}

/// One recorded hook call
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    BlockMoved(u32, Position),
    BlockCommitted(u32, Position),
    BlockReverted(u32, Position),
    BlockReturned(u32, Position),
    CellsHighlighted(Vec<GridPos>),
    HighlightCleared,
    CellFilled(GridPos, PieceId),
    CellCleared(GridPos),
    CounterChanged(GridPos, Option<u8>),
    BombCounterOver(GridPos),
}

/// Records every hook call in order (tests, headless tooling)
#[derive(Debug, Clone, Default)]
pub struct RecordedEffects {
    pub log: Vec<Effect>,
}

impl RecordedEffects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the recorded calls, leaving the log empty
    pub fn drain(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.log)
    }
}

impl Effects for RecordedEffects {
    fn block_moved(&mut self, block: u32, pos: Position) {
        self.log.push(Effect::BlockMoved(block, pos));
    }

    fn block_committed(&mut self, block: u32, pos: Position) {
        self.log.push(Effect::BlockCommitted(block, pos));
    }

    fn block_reverted(&mut self, block: u32, pos: Position) {
        self.log.push(Effect::BlockReverted(block, pos));
    }

    fn block_returned(&mut self, block: u32, pos: Position) {
        self.log.push(Effect::BlockReturned(block, pos));
    }

    fn cells_highlighted(&mut self, cells: &[GridPos]) {
        self.log.push(Effect::CellsHighlighted(cells.to_vec()));
    }

    fn highlight_cleared(&mut self) {
        self.log.push(Effect::HighlightCleared);
    }

    fn cell_filled(&mut self, cell: GridPos, occupant: PieceId) {
        self.log.push(Effect::CellFilled(cell, occupant));
    }

    fn cell_cleared(&mut self, cell: GridPos) {
        self.log.push(Effect::CellCleared(cell));
    }

    fn counter_changed(&mut self, cell: GridPos, counter: Option<u8>) {
        self.log.push(Effect::CounterChanged(cell, counter));
    }

    fn bomb_counter_over(&mut self, cell: GridPos) {
        self.log.push(Effect::BombCounterOver(cell));
    }
}
