//! Block module - a movable multi-cell piece
//!
//! A block keeps three continuous positions in board space:
//!
//! - `start`: where the piece spawned (fixed)
//! - `previous`: the last committed (snapped) position
//! - `current`: the live position, possibly mid-drag
//!
//! Absolute board cells are derived from `current` with `floor`, so dragging
//! stays smooth while validation always works on integral coordinates.
//! Committing snaps `current` onto the center of its cell.

use crate::error::BlockError;
use crate::shapes::ShapeKind;
use crate::types::{GridPos, Position};

/// Position state of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockPhase {
    /// Sitting at (or returned to) its spawn position
    Spawned,
    /// Moved since the last commit/revert, not yet resolved
    Dragging,
    /// Resting on the committed baseline
    Committed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    id: u32,
    variant: u8,
    shape: Vec<GridPos>,
    start: Position,
    previous: Position,
    current: Position,
    phase: BlockPhase,
    has_committed: bool,
}

impl Block {
    /// Create a block at its spawn position.
    ///
    /// Fails when the shape is empty or names the same offset twice.
    pub fn new(
        id: u32,
        shape: Vec<GridPos>,
        start: Position,
        variant: u8,
    ) -> Result<Self, BlockError> {
        if shape.is_empty() {
            return Err(BlockError::EmptyShape);
        }
        for (i, offset) in shape.iter().enumerate() {
            if shape[..i].contains(offset) {
                return Err(BlockError::DuplicateOffset(*offset));
            }
        }

        Ok(Self::spawned(id, shape, start, variant))
    }

    /// Create a block for a catalog shape. Catalog offsets are never empty
    /// or repeated.
    pub fn from_kind(id: u32, kind: ShapeKind, start: Position) -> Self {
        Self::spawned(id, kind.offsets(), start, kind.variant())
    }

    fn spawned(id: u32, shape: Vec<GridPos>, start: Position, variant: u8) -> Self {
        Self {
            id,
            variant,
            shape,
            start,
            previous: start,
            current: start,
            phase: BlockPhase::Spawned,
            has_committed: false,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    /// Visual variant index (sprite/color selection for renderers)
    pub fn variant(&self) -> u8 {
        self.variant
    }

    /// Relative cell offsets, in construction order
    pub fn shape(&self) -> &[GridPos] {
        &self.shape
    }

    pub fn start_pos(&self) -> Position {
        self.start
    }

    pub fn previous_pos(&self) -> Position {
        self.previous
    }

    pub fn current_pos(&self) -> Position {
        self.current
    }

    pub fn phase(&self) -> BlockPhase {
        self.phase
    }

    /// Move by a delta. No bounds checking happens here.
    pub fn update_pos(&mut self, delta: Position) {
        self.current += delta;
        self.phase = BlockPhase::Dragging;
    }

    /// Absolute board cells covered at the current position.
    ///
    /// Index `i` of the result corresponds to `shape()[i]`.
    pub fn block_positions(&self) -> Vec<GridPos> {
        let mut out = Vec::with_capacity(self.shape.len());
        self.block_positions_into(&mut out);
        out
    }

    /// Allocation-free variant of [`Block::block_positions`]; clears `out` first.
    pub fn block_positions_into(&self, out: &mut Vec<GridPos>) {
        let origin = self.current.floor();
        out.clear();
        out.extend(self.shape.iter().map(|&offset| offset + origin));
    }

    /// Revert an unresolved drag to the last committed position
    pub fn update_incorrect_move(&mut self) {
        self.current = self.previous;
        self.phase = if self.has_committed {
            BlockPhase::Committed
        } else {
            BlockPhase::Spawned
        };
    }

    /// Return fully to the spawn position, forgetting any commit
    pub fn update_start_move(&mut self) {
        self.current = self.start;
        self.previous = self.start;
        self.phase = BlockPhase::Spawned;
        self.has_committed = false;
    }

    /// Commit: snap onto the cell center and make it the new baseline.
    ///
    /// Call exactly once per successful placement, after validation.
    pub fn update_correct_move(&mut self) {
        self.current = self.current.snapped();
        self.previous = self.current;
        self.phase = BlockPhase::Committed;
        self.has_committed = true;
    }
}
