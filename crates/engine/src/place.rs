//! Drag-and-drop placement
//!
//! A rack block is picked up with [`begin_drag`], moved with [`drag_by`] and
//! dropped with [`release`]. A drop that fits is committed and resolved by the
//! game; anything else sends the block back to its last committed position.
//!
//! Every drag step reports a [`Preview`] of the cells the block would fill.
//! Fitting previews light those cells through the game's effects until the
//! block is dropped or returned.

use thiserror::Error;
use tracing::{debug, warn};

use crate::core::{ClearedLines, Effects, Fit, LineClear, ScoreResult};
use crate::events::GameEvent;
use crate::game::Game;
use crate::types::{GridPos, Position, RACK_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlaceError {
    #[error("game is not playable")]
    NotPlayable,
    #[error("rack slot {0} is out of range")]
    SlotOutOfRange(usize),
    #[error("rack slot {0} is empty")]
    EmptySlot(usize),
    #[error("a block is already being dragged")]
    AlreadyDragging,
    #[error("no block is being dragged")]
    NotDragging,
}

impl PlaceError {
    pub fn code(self) -> &'static str {
        match self {
            PlaceError::NotPlayable => "not_playable",
            PlaceError::SlotOutOfRange(_) => "slot_out_of_range",
            PlaceError::EmptySlot(_) => "empty_slot",
            PlaceError::AlreadyDragging => "already_dragging",
            PlaceError::NotDragging => "not_dragging",
        }
    }
}

/// A committed drop
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub slot: usize,
    pub block: u32,
    pub cells: Vec<GridPos>,
    pub lines: ClearedLines,
    pub cleared: LineClear,
    pub score: ScoreResult,
    /// Bombs whose counter ran out on this move
    pub bombs_over: Vec<GridPos>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlaceOutcome {
    Committed(Placement),
    /// The drop did not fit; the block went back to its previous position
    Reverted(Fit),
}

impl PlaceOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, PlaceOutcome::Committed(_))
    }
}

/// Where the dragged block would land if dropped now
#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    pub slot: usize,
    pub cells: Vec<GridPos>,
    pub fit: Fit,
}

fn reject(err: PlaceError) -> PlaceError {
    warn!(code = err.code(), %err, "placement rejected");
    err
}

/// Pick up the block in `slot`
pub fn begin_drag<E: Effects>(game: &mut Game<E>, slot: usize) -> Result<(), PlaceError> {
    if !game.playable() {
        return Err(reject(PlaceError::NotPlayable));
    }
    if game.dragging.is_some() {
        return Err(reject(PlaceError::AlreadyDragging));
    }
    if slot >= RACK_SIZE {
        return Err(reject(PlaceError::SlotOutOfRange(slot)));
    }
    if game.rack.get(slot).is_none() {
        return Err(reject(PlaceError::EmptySlot(slot)));
    }
    game.dragging = Some(slot);
    Ok(())
}

/// Move the dragged block by `delta` board units and refresh the highlight
pub fn drag_by<E: Effects>(game: &mut Game<E>, delta: Position) -> Result<Preview, PlaceError> {
    let slot = game.dragging.ok_or_else(|| reject(PlaceError::NotDragging))?;
    let piece = game
        .rack
        .get_mut(slot)
        .ok_or_else(|| reject(PlaceError::EmptySlot(slot)))?;
    piece.block.update_pos(delta);
    game.effects
        .block_moved(piece.block.id(), piece.block.current_pos());

    let preview = preview(game)?;
    if preview.fit.is_fit() {
        game.set_highlight(&preview.cells);
    } else {
        game.clear_highlight();
    }
    Ok(preview)
}

/// Cells the dragged block covers right now and whether a drop would fit
pub fn preview<E: Effects>(game: &Game<E>) -> Result<Preview, PlaceError> {
    let slot = game.dragging.ok_or(PlaceError::NotDragging)?;
    let piece = game.rack.get(slot).ok_or(PlaceError::EmptySlot(slot))?;
    let cells = piece.block.block_positions();
    let fit = game.board.check_fit(&cells);
    Ok(Preview { slot, cells, fit })
}

/// Drop the dragged block where it is.
///
/// A drop after the game ended reverts the block and reports `NotPlayable`.
pub fn release<E: Effects>(game: &mut Game<E>) -> Result<PlaceOutcome, PlaceError> {
    let slot = game
        .dragging
        .take()
        .ok_or_else(|| reject(PlaceError::NotDragging))?;
    game.clear_highlight();
    let playable = game.playable();
    let piece = game
        .rack
        .get_mut(slot)
        .ok_or_else(|| reject(PlaceError::EmptySlot(slot)))?;
    let block = piece.block.id();

    if !playable {
        piece.block.update_incorrect_move();
        game.effects.block_reverted(block, piece.block.current_pos());
        return Err(reject(PlaceError::NotPlayable));
    }

    let cells = piece.block.block_positions();
    let fit = game.board.check_fit(&cells);
    if !fit.is_fit() {
        piece.block.update_incorrect_move();
        game.effects.block_reverted(block, piece.block.current_pos());
        debug!(slot, block, fit = fit.as_str(), "drop reverted");
        game.events.push(GameEvent::Reverted {
            slot,
            block,
            reason: fit.as_str().to_string(),
        });
        return Ok(PlaceOutcome::Reverted(fit));
    }

    piece.block.update_correct_move();
    game.effects
        .block_committed(block, piece.block.current_pos());
    let piece = game
        .rack
        .take(slot)
        .ok_or_else(|| reject(PlaceError::EmptySlot(slot)))?;
    Ok(PlaceOutcome::Committed(
        game.commit_placement(slot, piece, cells),
    ))
}

/// Drag the block in `slot` so its origin lands on `target`, then drop it
pub fn apply_place<E: Effects>(
    game: &mut Game<E>,
    slot: usize,
    target: GridPos,
) -> Result<PlaceOutcome, PlaceError> {
    begin_drag(game, slot)?;
    let current = game
        .rack
        .get(slot)
        .map(|p| p.block.current_pos())
        .ok_or_else(|| reject(PlaceError::EmptySlot(slot)))?;
    drag_by(game, Position::center_of(target) - current)?;
    release(game)
}

/// Send every rack block back to its spawn position and drop any drag
pub fn return_all<E: Effects>(game: &mut Game<E>) {
    game.dragging = None;
    game.clear_highlight();
    for piece in game.rack.pieces_mut() {
        piece.block.update_start_move();
        game.effects
            .block_returned(piece.block.id(), piece.block.start_pos());
    }
}
