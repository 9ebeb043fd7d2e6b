//! Rack - the pieces on offer below the board
//!
//! Each slot holds at most one block. Blocks spawn one row below the board,
//! spread evenly across its width, and the rack is dealt a fresh set only when
//! every slot is empty.

use crate::core::{Block, ShapeKind, ShapePicker};
use crate::types::{Position, RACK_SIZE};

#[derive(Debug, Clone, PartialEq)]
pub struct RackPiece {
    pub kind: ShapeKind,
    pub block: Block,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rack {
    slots: [Option<RackPiece>; RACK_SIZE],
}

impl Rack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn position of a slot for a board of the given size
    pub fn spawn_position(slot: usize, rows: usize, cols: usize) -> Position {
        let slot_col = slot * cols / RACK_SIZE;
        Position::new(rows as f32 + 1.5, slot_col as f32 + 0.5)
    }

    pub fn get(&self, slot: usize) -> Option<&RackPiece> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, slot: usize) -> Option<&mut RackPiece> {
        self.slots.get_mut(slot).and_then(Option::as_mut)
    }

    /// Remove the piece in `slot`
    pub fn take(&mut self, slot: usize) -> Option<RackPiece> {
        self.slots.get_mut(slot).and_then(Option::take)
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Occupied slots with their index
    pub fn pieces(&self) -> impl Iterator<Item = (usize, &RackPiece)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|p| (i, p)))
    }

    pub fn pieces_mut(&mut self) -> impl Iterator<Item = &mut RackPiece> + '_ {
        self.slots.iter_mut().filter_map(Option::as_mut)
    }

    /// Deal a new piece into every slot. Block ids are taken from `next_id`.
    pub fn deal(
        &mut self,
        picker: &mut ShapePicker,
        next_id: &mut u32,
        rows: usize,
        cols: usize,
    ) -> [ShapeKind; RACK_SIZE] {
        let mut dealt = [ShapeKind::Single; RACK_SIZE];
        for (slot, kind) in dealt.iter_mut().enumerate() {
            *kind = picker.draw();
            let start = Self::spawn_position(slot, rows, cols);
            let block = Block::from_kind(*next_id, *kind, start);
            *next_id = next_id.wrapping_add(1);
            self.slots[slot] = Some(RackPiece { kind: *kind, block });
        }
        dealt
    }

    pub fn clear(&mut self) {
        self.slots = Default::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BlockPhase;

    #[test]
    fn spawn_positions_sit_below_board() {
        assert_eq!(Rack::spawn_position(0, 8, 8), Position::new(9.5, 0.5));
        assert_eq!(Rack::spawn_position(1, 8, 8), Position::new(9.5, 2.5));
        assert_eq!(Rack::spawn_position(2, 8, 8), Position::new(9.5, 5.5));
    }

    #[test]
    fn deal_fills_every_slot_with_fresh_ids() {
        let mut rack = Rack::new();
        let mut picker = ShapePicker::new(7);
        let mut next_id = 1;
        assert!(rack.is_empty());

        let dealt = rack.deal(&mut picker, &mut next_id, 8, 8);
        assert_eq!(rack.len(), RACK_SIZE);
        assert_eq!(next_id, 1 + RACK_SIZE as u32);

        for (slot, piece) in rack.pieces() {
            assert_eq!(piece.kind, dealt[slot]);
            assert_eq!(piece.block.id(), 1 + slot as u32);
            assert_eq!(piece.block.phase(), BlockPhase::Spawned);
            assert_eq!(piece.block.start_pos(), Rack::spawn_position(slot, 8, 8));
        }
    }

    #[test]
    fn take_empties_slot() {
        let mut rack = Rack::new();
        let mut picker = ShapePicker::new(3);
        let mut next_id = 0;
        rack.deal(&mut picker, &mut next_id, 8, 8);

        assert!(rack.take(1).is_some());
        assert!(rack.get(1).is_none());
        assert!(rack.take(1).is_none());
        assert!(rack.take(RACK_SIZE).is_none());
        assert_eq!(rack.len(), RACK_SIZE - 1);
        assert!(!rack.is_empty());
    }
}
