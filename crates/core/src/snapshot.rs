use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::types::{PieceId, NO_OCCUPANT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BombSnapshot {
    pub row: i32,
    pub col: i32,
    pub counter: u8,
}

/// Serializable view of a board.
///
/// `cells[row][col]` holds the occupant id, `NO_OCCUPANT` (-1) when empty and
/// -2 for bomb-mode hazard cells.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub rows: usize,
    pub cols: usize,
    pub cells: Vec<Vec<i32>>,
    pub bombs: Vec<BombSnapshot>,
    /// FNV-1a over the occupancy grid
    pub board_hash: u64,
}

impl BoardSnapshot {
    pub fn capture(board: &Board) -> Self {
        let mut s = Self::default();
        s.capture_into(board);
        s
    }

    /// Refill an existing snapshot, reusing its buffers
    pub fn capture_into(&mut self, board: &Board) {
        self.rows = board.rows();
        self.cols = board.cols();
        self.cells.resize_with(board.rows(), Vec::new);
        for row in &mut self.cells {
            row.clear();
        }
        self.bombs.clear();

        for (pos, cell) in board.iter() {
            self.cells[pos.row as usize].push(PieceId::to_wire(cell.occupant()));
        }
        for (pos, counter) in board.armed_bombs() {
            self.bombs.push(BombSnapshot {
                row: pos.row,
                col: pos.col,
                counter,
            });
        }
        self.board_hash = fnv1a64(&self.cells);
    }

    pub fn is_empty_at(&self, row: usize, col: usize) -> bool {
        self.cells
            .get(row)
            .and_then(|r| r.get(col))
            .map(|&v| v == NO_OCCUPANT)
            .unwrap_or(false)
    }
}

fn fnv1a64(cells: &[Vec<i32>]) -> u64 {
    let mut h: u64 = 0xcbf29ce484222325;
    for b in cells.iter().flatten().flat_map(|v| v.to_le_bytes()) {
        h ^= b as u64;
        h = h.wrapping_mul(0x00000100000001B3);
    }
    h
}
