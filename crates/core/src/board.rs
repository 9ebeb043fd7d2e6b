//! Board module - the grid of cells
//!
//! The board is a `rows x cols` grid (8x8 by default) stored as a flat
//! row-major vector. Coordinates are `(row, col)` with row 0 at the top.
//!
//! Placement is all-or-nothing: [`Board::place`] validates every target cell
//! before filling any of them, so a rejected attempt never leaves a partial
//! fill behind and two overlapping placements cannot both succeed.

use arrayvec::ArrayVec;
use tracing::debug;

use crate::cell::{Cell, CounterTick};
use crate::error::{BoardError, CellError};
use crate::types::{
    GridPos, PieceId, DEFAULT_BOARD_COLS, DEFAULT_BOARD_ROWS, MAX_BOARD_DIM,
};

/// Outcome of checking a set of cells against the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fit {
    Fits,
    /// First cell found outside the board
    OutOfBounds(GridPos),
    /// First cell found already filled (or named twice)
    Occupied(GridPos),
}

impl Fit {
    pub fn is_fit(self) -> bool {
        matches!(self, Fit::Fits)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Fit::Fits => "fits",
            Fit::OutOfBounds(_) => "out_of_bounds",
            Fit::Occupied(_) => "occupied",
        }
    }
}

/// Full rows and columns found on one board state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClearedLines {
    pub rows: ArrayVec<u8, MAX_BOARD_DIM>,
    pub cols: ArrayVec<u8, MAX_BOARD_DIM>,
}

impl ClearedLines {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.cols.is_empty()
    }

    /// Number of lines (rows + columns)
    pub fn count(&self) -> usize {
        self.rows.len() + self.cols.len()
    }

    fn covers(&self, pos: GridPos) -> bool {
        self.rows.iter().any(|&r| r as i32 == pos.row)
            || self.cols.iter().any(|&c| c as i32 == pos.col)
    }
}

/// Result of clearing lines
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineClear {
    /// Cells that were filled and are now empty
    pub cells: Vec<GridPos>,
    /// Cells that held an armed bomb
    pub defused: Vec<GridPos>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    rows: usize,
    cols: usize,
    /// Flat array of cells, row-major order (row * cols + col)
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board. Both dimensions must be within `1..=MAX_BOARD_DIM`.
    pub fn new(rows: usize, cols: usize) -> Result<Self, BoardError> {
        if rows == 0 || cols == 0 || rows > MAX_BOARD_DIM || cols > MAX_BOARD_DIM {
            return Err(BoardError::InvalidDimensions {
                rows,
                cols,
                max: MAX_BOARD_DIM,
            });
        }
        Ok(Self {
            rows,
            cols,
            cells: vec![Cell::new(); rows * cols],
        })
    }

    #[inline]
    fn index(&self, pos: GridPos) -> Option<usize> {
        if self.is_out_of_bounds(pos) {
            return None;
        }
        Some(pos.row as usize * self.cols + pos.col as usize)
    }

    fn pos_of(&self, idx: usize) -> GridPos {
        GridPos::new((idx / self.cols) as i32, (idx % self.cols) as i32)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Cell at `pos`, or None when out of bounds
    pub fn get(&self, pos: GridPos) -> Option<&Cell> {
        self.index(pos).map(|idx| &self.cells[idx])
    }

    fn cell_mut(&mut self, pos: GridPos) -> Result<&mut Cell, BoardError> {
        match self.index(pos) {
            Some(idx) => Ok(&mut self.cells[idx]),
            None => Err(BoardError::OutOfBounds(pos)),
        }
    }

    /// Check if position is within bounds and empty
    pub fn is_valid(&self, pos: GridPos) -> bool {
        matches!(self.get(pos), Some(cell) if !cell.is_filled())
    }

    /// Check if position is within bounds and filled
    pub fn is_occupied(&self, pos: GridPos) -> bool {
        matches!(self.get(pos), Some(cell) if cell.is_filled())
    }

    pub fn is_out_of_bounds(&self, pos: GridPos) -> bool {
        pos.row < 0 || pos.col < 0 || pos.row as usize >= self.rows || pos.col as usize >= self.cols
    }

    /// Validate a candidate placement without touching the board
    pub fn check_fit(&self, cells: &[GridPos]) -> Fit {
        for (i, &pos) in cells.iter().enumerate() {
            if self.is_out_of_bounds(pos) {
                return Fit::OutOfBounds(pos);
            }
            if self.is_occupied(pos) || cells[..i].contains(&pos) {
                return Fit::Occupied(pos);
            }
        }
        Fit::Fits
    }

    /// Fill every cell with `occupant`, or none of them.
    pub fn place(&mut self, cells: &[GridPos], occupant: PieceId) -> Fit {
        let fit = self.check_fit(cells);
        if !fit.is_fit() {
            return fit;
        }
        for &pos in cells {
            if let Some(idx) = self.index(pos) {
                self.cells[idx].occupy(occupant);
            }
        }
        debug!(occupant = occupant.0, cells = cells.len(), "placement filled");
        Fit::Fits
    }

    /// Whether `shape` fits with its origin at `origin`
    pub fn fits_at(&self, shape: &[GridPos], origin: GridPos) -> bool {
        shape.iter().all(|&offset| self.is_valid(offset + origin))
    }

    /// Whether `shape` fits anywhere on the board
    pub fn fits_anywhere(&self, shape: &[GridPos]) -> bool {
        let Some(min_row) = shape.iter().map(|p| p.row).min() else {
            return false;
        };
        let max_row = shape.iter().map(|p| p.row).max().unwrap_or(min_row);
        let min_col = shape.iter().map(|p| p.col).min().unwrap_or(0);
        let max_col = shape.iter().map(|p| p.col).max().unwrap_or(min_col);

        let rows = self.rows as i32;
        let cols = self.cols as i32;
        (-min_row..rows - max_row).any(|r| {
            (-min_col..cols - max_col).any(|c| self.fits_at(shape, GridPos::new(r, c)))
        })
    }

    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= self.rows {
            return false;
        }
        let start = row * self.cols;
        self.cells[start..start + self.cols]
            .iter()
            .all(Cell::is_filled)
    }

    pub fn is_col_full(&self, col: usize) -> bool {
        if col >= self.cols {
            return false;
        }
        (0..self.rows).all(|row| self.cells[row * self.cols + col].is_filled())
    }

    /// All full rows and columns, evaluated on the current state
    pub fn full_lines(&self) -> ClearedLines {
        let mut lines = ClearedLines::default();
        for row in 0..self.rows {
            if self.is_row_full(row) {
                lines.rows.push(row as u8);
            }
        }
        for col in 0..self.cols {
            if self.is_col_full(col) {
                lines.cols.push(col as u8);
            }
        }
        lines
    }

    /// Clear the given lines. A cell on a crossing is cleared once.
    ///
    /// Without `remove_bomb_state`, an armed bomb on any of the lines rejects
    /// the whole clear and the board is left unchanged.
    pub fn clear_lines(
        &mut self,
        lines: &ClearedLines,
        remove_bomb_state: bool,
    ) -> Result<LineClear, BoardError> {
        if !remove_bomb_state {
            if let Some(pos) = self
                .iter()
                .find(|(pos, cell)| cell.is_bomb() && lines.covers(*pos))
                .map(|(pos, _)| pos)
            {
                return Err(BoardError::Cell {
                    pos,
                    source: CellError::ArmedBombRetained,
                });
            }
        }

        let mut result = LineClear::default();
        for idx in 0..self.cells.len() {
            let pos = self.pos_of(idx);
            if !lines.covers(pos) {
                continue;
            }
            let cell = &mut self.cells[idx];
            let was_bomb = cell.is_bomb();
            let previous = cell
                .clear(remove_bomb_state)
                .map_err(|source| BoardError::Cell { pos, source })?;
            if previous.is_some() {
                result.cells.push(pos);
            }
            if was_bomb {
                result.defused.push(pos);
            }
        }

        debug!(
            rows = lines.rows.len(),
            cols = lines.cols.len(),
            cells = result.cells.len(),
            defused = result.defused.len(),
            "lines cleared"
        );
        Ok(result)
    }

    pub fn fill(&mut self, pos: GridPos, occupant: PieceId) -> Result<(), BoardError> {
        self.cell_mut(pos)?
            .fill(occupant)
            .map_err(|source| BoardError::Cell { pos, source })
    }

    pub fn clear_cell(
        &mut self,
        pos: GridPos,
        remove_bomb_state: bool,
    ) -> Result<Option<PieceId>, BoardError> {
        self.cell_mut(pos)?
            .clear(remove_bomb_state)
            .map_err(|source| BoardError::Cell { pos, source })
    }

    pub fn convert_to_bomb(&mut self, pos: GridPos, counter: u8) -> Result<(), BoardError> {
        self.cell_mut(pos)?
            .convert_to_bomb(counter)
            .map_err(|source| BoardError::Cell { pos, source })
    }

    pub fn set_counter(&mut self, pos: GridPos, counter: u8) -> Result<(), BoardError> {
        self.cell_mut(pos)?
            .set_counter(counter)
            .map_err(|source| BoardError::Cell { pos, source })
    }

    pub fn decrease_counter(&mut self, pos: GridPos) -> Result<CounterTick, BoardError> {
        self.cell_mut(pos)?
            .decrease_counter()
            .map_err(|source| BoardError::Cell { pos, source })
    }

    /// Count every armed bomb down by one move.
    ///
    /// Returns the cells whose counter reached zero on this tick.
    pub fn tick_bombs(&mut self) -> Vec<GridPos> {
        let mut over = Vec::new();
        for idx in 0..self.cells.len() {
            if !self.cells[idx].is_bomb() {
                continue;
            }
            if let Ok(CounterTick::Over) = self.cells[idx].decrease_counter() {
                over.push(self.pos_of(idx));
            }
        }
        over
    }

    /// Armed bombs and their remaining counters
    pub fn armed_bombs(&self) -> impl Iterator<Item = (GridPos, u8)> + '_ {
        self.iter().filter_map(|(pos, cell)| {
            if cell.is_bomb() {
                cell.bomb_counter().map(|n| (pos, n))
            } else {
                None
            }
        })
    }

    pub fn empty_cells(&self) -> impl Iterator<Item = GridPos> + '_ {
        self.iter()
            .filter(|(_, cell)| !cell.is_filled())
            .map(|(pos, _)| pos)
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_filled()).count()
    }

    /// Cells with their coordinates, row-major
    pub fn iter(&self) -> impl Iterator<Item = (GridPos, &Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, cell)| (self.pos_of(idx), cell))
    }

    /// Empty the entire board, bomb state included
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = Cell::new();
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self {
            rows: DEFAULT_BOARD_ROWS as usize,
            cols: DEFAULT_BOARD_COLS as usize,
            cells: vec![Cell::new(); DEFAULT_BOARD_ROWS as usize * DEFAULT_BOARD_COLS as usize],
        }
    }
}
