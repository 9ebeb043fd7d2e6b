//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no game logic attached, making them usable
//! from the core state machine, the placement engine, and the command protocol.
//!
//! # Coordinate System
//!
//! The board is addressed by `(row, col)`:
//!
//! - **Rows** grow downwards (row 0 is the top edge)
//! - **Columns** grow to the right (col 0 is the left edge)
//! - A [`Position`] is continuous board space; the cell `(r, c)` covers
//!   `[r, r + 1) x [c, c + 1)` and its center is `(r + 0.5, c + 0.5)`
//! - A [`GridPos`] is an integral cell address, obtained with [`Position::floor`]
//!
//! # Board Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_BOARD_ROWS` | 8 | Rows on a default board |
//! | `DEFAULT_BOARD_COLS` | 8 | Columns on a default board |
//! | `MAX_BOARD_DIM` | 16 | Upper bound for either dimension |
//! | `SNAP_EXACT_LIMIT` | 2^23 | Largest position that snaps exactly to a cell center |
//! | `RACK_SIZE` | 3 | Pieces offered per turn |
//! | `DEFAULT_BOMB_COUNTER` | 9 | Moves before an armed bomb goes off |
//! | `DEFAULT_ROUND_TIME_MS` | 120000 | Round length in timed modes |
//!
//! # Examples
//!
//! ```
//! use blockfit_types::{GameMode, GridPos, Position};
//!
//! let pos = Position::new(2.5, 3.5);
//! assert_eq!(pos.floor(), GridPos::new(2, 3));
//!
//! let dragged = pos + Position::new(0.7, -1.2);
//! assert_eq!(dragged.snapped(), Position::new(3.5, 2.5));
//!
//! let mode = GameMode::from_str("blast").unwrap();
//! assert!(mode.bomb_counters_active());
//! ```

use std::fmt;
use std::ops::{Add, AddAssign, Sub};

use serde::{Deserialize, Serialize};

/// Default board height in cells
pub const DEFAULT_BOARD_ROWS: u8 = 8;

/// Default board width in cells
pub const DEFAULT_BOARD_COLS: u8 = 8;

/// Largest supported board dimension (rows or columns)
pub const MAX_BOARD_DIM: usize = 16;

/// Magnitude (2^23) below which an `f32` position snaps exactly onto a cell
/// center. Beyond it `floor + 0.5` rounds back to an integer.
pub const SNAP_EXACT_LIMIT: f32 = 8_388_608.0;

/// Number of pieces offered to the player per turn
pub const RACK_SIZE: usize = 3;

/// Counter a freshly armed bomb starts with
pub const DEFAULT_BOMB_COUNTER: u8 = 9;

/// Moves between two bomb spawns in blast mode
pub const DEFAULT_BOMB_INTERVAL: u32 = 5;

/// Round length for timed modes (2 minutes)
pub const DEFAULT_ROUND_TIME_MS: u32 = 120_000;

/// Occupant value written to snapshots for an empty cell
pub const NO_OCCUPANT: i32 = -1;

/// Points awarded per cell of a committed piece
pub const POINTS_PER_CELL: u32 = 10;

/// Base points per cleared line (multiplied by the number of lines cleared at once)
pub const LINE_CLEAR_BASE: u32 = 100;

/// Combo scoring base
pub const COMBO_BASE: u32 = 50;

/// Integral cell address on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct GridPos {
    pub row: i32,
    pub col: i32,
}

impl GridPos {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

/// Saturates at the `i32` range, so a far-off origin still yields cells that
/// are simply out of bounds.
impl Add for GridPos {
    type Output = GridPos;

    fn add(self, rhs: GridPos) -> GridPos {
        GridPos::new(
            self.row.saturating_add(rhs.row),
            self.col.saturating_add(rhs.col),
        )
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(i32, i32)> for GridPos {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

/// Continuous position in board space (row, col)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub row: f32,
    pub col: f32,
}

impl Position {
    pub const fn new(row: f32, col: f32) -> Self {
        Self { row, col }
    }

    /// Cell containing this position (component-wise floor)
    pub fn floor(self) -> GridPos {
        GridPos::new(self.row.floor() as i32, self.col.floor() as i32)
    }

    /// Center of the cell containing this position.
    ///
    /// Exact only while `|component| < SNAP_EXACT_LIMIT`; commits
    /// happen on the board, far inside that range.
    pub fn snapped(self) -> Position {
        Position::new(self.row.floor() + 0.5, self.col.floor() + 0.5)
    }

    /// True when both components sit exactly on a cell center
    pub fn is_cell_centered(self) -> bool {
        self.row - self.row.floor() == 0.5 && self.col - self.col.floor() == 0.5
    }

    /// Center of the given cell
    pub fn center_of(cell: GridPos) -> Position {
        Position::new(cell.row as f32 + 0.5, cell.col as f32 + 0.5)
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        Position::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl AddAssign for Position {
    fn add_assign(&mut self, rhs: Position) {
        self.row += rhs.row;
        self.col += rhs.col;
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Position) -> Position {
        Position::new(self.row - rhs.row, self.col - rhs.col)
    }
}

/// Identifier of the piece that filled a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(pub u32);

impl PieceId {
    /// Occupant of hazard cells spawned by blast mode
    pub const BOMB: PieceId = PieceId(u32::MAX);

    pub fn is_bomb(self) -> bool {
        self == Self::BOMB
    }

    /// Wire value for an optional occupant (`NO_OCCUPANT` when empty)
    pub fn to_wire(occupant: Option<PieceId>) -> i32 {
        match occupant {
            Some(PieceId::BOMB) => -2,
            Some(PieceId(id)) => i32::try_from(id).unwrap_or(i32::MAX),
            None => NO_OCCUPANT,
        }
    }
}

/// Game mode selecting which optional mechanics are active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    #[default]
    Classic,
    Timed,
    Blast,
    Challenge,
}

impl GameMode {
    /// Parse mode from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(GameMode::Classic),
            "timed" => Some(GameMode::Timed),
            "blast" => Some(GameMode::Blast),
            "challenge" => Some(GameMode::Challenge),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Classic => "classic",
            GameMode::Timed => "timed",
            GameMode::Blast => "blast",
            GameMode::Challenge => "challenge",
        }
    }

    /// Whether bomb counters tick in this mode
    pub fn bomb_counters_active(&self) -> bool {
        matches!(self, GameMode::Blast | GameMode::Challenge)
    }

    /// Whether a round timer runs in this mode
    pub fn is_timed(&self) -> bool {
        matches!(self, GameMode::Timed | GameMode::Challenge)
    }
}
