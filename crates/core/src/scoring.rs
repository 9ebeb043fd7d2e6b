//! Scoring module - block-puzzle points
//!
//! - Every committed cell is worth `POINTS_PER_CELL`.
//! - Lines cleared by one placement score `LINE_CLEAR_BASE * n * n`, so
//!   clearing several at once pays more than clearing them one by one.
//! - Consecutive clearing placements build a combo worth `COMBO_BASE * index`.

use crate::types::{COMBO_BASE, LINE_CLEAR_BASE, POINTS_PER_CELL};

/// Score calculation result for one placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    pub placement_score: u32,
    pub line_clear_score: u32,
    pub combo_bonus: u32,
    pub total: u32,
}

/// Points for placing a piece of `cells` cells
pub fn calculate_placement_score(cells: usize) -> u32 {
    (cells as u32).saturating_mul(POINTS_PER_CELL)
}

/// Points for clearing `lines` rows/columns with one placement
pub fn calculate_line_score(lines: usize) -> u32 {
    let n = lines as u32;
    LINE_CLEAR_BASE.saturating_mul(n).saturating_mul(n)
}

/// Combo bonus.
///
/// `combo_index` counts clearing placements in a row:
/// - `0`: no chain / first clear (no bonus)
/// - `1+`: bonus applies as `COMBO_BASE * combo_index`
pub fn calculate_combo_bonus(combo_index: u32) -> u32 {
    COMBO_BASE.saturating_mul(combo_index)
}

/// Complete score for a placement of `cells` cells that cleared `lines` lines
pub fn calculate_score(cells: usize, lines: usize, combo_index: u32) -> ScoreResult {
    let placement_score = calculate_placement_score(cells);
    let line_clear_score = calculate_line_score(lines);
    let combo_bonus = if lines > 0 {
        calculate_combo_bonus(combo_index)
    } else {
        0
    };
    let total = placement_score
        .saturating_add(line_clear_score)
        .saturating_add(combo_bonus);

    ScoreResult {
        placement_score,
        line_clear_score,
        combo_bonus,
        total,
    }
}
