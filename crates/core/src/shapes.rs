//! Shapes module - the block-puzzle piece catalog
//!
//! Offsets are `(row, col)` relative to the piece origin and normalized so the
//! smallest row and column are both 0. Pieces never rotate once dealt; every
//! orientation is its own catalog entry.

use crate::types::GridPos;

/// Piece shapes offered to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Single,
    DominoH,
    DominoV,
    Line3H,
    Line3V,
    Line4H,
    Line4V,
    Line5H,
    Line5V,
    Square2,
    Square3,
    /// 3-cell corner, corner cell at bottom-left
    CornerSmallBl,
    CornerSmallTl,
    CornerSmallTr,
    CornerSmallBr,
    /// 5-cell corner (3x3 L), corner cell at bottom-left
    CornerLargeBl,
    CornerLargeTl,
    CornerLargeTr,
    CornerLargeBr,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 19] = [
        ShapeKind::Single,
        ShapeKind::DominoH,
        ShapeKind::DominoV,
        ShapeKind::Line3H,
        ShapeKind::Line3V,
        ShapeKind::Line4H,
        ShapeKind::Line4V,
        ShapeKind::Line5H,
        ShapeKind::Line5V,
        ShapeKind::Square2,
        ShapeKind::Square3,
        ShapeKind::CornerSmallBl,
        ShapeKind::CornerSmallTl,
        ShapeKind::CornerSmallTr,
        ShapeKind::CornerSmallBr,
        ShapeKind::CornerLargeBl,
        ShapeKind::CornerLargeTl,
        ShapeKind::CornerLargeTr,
        ShapeKind::CornerLargeBr,
    ];

    /// Raw `(row, col)` offsets
    pub fn cells(self) -> &'static [(i32, i32)] {
        match self {
            ShapeKind::Single => &[(0, 0)],
            ShapeKind::DominoH => &[(0, 0), (0, 1)],
            ShapeKind::DominoV => &[(0, 0), (1, 0)],
            ShapeKind::Line3H => &[(0, 0), (0, 1), (0, 2)],
            ShapeKind::Line3V => &[(0, 0), (1, 0), (2, 0)],
            ShapeKind::Line4H => &[(0, 0), (0, 1), (0, 2), (0, 3)],
            ShapeKind::Line4V => &[(0, 0), (1, 0), (2, 0), (3, 0)],
            ShapeKind::Line5H => &[(0, 0), (0, 1), (0, 2), (0, 3), (0, 4)],
            ShapeKind::Line5V => &[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)],
            ShapeKind::Square2 => &[(0, 0), (0, 1), (1, 0), (1, 1)],
            ShapeKind::Square3 => &[
                (0, 0),
                (0, 1),
                (0, 2),
                (1, 0),
                (1, 1),
                (1, 2),
                (2, 0),
                (2, 1),
                (2, 2),
            ],
            ShapeKind::CornerSmallBl => &[(0, 0), (1, 0), (1, 1)],
            ShapeKind::CornerSmallTl => &[(0, 0), (0, 1), (1, 0)],
            ShapeKind::CornerSmallTr => &[(0, 0), (0, 1), (1, 1)],
            ShapeKind::CornerSmallBr => &[(0, 1), (1, 0), (1, 1)],
            ShapeKind::CornerLargeBl => &[(0, 0), (1, 0), (2, 0), (2, 1), (2, 2)],
            ShapeKind::CornerLargeTl => &[(0, 0), (0, 1), (0, 2), (1, 0), (2, 0)],
            ShapeKind::CornerLargeTr => &[(0, 0), (0, 1), (0, 2), (1, 2), (2, 2)],
            ShapeKind::CornerLargeBr => &[(0, 2), (1, 2), (2, 0), (2, 1), (2, 2)],
        }
    }

    /// Offsets as grid positions, ready for [`crate::Block::new`]
    pub fn offsets(self) -> Vec<GridPos> {
        self.cells().iter().copied().map(GridPos::from).collect()
    }

    pub fn cell_count(self) -> usize {
        self.cells().len()
    }

    /// Sprite variant used when this shape is dealt
    pub fn variant(self) -> u8 {
        match self {
            ShapeKind::Single => 0,
            ShapeKind::DominoH | ShapeKind::DominoV => 1,
            ShapeKind::Line3H | ShapeKind::Line3V => 2,
            ShapeKind::Line4H | ShapeKind::Line4V => 3,
            ShapeKind::Line5H | ShapeKind::Line5V => 4,
            ShapeKind::Square2 => 5,
            ShapeKind::Square3 => 6,
            ShapeKind::CornerSmallBl
            | ShapeKind::CornerSmallTl
            | ShapeKind::CornerSmallTr
            | ShapeKind::CornerSmallBr => 7,
            ShapeKind::CornerLargeBl
            | ShapeKind::CornerLargeTl
            | ShapeKind::CornerLargeTr
            | ShapeKind::CornerLargeBr => 8,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ShapeKind::Single => "single",
            ShapeKind::DominoH => "domino_h",
            ShapeKind::DominoV => "domino_v",
            ShapeKind::Line3H => "line3_h",
            ShapeKind::Line3V => "line3_v",
            ShapeKind::Line4H => "line4_h",
            ShapeKind::Line4V => "line4_v",
            ShapeKind::Line5H => "line5_h",
            ShapeKind::Line5V => "line5_v",
            ShapeKind::Square2 => "square2",
            ShapeKind::Square3 => "square3",
            ShapeKind::CornerSmallBl => "corner_small_bl",
            ShapeKind::CornerSmallTl => "corner_small_tl",
            ShapeKind::CornerSmallTr => "corner_small_tr",
            ShapeKind::CornerSmallBr => "corner_small_br",
            ShapeKind::CornerLargeBl => "corner_large_bl",
            ShapeKind::CornerLargeTl => "corner_large_tl",
            ShapeKind::CornerLargeTr => "corner_large_tr",
            ShapeKind::CornerLargeBr => "corner_large_br",
        }
    }

    /// Parse from the `as_str` name
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shapes_are_normalized_and_unique() {
        for kind in ShapeKind::ALL {
            let cells = kind.cells();
            assert!(!cells.is_empty(), "{:?} is empty", kind);
            assert_eq!(cells.iter().map(|c| c.0).min(), Some(0), "{:?}", kind);
            assert_eq!(cells.iter().map(|c| c.1).min(), Some(0), "{:?}", kind);
            for (i, c) in cells.iter().enumerate() {
                assert!(!cells[..i].contains(c), "{:?} repeats {:?}", kind, c);
            }
        }
    }

    #[test]
    fn names_roundtrip() {
        for kind in ShapeKind::ALL {
            assert_eq!(ShapeKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(ShapeKind::from_str("tetromino"), None);
    }
}
