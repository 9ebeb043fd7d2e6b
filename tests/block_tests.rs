//! Block tests - position tracking, commit snapping and revert

use blockfit::core::{Block, BlockPhase, ShapeKind};
use blockfit::types::{GridPos, Position};

fn domino() -> Vec<GridPos> {
    vec![GridPos::new(0, 0), GridPos::new(0, 1)]
}

const STARTS: [(f32, f32); 6] = [
    (2.5, 3.5),
    (0.0, 0.0),
    (9.5, 0.5),
    (-0.5, 4.25),
    (7.99, 7.01),
    (-3.2, -1.7),
];

const DELTAS: [(f32, f32); 6] = [
    (1.0, 0.0),
    (-0.5, 0.5),
    (0.3, -2.7),
    (-6.0, 4.0),
    (12.25, -12.25),
    (0.0, 0.0),
];

#[test]
fn test_positions_after_init_are_offsets_plus_floor_start() {
    for kind in ShapeKind::ALL {
        for &(r, c) in &STARTS {
            let start = Position::new(r, c);
            let block = Block::new(1, kind.offsets(), start, kind.variant()).unwrap();
            let origin = GridPos::new(r.floor() as i32, c.floor() as i32);
            let expected: Vec<GridPos> = kind.offsets().iter().map(|&o| o + origin).collect();
            assert_eq!(block.block_positions(), expected, "{:?} at {:?}", kind, start);
        }
    }
}

#[test]
fn test_block_positions_is_idempotent() {
    let mut block = Block::new(1, domino(), Position::new(2.5, 3.5), 0).unwrap();
    assert_eq!(block.block_positions(), block.block_positions());

    block.update_pos(Position::new(0.7, -1.2));
    let first = block.block_positions();
    let second = block.block_positions();
    assert_eq!(first, second);

    let mut buf = Vec::new();
    block.block_positions_into(&mut buf);
    assert_eq!(buf, first);
}

#[test]
fn test_incorrect_move_restores_pre_drag_position() {
    for &(r, c) in &STARTS {
        for &(dr, dc) in &DELTAS {
            let mut block = Block::new(1, domino(), Position::new(r, c), 0).unwrap();
            let before = block.current_pos();
            block.update_pos(Position::new(dr, dc));
            block.update_incorrect_move();
            assert_eq!(block.current_pos(), before);
            assert_eq!(block.phase(), BlockPhase::Spawned);
        }
    }
}

#[test]
fn test_incorrect_move_after_commit_returns_to_commit() {
    let mut block = Block::new(1, domino(), Position::new(2.5, 3.5), 0).unwrap();
    block.update_pos(Position::new(1.2, 0.9));
    block.update_correct_move();
    let committed = block.current_pos();

    block.update_pos(Position::new(-4.0, 2.0));
    assert_eq!(block.phase(), BlockPhase::Dragging);
    block.update_incorrect_move();
    assert_eq!(block.current_pos(), committed);
    assert_eq!(block.phase(), BlockPhase::Committed);
}

#[test]
fn test_commit_snaps_to_cell_center_exactly() {
    for &(r, c) in &STARTS {
        for &(dr, dc) in &DELTAS {
            let mut block = Block::new(1, domino(), Position::new(r, c), 0).unwrap();
            block.update_pos(Position::new(dr, dc));
            let cells_before = block.block_positions();
            block.update_correct_move();

            let pos = block.current_pos();
            assert_eq!(pos.row - pos.row.floor(), 0.5, "row of {:?}", pos);
            assert_eq!(pos.col - pos.col.floor(), 0.5, "col of {:?}", pos);
            assert!(pos.is_cell_centered());
            assert_eq!(block.previous_pos(), pos);
            // Snapping never changes which cells are covered.
            assert_eq!(block.block_positions(), cells_before);
        }
    }
}

#[test]
fn test_scenario_a_domino_positions() {
    let block = Block::new(1, domino(), Position::new(2.5, 3.5), 0).unwrap();
    assert_eq!(
        block.block_positions(),
        vec![GridPos::new(2, 3), GridPos::new(2, 4)]
    );
}

#[test]
fn test_scenario_b_aligned_commit() {
    let mut block = Block::new(1, domino(), Position::new(2.5, 3.5), 0).unwrap();
    block.update_pos(Position::new(1.0, 0.0));
    assert_eq!(block.current_pos(), Position::new(3.5, 3.5));

    block.update_correct_move();
    assert_eq!(block.current_pos(), Position::new(3.5, 3.5));
    assert_eq!(block.previous_pos(), Position::new(3.5, 3.5));
    assert_eq!(block.start_pos(), Position::new(2.5, 3.5));
}

#[test]
fn test_start_move_forgets_commit() {
    let mut block = Block::new(1, domino(), Position::new(9.5, 0.5), 0).unwrap();
    block.update_pos(Position::new(-5.0, 2.0));
    block.update_correct_move();
    block.update_start_move();

    assert_eq!(block.current_pos(), Position::new(9.5, 0.5));
    assert_eq!(block.previous_pos(), Position::new(9.5, 0.5));
    assert_eq!(block.phase(), BlockPhase::Spawned);

    // A revert now goes back to spawn, not the forgotten commit.
    block.update_pos(Position::new(-1.0, 0.0));
    block.update_incorrect_move();
    assert_eq!(block.current_pos(), Position::new(9.5, 0.5));
}

#[test]
fn test_far_drag_reports_out_of_range_cells() {
    let vertical = vec![GridPos::new(0, 0), GridPos::new(1, 0)];
    let mut block = Block::new(1, vertical, Position::new(0.5, 0.5), 0).unwrap();
    block.update_pos(Position::new(3.0e9, 0.0));
    let cells = block.block_positions();
    assert_eq!(cells, vec![GridPos::new(i32::MAX, 0), GridPos::new(i32::MAX, 0)]);

    block.update_pos(Position::new(-6.0e9, -6.0e9));
    assert!(block.block_positions().iter().all(|p| p.row < 0 && p.col < 0));

    block.update_incorrect_move();
    assert_eq!(block.block_positions(), vec![GridPos::new(0, 0), GridPos::new(1, 0)]);
}
