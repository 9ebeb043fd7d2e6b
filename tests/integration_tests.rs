//! Integration tests for the game session and scripted play

use blockfit::core::{Effect, RecordedEffects};
use blockfit::engine::{
    apply_place, begin_drag, drag_by, release, GameConfig, GameEvent, GameOverReason,
    GameSnapshot, PlaceOutcome,
};
use blockfit::engine::Game;
use blockfit::script::{Response, Runner};
use blockfit::types::{GameMode, GridPos, PieceId, Position, RACK_SIZE};

fn game(mode: GameMode, seed: u32) -> Game {
    let mut g = Game::new(GameConfig::default().with_mode(mode).with_seed(seed)).unwrap();
    g.drain_events();
    g
}

/// First origin, row-major, where the block in `slot` fits
fn first_fit(g: &Game, slot: usize) -> GridPos {
    let shape = g.rack().get(slot).unwrap().block.shape();
    for row in 0..g.board().rows() as i32 {
        for col in 0..g.board().cols() as i32 {
            let origin = GridPos::new(row, col);
            if g.board().fits_at(shape, origin) {
                return origin;
            }
        }
    }
    panic!("slot {} fits nowhere", slot);
}

#[test]
fn test_game_lifecycle() {
    let mut g = game(GameMode::Classic, 12345);
    assert!(g.playable());
    assert_eq!(g.rack().len(), RACK_SIZE);

    let mut placed = 0;
    for slot in 0..RACK_SIZE {
        let target = first_fit(&g, slot);
        if apply_place(&mut g, slot, target).unwrap().is_committed() {
            placed += 1;
        }
    }
    assert_eq!(placed, RACK_SIZE);
    assert_eq!(g.moves(), RACK_SIZE as u32);

    // The last placement emptied the rack, so a fresh set was dealt.
    assert_eq!(g.rack().len(), RACK_SIZE);
    let events = g.drain_events();
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::RackRefilled { .. })));
}

#[test]
fn test_drag_release_flow_matches_block_cells() {
    let mut g = game(GameMode::Classic, 3);
    let start = g.rack().get(0).unwrap().block.start_pos();

    begin_drag(&mut g, 0).unwrap();
    // Drag in small steps, ending off-center inside cell (1, 2).
    let target = Position::new(1.8, 2.1);
    let total = target - start;
    for _ in 0..4 {
        drag_by(&mut g, Position::new(total.row / 4.0, total.col / 4.0)).unwrap();
    }
    let expected = g.rack().get(0).unwrap().block.block_positions();

    let outcome = release(&mut g).unwrap();
    let placement = match outcome {
        PlaceOutcome::Committed(p) => p,
        other => panic!("expected commit, got {:?}", other),
    };
    assert_eq!(placement.cells, expected);
    for cell in &expected {
        assert!(g.board().is_occupied(*cell));
    }
}

#[test]
fn test_line_clear_scores_and_combos() {
    let mut g = game(GameMode::Classic, 21);
    let shape = g.rack().get(0).unwrap().block.shape().to_vec();
    let bottom = shape.iter().map(|o| o.row).max().unwrap_or(0);

    // Leave exactly the gaps the block's bottom row will fill on row 7.
    for col in 0..8 {
        let covered = shape.iter().any(|o| o.row == bottom && o.col == col);
        if !covered {
            g.board_mut().fill(GridPos::new(7, col), PieceId(999)).unwrap();
        }
    }

    let outcome = apply_place(&mut g, 0, GridPos::new(7 - bottom, 0)).unwrap();
    let placement = match outcome {
        PlaceOutcome::Committed(p) => p,
        other => panic!("expected commit, got {:?}", other),
    };
    assert_eq!(placement.lines.rows.as_slice(), &[7]);
    assert!(placement.lines.cols.is_empty());
    assert_eq!(placement.score.placement_score, 10 * shape.len() as u32);
    assert_eq!(placement.score.line_clear_score, 100);
    assert_eq!(placement.score.combo_bonus, 0);
    assert_eq!(g.score(), placement.score.total);
    assert_eq!(g.combo(), 1);
    assert_eq!(g.lines(), 1);
    for col in 0..8 {
        assert!(!g.board().is_occupied(GridPos::new(7, col)));
    }
    assert_eq!(g.board().filled_count(), shape.len() - shape.iter().filter(|o| o.row == bottom).count());
    assert!(g
        .drain_events()
        .iter()
        .any(|e| matches!(e, GameEvent::LinesCleared { rows, .. } if rows.contains(&7))));

    // A placement that clears nothing breaks the combo.
    let target = first_fit(&g, 1);
    apply_place(&mut g, 1, target).unwrap();
    assert_eq!(g.combo(), 0);
}

#[test]
fn test_effects_follow_commit_and_revert() {
    let config = GameConfig::default().with_seed(8);
    let mut g = Game::with_effects(config, RecordedEffects::new()).unwrap();
    let id = g.rack().get(0).unwrap().block.id();

    apply_place(&mut g, 0, GridPos::new(40, 40)).unwrap();
    let log = g.effects_mut().drain();
    assert!(matches!(log.as_slice(), [Effect::BlockMoved(..), Effect::BlockReverted(b, _)] if *b == id));

    // Dropped at the origin, the highlighted cells are the shape offsets.
    let shape = g.rack().get(0).unwrap().block.shape().to_vec();
    apply_place(&mut g, 0, GridPos::new(0, 0)).unwrap();
    let log = g.effects_mut().drain();
    assert_eq!(log[1], Effect::CellsHighlighted(shape));
    assert_eq!(log[2], Effect::HighlightCleared);
    assert!(matches!(log[3], Effect::BlockCommitted(b, p) if b == id && p == Position::new(0.5, 0.5)));
    let filled = log
        .iter()
        .filter(|e| matches!(e, Effect::CellFilled(_, PieceId(b)) if *b == id))
        .count();
    assert_eq!(filled, g.board().filled_count());
}

#[test]
fn test_blast_mode_spawns_bombs_on_interval() {
    let config = GameConfig {
        mode: GameMode::Blast,
        bomb_interval: 1,
        bomb_counter: 9,
        seed: 17,
        ..GameConfig::default()
    };
    let mut g = Game::new(config).unwrap();
    g.drain_events();

    apply_place(&mut g, 0, GridPos::new(0, 0)).unwrap();
    let bombs: Vec<_> = g.board().armed_bombs().collect();
    assert_eq!(bombs.len(), 1);
    assert_eq!(bombs[0].1, 9);
    let cell = g.board().get(bombs[0].0).unwrap();
    assert_eq!(cell.occupant(), Some(PieceId::BOMB));
    assert!(g
        .drain_events()
        .iter()
        .any(|e| matches!(e, GameEvent::BombArmed { counter: 9, .. })));

    // The next move counts the first bomb down before a new one spawns.
    let target = first_fit(&g, 1);
    assert!(apply_place(&mut g, 1, target).unwrap().is_committed());
    let mut counters: Vec<u8> = g.board().armed_bombs().map(|(_, n)| n).collect();
    counters.sort();
    assert_eq!(counters, vec![8, 9]);
}

#[test]
fn test_classic_mode_keeps_bomb_lines_on_board() {
    let mut g = game(GameMode::Classic, 4);
    assert!(!g.config().clear_removes_bomb_state());
    g.arm_bomb(GridPos::new(7, 7), 3).unwrap();
    for col in 0..7 {
        g.board_mut().fill(GridPos::new(7, col), PieceId(999)).unwrap();
    }

    let placed = apply_place(&mut g, 0, GridPos::new(0, 0)).unwrap();
    assert!(placed.is_committed());
    // Row 7 is full but holds an armed bomb, so it stays.
    for col in 0..8 {
        assert!(g.board().is_occupied(GridPos::new(7, col)));
    }
    // Counters do not tick outside bomb modes.
    assert_eq!(g.board().get(GridPos::new(7, 7)).unwrap().bomb_counter(), Some(3));
}

#[test]
fn test_snapshot_after_moves() {
    let mut g = game(GameMode::Classic, 99);
    apply_place(&mut g, 2, GridPos::new(1, 1)).unwrap();
    let snap = GameSnapshot::capture(&g);
    assert_eq!(snap.moves, 1);
    assert_eq!(snap.rack.len(), RACK_SIZE - 1);
    assert!(snap.rack.iter().all(|s| s.slot != 2));
    assert!(!snap.board.is_empty_at(1, 1));
    assert_eq!(snap.score, g.score());
}

#[test]
fn test_script_session_end_to_end() {
    let mut runner = Runner::new(GameConfig::default().with_seed(5)).unwrap();
    runner.game_mut().drain_events();
    let script = r#"
# pick up slot 0 and drop it far outside the board
{"type":"select","slot":0}
{"type":"drag","row":0.0,"col":30.0}
{"type":"release"}
{"type":"place","slot":0,"row":0,"col":0}
{"type":"place","slot":0,"row":0,"col":0}
{"type":"snapshot"}
"#;
    let mut out = Vec::new();
    let summary = runner.run(script.as_bytes(), &mut out).unwrap();
    assert_eq!(summary.commands, 6);
    assert_eq!(summary.errors, 1);

    let responses: Vec<Response> = String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(responses.len(), 6);
    for (i, r) in responses.iter().enumerate() {
        assert_eq!(r.seq(), i as u64 + 1);
    }
    assert!(matches!(&responses[4], Response::Error { code, .. } if code == "empty_slot"));
    match &responses[5] {
        Response::Snapshot { state, .. } => {
            assert_eq!(state.moves, 1);
            assert!(!state.board.is_empty_at(0, 0));
            assert_eq!(state.game_over, None::<GameOverReason>);
        }
        other => panic!("expected snapshot, got {:?}", other),
    }
}
