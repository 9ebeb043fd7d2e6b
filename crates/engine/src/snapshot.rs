use serde::{Deserialize, Serialize};

use crate::core::{BoardSnapshot, Effects};
use crate::events::GameOverReason;
use crate::game::Game;
use crate::types::{GameMode, GridPos};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RackSlotSnapshot {
    pub slot: usize,
    pub block: u32,
    pub shape: String,
    /// Live position in board space
    pub row: f32,
    pub col: f32,
    /// Cells the block would cover if dropped now
    pub cells: Vec<GridPos>,
}

/// Serializable view of a whole game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub mode: GameMode,
    pub board: BoardSnapshot,
    pub rack: Vec<RackSlotSnapshot>,
    pub dragging: Option<usize>,
    /// Cells lit by the drop preview
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub highlight: Vec<GridPos>,
    pub score: u32,
    pub combo: u32,
    pub moves: u32,
    pub lines: u32,
    pub time_remaining_ms: Option<u32>,
    pub game_over: Option<GameOverReason>,
}

impl GameSnapshot {
    pub fn capture<E: Effects>(game: &Game<E>) -> Self {
        let rack = game
            .rack()
            .pieces()
            .map(|(slot, piece)| {
                let pos = piece.block.current_pos();
                RackSlotSnapshot {
                    slot,
                    block: piece.block.id(),
                    shape: piece.kind.as_str().to_string(),
                    row: pos.row,
                    col: pos.col,
                    cells: piece.block.block_positions(),
                }
            })
            .collect();

        Self {
            mode: game.mode(),
            board: BoardSnapshot::capture(game.board()),
            rack,
            dragging: game.dragging(),
            highlight: game.highlight().to_vec(),
            score: game.score(),
            combo: game.combo(),
            moves: game.moves(),
            lines: game.lines(),
            time_remaining_ms: game.timer().map(|t| t.remaining_ms()),
            game_over: game.game_over_reason(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::types::RACK_SIZE;

    #[test]
    fn capture_lists_rack_and_timer() {
        let config = GameConfig::default().with_mode(GameMode::Timed);
        let game = Game::new(config).unwrap();
        let snap = GameSnapshot::capture(&game);

        assert_eq!(snap.mode, GameMode::Timed);
        assert_eq!(snap.rack.len(), RACK_SIZE);
        assert_eq!(snap.rack[0].row, 9.5);
        assert_eq!(snap.time_remaining_ms, Some(game.config().round_time_ms));
        assert_eq!(snap.board.cells.len(), 8);
        assert!(snap.game_over.is_none());
        assert!(snap.highlight.is_empty());

        let json = serde_json::to_string(&snap).unwrap();
        assert!(json.contains("\"mode\":\"timed\""));
        let back: GameSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snap);
    }
}
