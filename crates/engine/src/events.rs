use serde::{Deserialize, Serialize};

use crate::types::GridPos;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOverReason {
    /// No rack block fits anywhere on the board
    NoFit,
    /// A bomb counter reached zero
    BombExploded,
    TimeUp,
}

impl GameOverReason {
    pub fn as_str(self) -> &'static str {
        match self {
            GameOverReason::NoFit => "no_fit",
            GameOverReason::BombExploded => "bomb_exploded",
            GameOverReason::TimeUp => "time_up",
        }
    }
}

/// Something that happened during a game step, queued until drained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    Placed {
        slot: usize,
        block: u32,
        cells: Vec<GridPos>,
        points: u32,
    },
    Reverted {
        slot: usize,
        block: u32,
        reason: String,
    },
    LinesCleared {
        rows: Vec<u8>,
        cols: Vec<u8>,
        cells: usize,
        defused: Vec<GridPos>,
    },
    BombArmed {
        cell: GridPos,
        counter: u8,
    },
    BombCounterOver {
        cell: GridPos,
    },
    RackRefilled {
        shapes: Vec<String>,
    },
    TimeUp,
    GameOver {
        reason: GameOverReason,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_tag() {
        let e = GameEvent::BombCounterOver {
            cell: GridPos::new(2, 3),
        };
        let json = serde_json::to_string(&e).unwrap();
        assert_eq!(
            json,
            r#"{"event":"bomb_counter_over","cell":{"row":2,"col":3}}"#
        );

        let json = serde_json::to_string(&GameEvent::GameOver {
            reason: GameOverReason::NoFit,
        })
        .unwrap();
        assert_eq!(json, r#"{"event":"game_over","reason":"no_fit"}"#);
    }
}
