//! Protocol module - line-delimited JSON commands and responses
//!
//! Every input line is one [`Command`] tagged by `type`; every command gets
//! exactly one [`Response`] line carrying the same `seq` (1-based index of the
//! command in the stream).

use serde::{Deserialize, Serialize};

use crate::engine::types::GridPos;
use crate::engine::{GameEvent, GameSnapshot, Preview};

// ============== Client -> Game ==============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// Pick up the block in a rack slot
    Select { slot: usize },
    /// Move the picked-up block by a delta in board units
    Drag { row: f32, col: f32 },
    /// Drop the picked-up block
    Release,
    /// Drag the block in `slot` so its origin lands on (row, col) and drop it
    Place { slot: usize, row: i32, col: i32 },
    /// Return every rack block to its spawn position
    Return,
    /// Advance the round timer
    Tick { ms: u32 },
    /// Arm a bomb on a cell (scripted challenge setups)
    Bomb {
        row: i32,
        col: i32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        counter: Option<u8>,
    },
    Restart,
    Snapshot,
}

// ============== Game -> Client ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropOutcome {
    Committed,
    Reverted,
}

/// Cells a dragged block would fill, sent with every `drag` ack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropPreview {
    pub cells: Vec<GridPos>,
    /// `fits`, `out_of_bounds` or `occupied`
    pub fit: String,
}

impl From<Preview> for DropPreview {
    fn from(preview: Preview) -> Self {
        Self {
            cells: preview.cells,
            fit: preview.fit.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    Ack {
        seq: u64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        outcome: Option<DropOutcome>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        preview: Option<DropPreview>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        events: Vec<GameEvent>,
    },
    Error {
        seq: u64,
        code: String,
        message: String,
    },
    Snapshot {
        seq: u64,
        state: Box<GameSnapshot>,
    },
}

impl Response {
    pub fn seq(&self) -> u64 {
        match self {
            Response::Ack { seq, .. } | Response::Error { seq, .. } | Response::Snapshot { seq, .. } => {
                *seq
            }
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Response::Error { .. })
    }
}

pub fn parse_command(line: &str) -> Result<Command, serde_json::Error> {
    serde_json::from_str(line)
}

pub fn create_ack(seq: u64, outcome: Option<DropOutcome>, events: Vec<GameEvent>) -> Response {
    Response::Ack {
        seq,
        outcome,
        preview: None,
        events,
    }
}

pub fn create_drag_ack(seq: u64, preview: DropPreview, events: Vec<GameEvent>) -> Response {
    Response::Ack {
        seq,
        outcome: None,
        preview: Some(preview),
        events,
    }
}

pub fn create_error(seq: u64, code: &str, message: impl Into<String>) -> Response {
    Response::Error {
        seq,
        code: code.to_string(),
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_each_command() {
        let cases = [
            (r#"{"type":"select","slot":0}"#, Command::Select { slot: 0 }),
            (
                r#"{"type":"drag","row":1.0,"col":-0.5}"#,
                Command::Drag { row: 1.0, col: -0.5 },
            ),
            (r#"{"type":"release"}"#, Command::Release),
            (
                r#"{"type":"place","slot":2,"row":3,"col":4}"#,
                Command::Place {
                    slot: 2,
                    row: 3,
                    col: 4,
                },
            ),
            (r#"{"type":"return"}"#, Command::Return),
            (r#"{"type":"tick","ms":16}"#, Command::Tick { ms: 16 }),
            (
                r#"{"type":"bomb","row":1,"col":1}"#,
                Command::Bomb {
                    row: 1,
                    col: 1,
                    counter: None,
                },
            ),
            (r#"{"type":"restart"}"#, Command::Restart),
            (r#"{"type":"snapshot"}"#, Command::Snapshot),
        ];
        for (json, expected) in cases {
            assert_eq!(parse_command(json).unwrap(), expected, "{json}");
        }
    }

    #[test]
    fn parse_rejects_unknown_or_malformed() {
        assert!(parse_command(r#"{"type":"rotate"}"#).is_err());
        assert!(parse_command(r#"{"type":"select"}"#).is_err());
        assert!(parse_command("not json").is_err());
    }

    #[test]
    fn ack_omits_empty_fields() {
        let json = serde_json::to_string(&create_ack(3, None, Vec::new())).unwrap();
        assert_eq!(json, r#"{"type":"ack","seq":3}"#);

        let json =
            serde_json::to_string(&create_ack(4, Some(DropOutcome::Reverted), Vec::new())).unwrap();
        assert_eq!(json, r#"{"type":"ack","seq":4,"outcome":"reverted"}"#);
    }

    #[test]
    fn drag_ack_carries_preview() {
        let preview = DropPreview {
            cells: vec![GridPos::new(0, 0), GridPos::new(0, 1)],
            fit: "fits".to_string(),
        };
        let json = serde_json::to_string(&create_drag_ack(2, preview, Vec::new())).unwrap();
        assert_eq!(
            json,
            r#"{"type":"ack","seq":2,"preview":{"cells":[{"row":0,"col":0},{"row":0,"col":1}],"fit":"fits"}}"#
        );
    }

    #[test]
    fn error_carries_code_and_message() {
        let err = create_error(7, "empty_slot", "rack slot 1 is empty");
        assert!(err.is_error());
        assert_eq!(err.seq(), 7);
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(
            json,
            r#"{"type":"error","seq":7,"code":"empty_slot","message":"rack slot 1 is empty"}"#
        );
    }
}
