//! Runner - drives a game from a command stream

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::engine::core::{Effects, NoEffects};
use crate::engine::types::{GridPos, Position};
use crate::engine::{
    apply_place, begin_drag, drag_by, release, return_all, Game, GameConfig, GameSnapshot,
    PlaceError, PlaceOutcome,
};
use crate::protocol::{
    create_ack, create_drag_ack, create_error, parse_command, Command, DropOutcome, Response,
};

/// Totals for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub commands: u64,
    pub errors: u64,
}

pub struct Runner<E: Effects = NoEffects> {
    game: Game<E>,
    seq: u64,
}

impl Runner<NoEffects> {
    pub fn new(config: GameConfig) -> Result<Self> {
        let game = Game::new(config).context("invalid game configuration")?;
        Ok(Self::with_game(game))
    }
}

impl<E: Effects> Runner<E> {
    pub fn with_game(game: Game<E>) -> Self {
        Self { game, seq: 0 }
    }

    pub fn game(&self) -> &Game<E> {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut Game<E> {
        &mut self.game
    }

    /// Handle one input line. Blank lines and `#` comments produce nothing.
    pub fn handle_line(&mut self, line: &str) -> Option<Response> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        self.seq += 1;
        let seq = self.seq;
        match parse_command(line) {
            Ok(cmd) => Some(self.execute(seq, cmd)),
            Err(e) => {
                warn!(seq, error = %e, "invalid command");
                Some(create_error(seq, "invalid_command", e.to_string()))
            }
        }
    }

    pub fn execute(&mut self, seq: u64, cmd: Command) -> Response {
        debug!(seq, ?cmd, "command");
        let game = &mut self.game;
        let outcome = match cmd {
            Command::Select { slot } => begin_drag(game, slot).map(|()| None),
            Command::Drag { row, col } => {
                return match drag_by(game, Position::new(row, col)) {
                    Ok(preview) => create_drag_ack(seq, preview.into(), game.drain_events()),
                    Err(err) => place_error(seq, err),
                };
            }
            Command::Release => release(game).map(|o| Some(drop_outcome(&o))),
            Command::Place { slot, row, col } => {
                apply_place(game, slot, GridPos::new(row, col)).map(|o| Some(drop_outcome(&o)))
            }
            Command::Return => {
                return_all(game);
                Ok(None)
            }
            Command::Tick { ms } => {
                game.tick(ms);
                Ok(None)
            }
            Command::Bomb { row, col, counter } => {
                let counter = counter.unwrap_or(game.config().bomb_counter);
                if let Err(err) = game.arm_bomb(GridPos::new(row, col), counter) {
                    return create_error(seq, err.code(), err.to_string());
                }
                Ok(None)
            }
            Command::Restart => {
                game.restart();
                Ok(None)
            }
            Command::Snapshot => {
                return Response::Snapshot {
                    seq,
                    state: Box::new(GameSnapshot::capture(game)),
                };
            }
        };

        match outcome {
            Ok(outcome) => create_ack(seq, outcome, game.drain_events()),
            Err(err) => place_error(seq, err),
        }
    }

    /// Read commands until EOF, writing one response line per command
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<RunSummary> {
        let mut summary = RunSummary::default();
        for line in input.lines() {
            let line = line.context("failed to read command line")?;
            let Some(response) = self.handle_line(&line) else {
                continue;
            };
            summary.commands += 1;
            if response.is_error() {
                summary.errors += 1;
            }
            serde_json::to_writer(&mut output, &response).context("failed to encode response")?;
            output
                .write_all(b"\n")
                .context("failed to write response")?;
        }
        output.flush().context("failed to flush output")?;
        Ok(summary)
    }
}

fn drop_outcome(outcome: &PlaceOutcome) -> DropOutcome {
    match outcome {
        PlaceOutcome::Committed(_) => DropOutcome::Committed,
        PlaceOutcome::Reverted(_) => DropOutcome::Reverted,
    }
}

fn place_error(seq: u64, err: PlaceError) -> Response {
    create_error(seq, err.code(), err.to_string())
}
