//! Game session - ties board, rack, scoring and bombs together
//!
//! Placement input goes through the [`place`](crate::place) functions; this
//! module owns what happens once a block has been committed: line clears,
//! scoring, bomb countdown and spawning, rack refills and game over.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{ConfigError, GameConfig};
use crate::core::{
    calculate_score, Board, BoardError, CellError, ClearedLines, Effects, LineClear, NoEffects,
    ShapePicker,
};
use crate::events::{GameEvent, GameOverReason};
use crate::place::Placement;
use crate::rack::{Rack, RackPiece};
use crate::timer::RoundTimer;
use crate::types::{GameMode, GridPos, PieceId, MAX_BOARD_DIM};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArmError {
    #[error("game is not playable")]
    NotPlayable,
    #[error(transparent)]
    Board(#[from] BoardError),
}

impl ArmError {
    pub fn code(self) -> &'static str {
        match self {
            ArmError::NotPlayable => "not_playable",
            ArmError::Board(err) => err.code(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Game<E: Effects = NoEffects> {
    pub(crate) config: GameConfig,
    pub(crate) board: Board,
    pub(crate) rack: Rack,
    picker: ShapePicker,
    pub(crate) effects: E,
    timer: Option<RoundTimer>,
    /// Rack slot of the block being dragged
    pub(crate) dragging: Option<usize>,
    /// Cells lit by the drop preview; empty when nothing would fit
    highlight: Vec<GridPos>,
    next_block_id: u32,
    score: u32,
    combo: u32,
    moves: u32,
    lines: u32,
    game_over: Option<GameOverReason>,
    pub(crate) events: Vec<GameEvent>,
}

impl Game<NoEffects> {
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_effects(config, NoEffects)
    }
}

impl<E: Effects> Game<E> {
    /// Create a game that reports presentation hooks to `effects`
    pub fn with_effects(config: GameConfig, effects: E) -> Result<Self, ConfigError> {
        config.validate()?;
        let board =
            Board::new(config.rows, config.cols).map_err(|_| ConfigError::InvalidDimensions {
                rows: config.rows,
                cols: config.cols,
                max: MAX_BOARD_DIM,
            })?;
        let timer = config
            .mode
            .is_timed()
            .then(|| RoundTimer::new(config.round_time_ms));

        let mut game = Self {
            picker: ShapePicker::new(config.seed),
            config,
            board,
            rack: Rack::new(),
            effects,
            timer,
            dragging: None,
            highlight: Vec::new(),
            next_block_id: 1,
            score: 0,
            combo: 0,
            moves: 0,
            lines: 0,
            game_over: None,
            events: Vec::new(),
        };
        game.refill_rack();
        game.check_no_fit();
        debug!(mode = game.config.mode.as_str(), seed = game.config.seed, "game created");
        Ok(game)
    }

    /// Start over with the same configuration and seed
    pub fn restart(&mut self) {
        self.board.clear();
        self.rack.clear();
        self.picker = ShapePicker::new(self.config.seed);
        if let Some(timer) = self.timer.as_mut() {
            timer.reset();
        }
        self.dragging = None;
        self.clear_highlight();
        self.next_block_id = 1;
        self.score = 0;
        self.combo = 0;
        self.moves = 0;
        self.lines = 0;
        self.game_over = None;
        self.events.clear();
        self.refill_rack();
        self.check_no_fit();
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn mode(&self) -> GameMode {
        self.config.mode
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for scripted setups and tests.
    ///
    /// Changes made here skip scoring, events and effects.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn rack(&self) -> &Rack {
        &self.rack
    }

    pub fn effects(&self) -> &E {
        &self.effects
    }

    pub fn effects_mut(&mut self) -> &mut E {
        &mut self.effects
    }

    pub fn timer(&self) -> Option<&RoundTimer> {
        self.timer.as_ref()
    }

    pub fn dragging(&self) -> Option<usize> {
        self.dragging
    }

    /// Cells the dragged block would fill if dropped now
    pub fn highlight(&self) -> &[GridPos] {
        &self.highlight
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    /// Committed placements so far
    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn game_over(&self) -> bool {
        self.game_over.is_some()
    }

    pub fn game_over_reason(&self) -> Option<GameOverReason> {
        self.game_over
    }

    pub fn playable(&self) -> bool {
        self.game_over.is_none()
    }

    /// Take the queued events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Advance the round timer (timed modes only)
    pub fn tick(&mut self, elapsed_ms: u32) {
        if !self.playable() {
            return;
        }
        let Some(timer) = self.timer.as_mut() else {
            return;
        };
        if timer.tick(elapsed_ms) {
            self.events.push(GameEvent::TimeUp);
            self.end_game(GameOverReason::TimeUp);
        }
    }

    /// Arm a bomb on `pos`. An empty cell is filled with the hazard occupant
    /// before it is armed.
    pub fn arm_bomb(&mut self, pos: GridPos, counter: u8) -> Result<(), ArmError> {
        if !self.playable() {
            return Err(ArmError::NotPlayable);
        }
        if self.board.is_out_of_bounds(pos) {
            return Err(BoardError::OutOfBounds(pos).into());
        }
        if counter == 0 {
            return Err(BoardError::Cell {
                pos,
                source: CellError::ZeroCounter,
            }
            .into());
        }
        if !self.board.is_occupied(pos) {
            self.board.fill(pos, PieceId::BOMB)?;
            self.effects.cell_filled(pos, PieceId::BOMB);
        }
        self.board.convert_to_bomb(pos, counter)?;
        self.effects.counter_changed(pos, Some(counter));
        self.events.push(GameEvent::BombArmed { cell: pos, counter });
        debug!(%pos, counter, "bomb armed");
        Ok(())
    }

    pub(crate) fn set_highlight(&mut self, cells: &[GridPos]) {
        if self.highlight != cells {
            self.highlight.clear();
            self.highlight.extend_from_slice(cells);
            self.effects.cells_highlighted(cells);
        }
    }

    pub(crate) fn clear_highlight(&mut self) {
        if !self.highlight.is_empty() {
            self.highlight.clear();
            self.effects.highlight_cleared();
        }
    }

    /// Resolve a committed block: fill its cells, clear lines, score, run the
    /// bomb rules and deal a new rack when the last slot was used.
    pub(crate) fn commit_placement(
        &mut self,
        slot: usize,
        piece: RackPiece,
        cells: Vec<GridPos>,
    ) -> Placement {
        let block = piece.block.id();
        let occupant = PieceId(block);
        let fit = self.board.place(&cells, occupant);
        debug_assert!(fit.is_fit(), "commit after failed fit check: {:?}", fit);
        for &cell in &cells {
            self.effects.cell_filled(cell, occupant);
        }
        self.moves += 1;

        let (lines, cleared) = self.clear_full_lines();
        let combo_index = if lines.is_empty() {
            self.combo = 0;
            0
        } else {
            self.combo += 1;
            self.combo - 1
        };
        let score = calculate_score(cells.len(), lines.count(), combo_index);
        self.score = self.score.saturating_add(score.total);
        self.lines += lines.count() as u32;

        debug!(slot, block, cells = cells.len(), points = score.total, "block placed");
        self.events.push(GameEvent::Placed {
            slot,
            block,
            cells: cells.clone(),
            points: score.total,
        });
        if !lines.is_empty() {
            self.events.push(GameEvent::LinesCleared {
                rows: lines.rows.to_vec(),
                cols: lines.cols.to_vec(),
                cells: cleared.cells.len(),
                defused: cleared.defused.clone(),
            });
        }

        let mut bombs_over = Vec::new();
        if self.config.mode.bomb_counters_active() {
            bombs_over = self.tick_bombs();
            if !bombs_over.is_empty() {
                self.end_game(GameOverReason::BombExploded);
            } else if self.config.mode == GameMode::Blast
                && self.moves % self.config.bomb_interval == 0
            {
                self.spawn_bomb();
            }
        }

        if self.playable() {
            self.refill_rack();
            self.check_no_fit();
        }

        Placement {
            slot,
            block,
            cells,
            lines,
            cleared,
            score,
            bombs_over,
        }
    }

    /// Clear every full line. Without bomb-state removal, lines that hold an
    /// armed bomb stay on the board.
    fn clear_full_lines(&mut self) -> (ClearedLines, LineClear) {
        let remove_bomb_state = self.config.clear_removes_bomb_state();
        let mut lines = self.board.full_lines();
        if !remove_bomb_state {
            let bombs: Vec<GridPos> = self.board.armed_bombs().map(|(pos, _)| pos).collect();
            lines
                .rows
                .retain(|r| !bombs.iter().any(|b| b.row == i32::from(*r)));
            lines
                .cols
                .retain(|c| !bombs.iter().any(|b| b.col == i32::from(*c)));
        }
        if lines.is_empty() {
            return (lines, LineClear::default());
        }

        match self.board.clear_lines(&lines, remove_bomb_state) {
            Ok(cleared) => {
                for &cell in &cleared.cells {
                    self.effects.cell_cleared(cell);
                }
                for &cell in &cleared.defused {
                    self.effects.counter_changed(cell, None);
                }
                (lines, cleared)
            }
            Err(err) => {
                warn!(code = err.code(), %err, "line clear rejected");
                (ClearedLines::default(), LineClear::default())
            }
        }
    }

    /// The per-move bomb tick. Returns the cells whose counter ran out.
    fn tick_bombs(&mut self) -> Vec<GridPos> {
        let over = self.board.tick_bombs();
        for (pos, counter) in self.board.armed_bombs() {
            self.effects.counter_changed(pos, Some(counter));
        }
        for &pos in &over {
            self.effects.counter_changed(pos, Some(0));
            self.effects.bomb_counter_over(pos);
            self.events.push(GameEvent::BombCounterOver { cell: pos });
        }
        over
    }

    fn spawn_bomb(&mut self) {
        let empty: Vec<GridPos> = self.board.empty_cells().collect();
        let Some(&pos) = self.picker.rng_mut().choose(&empty) else {
            debug!("no empty cell for a bomb");
            return;
        };
        if let Err(err) = self.arm_bomb(pos, self.config.bomb_counter) {
            warn!(code = err.code(), %err, "bomb spawn rejected");
        }
    }

    fn refill_rack(&mut self) {
        if !self.rack.is_empty() {
            return;
        }
        let dealt = self.rack.deal(
            &mut self.picker,
            &mut self.next_block_id,
            self.board.rows(),
            self.board.cols(),
        );
        debug!(?dealt, "rack dealt");
        self.events.push(GameEvent::RackRefilled {
            shapes: dealt.iter().map(|k| k.as_str().to_string()).collect(),
        });
    }

    fn check_no_fit(&mut self) {
        if !self.playable() || self.rack.is_empty() {
            return;
        }
        let board = &self.board;
        let any_fits = self
            .rack
            .pieces()
            .any(|(_, piece)| board.fits_anywhere(piece.block.shape()));
        if !any_fits {
            self.end_game(GameOverReason::NoFit);
        }
    }

    pub(crate) fn end_game(&mut self, reason: GameOverReason) {
        if self.game_over.is_some() {
            return;
        }
        info!(
            reason = reason.as_str(),
            score = self.score,
            moves = self.moves,
            "game over"
        );
        self.game_over = Some(reason);
        self.events.push(GameEvent::GameOver { reason });
    }
}
