//! Game configuration.
//!
//! Defaults come from the shared constants; `from_env` overrides them from
//! `BLOCKFIT_*` environment variables, and the struct deserializes from JSON
//! with every field optional.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{
    GameMode, DEFAULT_BOARD_COLS, DEFAULT_BOARD_ROWS, DEFAULT_BOMB_COUNTER, DEFAULT_BOMB_INTERVAL,
    DEFAULT_ROUND_TIME_MS, MAX_BOARD_DIM,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rows: usize,
    pub cols: usize,
    pub mode: GameMode,
    pub seed: u32,
    /// Counter a newly armed bomb starts with
    pub bomb_counter: u8,
    /// Moves between bomb spawns (blast mode)
    pub bomb_interval: u32,
    /// Round length for timed modes
    pub round_time_ms: u32,
    /// Whether clearing a line also removes bomb state from its cells.
    /// `None` follows the mode (on whenever bomb counters are active).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clear_removes_bomb_state: Option<bool>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_BOARD_ROWS as usize,
            cols: DEFAULT_BOARD_COLS as usize,
            mode: GameMode::Classic,
            seed: 1,
            bomb_counter: DEFAULT_BOMB_COUNTER,
            bomb_interval: DEFAULT_BOMB_INTERVAL,
            round_time_ms: DEFAULT_ROUND_TIME_MS,
            clear_removes_bomb_state: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board dimensions {rows}x{cols} are outside 1..={max}")]
    InvalidDimensions { rows: usize, cols: usize, max: usize },
    #[error("bomb counter must be positive")]
    ZeroBombCounter,
    #[error("bomb interval must be positive")]
    ZeroBombInterval,
    #[error("round time must be positive")]
    ZeroRoundTime,
}

impl ConfigError {
    pub fn code(self) -> &'static str {
        match self {
            ConfigError::InvalidDimensions { .. } => "invalid_dimensions",
            ConfigError::ZeroBombCounter => "zero_bomb_counter",
            ConfigError::ZeroBombInterval => "zero_bomb_interval",
            ConfigError::ZeroRoundTime => "zero_round_time",
        }
    }
}

impl GameConfig {
    /// Create from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        use std::env;

        fn parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
            env::var(key).ok().and_then(|s| s.trim().parse().ok())
        }

        let defaults = Self::default();
        let mode = env::var("BLOCKFIT_MODE")
            .ok()
            .and_then(|s| GameMode::from_str(s.trim()))
            .unwrap_or(defaults.mode);

        Self {
            rows: parsed("BLOCKFIT_ROWS").unwrap_or(defaults.rows),
            cols: parsed("BLOCKFIT_COLS").unwrap_or(defaults.cols),
            mode,
            seed: parsed("BLOCKFIT_SEED").unwrap_or(defaults.seed),
            bomb_counter: parsed("BLOCKFIT_BOMB_COUNTER").unwrap_or(defaults.bomb_counter),
            bomb_interval: parsed("BLOCKFIT_BOMB_INTERVAL").unwrap_or(defaults.bomb_interval),
            round_time_ms: parsed("BLOCKFIT_ROUND_TIME_MS").unwrap_or(defaults.round_time_ms),
            clear_removes_bomb_state: None,
        }
    }

    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_size(mut self, rows: usize, cols: usize) -> Self {
        self.rows = rows;
        self.cols = cols;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let dim_ok = |d: usize| (1..=MAX_BOARD_DIM).contains(&d);
        if !dim_ok(self.rows) || !dim_ok(self.cols) {
            return Err(ConfigError::InvalidDimensions {
                rows: self.rows,
                cols: self.cols,
                max: MAX_BOARD_DIM,
            });
        }
        if self.bomb_counter == 0 {
            return Err(ConfigError::ZeroBombCounter);
        }
        if self.bomb_interval == 0 {
            return Err(ConfigError::ZeroBombInterval);
        }
        if self.round_time_ms == 0 {
            return Err(ConfigError::ZeroRoundTime);
        }
        Ok(())
    }

    /// Flag passed to every line clear
    pub fn clear_removes_bomb_state(&self) -> bool {
        self.clear_removes_bomb_state
            .unwrap_or_else(|| self.mode.bomb_counters_active())
    }
}
