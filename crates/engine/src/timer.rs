use serde::{Deserialize, Serialize};

/// Countdown for time-boxed rounds, advanced with elapsed milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundTimer {
    elapsed_ms: u32,
    limit_ms: u32,
}

impl RoundTimer {
    pub fn new(limit_ms: u32) -> Self {
        Self {
            elapsed_ms: 0,
            limit_ms,
        }
    }

    pub fn reset(&mut self) {
        self.elapsed_ms = 0;
    }

    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }

    pub fn limit_ms(&self) -> u32 {
        self.limit_ms
    }

    pub fn remaining_ms(&self) -> u32 {
        self.limit_ms.saturating_sub(self.elapsed_ms)
    }

    pub fn is_up(&self) -> bool {
        self.elapsed_ms >= self.limit_ms
    }

    /// Advance the timer. Returns true only on the tick that runs out.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.is_up() {
            return false;
        }
        self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms).min(self.limit_ms);
        self.is_up()
    }
}
