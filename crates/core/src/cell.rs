//! Cell module - a single board slot
//!
//! A cell is either empty or filled by a piece. A filled cell can additionally
//! be armed as a bomb carrying a countdown. When the countdown reaches zero the
//! cell reports [`CounterTick::Over`] once and the bomb is spent: it stays
//! filled (clearing is a separate action) but no longer counts down.

use crate::error::CellError;
use crate::types::{PieceId, DEFAULT_BOMB_COUNTER};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
enum BombState {
    #[default]
    Inert,
    Armed(u8),
    Spent,
}

/// Result of one countdown step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CounterTick {
    /// Still counting; holds the remaining value
    Counting(u8),
    /// The counter just reached zero
    Over,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    occupant: Option<PieceId>,
    bomb: BombState,
}

impl Cell {
    /// Create an empty cell
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_filled(&self) -> bool {
        self.occupant.is_some()
    }

    pub fn occupant(&self) -> Option<PieceId> {
        self.occupant
    }

    /// True while the cell holds an armed (still counting) bomb
    pub fn is_bomb(&self) -> bool {
        matches!(self.bomb, BombState::Armed(_))
    }

    /// Current counter; `Some(0)` once the bomb is spent
    pub fn bomb_counter(&self) -> Option<u8> {
        match self.bomb {
            BombState::Inert => None,
            BombState::Armed(n) => Some(n),
            BombState::Spent => Some(0),
        }
    }

    /// Fill with a piece. Rejected when already filled.
    pub fn fill(&mut self, occupant: PieceId) -> Result<(), CellError> {
        if self.is_filled() {
            return Err(CellError::AlreadyFilled);
        }
        self.occupant = Some(occupant);
        Ok(())
    }

    /// Fill without the exclusivity check; callers validated the whole placement.
    pub(crate) fn occupy(&mut self, occupant: PieceId) {
        debug_assert!(!self.is_filled());
        self.occupant = Some(occupant);
    }

    /// Arm a bomb on a filled cell.
    ///
    /// Arming an empty cell is rejected: fill it first.
    pub fn convert_to_bomb(&mut self, counter: u8) -> Result<(), CellError> {
        if !self.is_filled() {
            return Err(CellError::NotFilled);
        }
        if counter == 0 {
            return Err(CellError::ZeroCounter);
        }
        self.bomb = BombState::Armed(counter);
        Ok(())
    }

    /// Arm a bomb with [`DEFAULT_BOMB_COUNTER`]
    pub fn convert_to_default_bomb(&mut self) -> Result<(), CellError> {
        self.convert_to_bomb(DEFAULT_BOMB_COUNTER)
    }

    /// Set the counter of an armed or spent bomb (rearm)
    pub fn set_counter(&mut self, counter: u8) -> Result<(), CellError> {
        if self.bomb == BombState::Inert {
            return Err(CellError::NotBomb);
        }
        if counter == 0 {
            return Err(CellError::ZeroCounter);
        }
        self.bomb = BombState::Armed(counter);
        Ok(())
    }

    /// Count down by one.
    ///
    /// Returns [`CounterTick::Over`] exactly once, on the step that reaches zero.
    /// Further calls are rejected with [`CellError::CounterExhausted`].
    pub fn decrease_counter(&mut self) -> Result<CounterTick, CellError> {
        match self.bomb {
            BombState::Inert => Err(CellError::NotBomb),
            BombState::Spent => Err(CellError::CounterExhausted),
            BombState::Armed(1) => {
                self.bomb = BombState::Spent;
                Ok(CounterTick::Over)
            }
            BombState::Armed(n) => {
                self.bomb = BombState::Armed(n - 1);
                Ok(CounterTick::Counting(n - 1))
            }
        }
    }

    /// Empty the cell, returning the previous occupant.
    ///
    /// `remove_bomb_state` drops any bomb state (armed or spent). Clearing an
    /// armed bomb without it is rejected, since an empty cell cannot be a bomb.
    pub fn clear(&mut self, remove_bomb_state: bool) -> Result<Option<PieceId>, CellError> {
        if remove_bomb_state {
            self.bomb = BombState::Inert;
        } else if self.is_bomb() {
            return Err(CellError::ArmedBombRetained);
        } else {
            // A spent bomb has nothing left to count; it goes with the fill.
            self.bomb = BombState::Inert;
        }
        Ok(self.occupant.take())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(id: u32) -> Cell {
        let mut cell = Cell::new();
        cell.fill(PieceId(id)).unwrap();
        cell
    }

    #[test]
    fn fill_twice_is_rejected() {
        let mut cell = filled(3);
        assert_eq!(cell.fill(PieceId(4)), Err(CellError::AlreadyFilled));
        assert_eq!(cell.occupant(), Some(PieceId(3)));
    }

    #[test]
    fn bomb_requires_fill() {
        let mut cell = Cell::new();
        assert_eq!(cell.convert_to_bomb(9), Err(CellError::NotFilled));
        assert!(!cell.is_bomb());
    }

    #[test]
    fn countdown_fires_once() {
        let mut cell = filled(1);
        cell.convert_to_bomb(3).unwrap();

        assert_eq!(cell.decrease_counter(), Ok(CounterTick::Counting(2)));
        assert_eq!(cell.decrease_counter(), Ok(CounterTick::Counting(1)));
        assert_eq!(cell.decrease_counter(), Ok(CounterTick::Over));
        assert_eq!(cell.bomb_counter(), Some(0));
        assert!(!cell.is_bomb());
        assert!(cell.is_filled());
        assert_eq!(cell.decrease_counter(), Err(CellError::CounterExhausted));
    }

    #[test]
    fn set_counter_rearms_spent_bomb() {
        let mut cell = filled(1);
        cell.convert_to_bomb(1).unwrap();
        assert_eq!(cell.decrease_counter(), Ok(CounterTick::Over));

        cell.set_counter(4).unwrap();
        assert!(cell.is_bomb());
        assert_eq!(cell.bomb_counter(), Some(4));
        assert_eq!(cell.set_counter(0), Err(CellError::ZeroCounter));
    }

    #[test]
    fn set_counter_on_plain_cell_is_rejected() {
        let mut cell = filled(1);
        assert_eq!(cell.set_counter(2), Err(CellError::NotBomb));
        assert_eq!(cell.decrease_counter(), Err(CellError::NotBomb));
    }

    #[test]
    fn clear_resets_state() {
        let mut cell = filled(5);
        cell.convert_to_default_bomb().unwrap();
        assert_eq!(cell.bomb_counter(), Some(DEFAULT_BOMB_COUNTER));

        assert_eq!(cell.clear(false), Err(CellError::ArmedBombRetained));
        assert!(cell.is_filled());

        assert_eq!(cell.clear(true), Ok(Some(PieceId(5))));
        assert_eq!(cell, Cell::new());
        assert_eq!(cell.clear(true), Ok(None));
    }
}
