//! Turn tracking
//!
//! The controller's local notion of whose turn it is. It flips on every
//! move the controller submits and is overwritten whenever an engine board
//! snapshot names the side to move.
//!
//! # Turn Flow
//!
//! ```text
//! Move 1: White plays → switch() → Black plays → switch() → Move 2: White plays
//! ```

use crate::game::types::Color;

/// Tracks whose turn it currently is and the current move number
///
/// Move numbers follow standard chess notation and increment only after
/// Black completes their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentTurn {
    pub color: Color,
    pub move_number: u32,
}

impl Default for CurrentTurn {
    fn default() -> Self {
        Self {
            color: Color::White,
            move_number: 1,
        }
    }
}

impl CurrentTurn {
    /// Switch to the other player's turn
    pub fn switch(&mut self) {
        self.color = match self.color {
            Color::White => Color::Black,
            Color::Black => {
                self.move_number += 1;
                Color::White
            }
        };
    }

    /// Adopt the side to move reported by the engine
    ///
    /// The move number is resynchronized from the ledger length so that an
    /// engine override never drifts from the numbered move list.
    pub fn sync_to(&mut self, color: Color, plies: usize) {
        self.color = color;
        self.move_number = (plies / 2) as u32 + 1;
    }

    /// "White to move" / "Black to move"
    pub fn text(&self) -> String {
        format!("{} to move", self.color.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_turn_default() {
        //! Verifies that games start with White to move on move 1
        let turn = CurrentTurn::default();
        assert_eq!(turn.color, Color::White);
        assert_eq!(turn.move_number, 1);
        assert_eq!(turn.text(), "White to move");
    }

    #[test]
    fn test_multiple_turn_switches() {
        //! Verifies correct turn tracking over multiple moves
        let mut turn = CurrentTurn::default();

        turn.switch();
        assert_eq!(turn.color, Color::Black);
        assert_eq!(turn.move_number, 1);

        turn.switch();
        assert_eq!(turn.color, Color::White);
        assert_eq!(turn.move_number, 2);

        turn.switch();
        assert_eq!(turn.color, Color::Black);
        assert_eq!(turn.move_number, 2, "Black's reply stays on move 2");
    }

    #[test]
    fn test_sync_to_engine_turn() {
        //! An engine-reported side to move replaces the local guess
        let mut turn = CurrentTurn::default();
        turn.switch();
        turn.sync_to(Color::White, 2);
        assert_eq!(turn.color, Color::White);
        assert_eq!(turn.move_number, 2);
        assert_eq!(turn.text(), "White to move");
    }
}
