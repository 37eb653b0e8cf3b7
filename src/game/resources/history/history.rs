//! Move ledger
//!
//! Append-only record of executed move notations for the current game.
//! Cleared only when a new game starts or the game is reset.
//!
//! # Numbering
//!
//! Index 0 is White's first move, index 1 Black's reply, and so on. The
//! move number shown next to an entry is `ceil((index + 1) / 2)`.

/// Ledger of executed moves in notation form (`e2-e4`, `a7-a8=Q`)
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MoveHistory {
    moves: Vec<String>,
}

impl MoveHistory {
    /// Append one notation to the ledger
    pub fn add_move(&mut self, notation: impl Into<String>) {
        self.moves.push(notation.into());
    }

    pub fn last_move(&self) -> Option<&str> {
        self.moves.last().map(String::as_str)
    }

    /// Number of half-moves (ply) recorded
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn moves(&self) -> &[String] {
        &self.moves
    }

    /// Full-move number of the most recent entry, `ceil(len / 2)`
    pub fn move_number(&self) -> usize {
        self.moves.len().div_ceil(2)
    }

    /// Display lines for the move list: `"1. e2-e4"`, `"1. e7-e5"`, ...
    pub fn numbered_lines(&self) -> Vec<String> {
        self.moves
            .iter()
            .enumerate()
            .map(|(index, notation)| format!("{}. {}", (index + 1).div_ceil(2), notation))
            .collect()
    }

    /// Clear all entries (new game or reset)
    pub fn clear(&mut self) {
        self.moves.clear();
    }
}
