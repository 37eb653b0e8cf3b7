//! Captured pieces tracking
//!
//! Keeps, per color, the ordered list of that color's pieces which have
//! been taken during the current game. Used for the captured-piece display
//! regions and a material balance readout.
//!
//! # Material Advantage
//!
//! Positive advantage means White is ahead, negative means Black is ahead.
//! If Black lost a rook and a pawn and White lost a knight, White's
//! advantage is (5 + 1) - 3 = +3 pawns.

use crate::game::types::{Color, Piece, PieceKind};

/// Pieces removed from the board, grouped by the color of the piece
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CapturedPieces {
    /// White pieces that have been captured
    pub white: Vec<Piece>,
    /// Black pieces that have been captured
    pub black: Vec<Piece>,
}

impl CapturedPieces {
    /// Record a captured piece under its own color
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// // White captures Black's queen
    /// captured.add_capture(Piece::new(PieceKind::Queen, Color::Black));
    /// assert_eq!(captured.black.len(), 1);
    /// ```
    pub fn add_capture(&mut self, piece: Piece) {
        match piece.color {
            Color::White => self.white.push(piece),
            Color::Black => self.black.push(piece),
        }
    }

    pub fn of(&self, color: Color) -> &[Piece] {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    pub fn total(&self) -> usize {
        self.white.len() + self.black.len()
    }

    /// Material difference in pawn units, positive when White is ahead
    pub fn material_advantage(&self) -> i32 {
        let white_lost: i32 = self.white.iter().map(|p| p.kind.value()).sum();
        let black_lost: i32 = self.black.iter().map(|p| p.kind.value()).sum();
        black_lost - white_lost
    }

    /// Glyph string for one color's display region
    pub fn display(&self, color: Color) -> String {
        self.of(color).iter().map(|p| p.glyph()).collect()
    }

    /// Clear all captured pieces (for new game)
    pub fn clear(&mut self) {
        self.white.clear();
        self.black.clear();
    }
}

/// Pieces that vanished between two board snapshots
///
/// Compares per-color piece counts. A pawn that disappeared while a new
/// non-pawn piece of the same color appeared is a promotion, not a capture,
/// so each gained piece cancels one missing pawn.
pub fn vanished_pieces<'a>(
    before: impl IntoIterator<Item = &'a Piece>,
    after: impl IntoIterator<Item = &'a Piece>,
) -> Vec<Piece> {
    let mut counts = [[0i32; 6]; 2];
    let slot = |piece: &Piece| {
        let color = match piece.color {
            Color::White => 0,
            Color::Black => 1,
        };
        (color, piece.kind as usize)
    };
    for piece in before {
        let (c, k) = slot(piece);
        counts[c][k] += 1;
    }
    for piece in after {
        let (c, k) = slot(piece);
        counts[c][k] -= 1;
    }

    let mut vanished = Vec::new();
    for (c, color) in [Color::White, Color::Black].into_iter().enumerate() {
        let pawn_slot = PieceKind::ALL.len() - 1;
        let promoted: i32 = counts[c][..pawn_slot]
            .iter()
            .filter(|delta| **delta < 0)
            .map(|delta| -delta)
            .sum();
        counts[c][pawn_slot] -= promoted.min(counts[c][pawn_slot].max(0));

        for (k, kind) in PieceKind::ALL.into_iter().enumerate() {
            for _ in 0..counts[c][k].max(0) {
                vanished.push(Piece::new(kind, color));
            }
        }
    }
    vanished
}

#[cfg(test)]
mod tests {
    use super::*;

    fn piece(symbol: char) -> Piece {
        Piece::from_symbol(symbol).unwrap()
    }

    #[test]
    fn test_captured_pieces_default() {
        //! Verifies that captured pieces starts empty
        let captured = CapturedPieces::default();
        assert!(captured.white.is_empty());
        assert!(captured.black.is_empty());
        assert_eq!(captured.material_advantage(), 0);
    }

    #[test]
    fn test_add_capture_files_under_piece_color() {
        //! A captured black queen lands in the black list
        let mut captured = CapturedPieces::default();
        captured.add_capture(piece('q'));
        captured.add_capture(piece('R'));

        assert_eq!(captured.black, vec![piece('q')]);
        assert_eq!(captured.white, vec![piece('R')]);
        assert_eq!(captured.total(), 2);
    }

    #[test]
    fn test_material_advantage() {
        //! Black lost a queen (9), White lost a pawn (1): White +8
        let mut captured = CapturedPieces::default();
        captured.add_capture(piece('q'));
        captured.add_capture(piece('P'));
        assert_eq!(captured.material_advantage(), 8, "White should be +8 (9-1)");
    }

    #[test]
    fn test_display_glyphs() {
        let mut captured = CapturedPieces::default();
        captured.add_capture(piece('n'));
        captured.add_capture(piece('p'));
        assert_eq!(captured.display(Color::Black), "♞♟");
        assert_eq!(captured.display(Color::White), "");
    }

    #[test]
    fn test_vanished_simple_capture() {
        let before = [piece('P'), piece('p'), piece('K'), piece('k')];
        let after = [piece('P'), piece('K'), piece('k')];
        assert_eq!(vanished_pieces(&before, &after), vec![piece('p')]);
    }

    #[test]
    fn test_vanished_ignores_promotion() {
        //! Pawn → queen on the last rank is not a capture
        let before = [piece('P'), piece('K'), piece('k')];
        let after = [piece('Q'), piece('K'), piece('k')];
        assert!(vanished_pieces(&before, &after).is_empty());
    }

    #[test]
    fn test_vanished_capture_with_promotion() {
        //! Pawn captures a rook while promoting to a knight
        let before = [piece('P'), piece('r'), piece('K'), piece('k')];
        let after = [piece('N'), piece('K'), piece('k')];
        assert_eq!(vanished_pieces(&before, &after), vec![piece('r')]);
    }

    #[test]
    fn test_clear() {
        let mut captured = CapturedPieces::default();
        captured.add_capture(piece('q'));
        captured.clear();
        assert_eq!(captured.total(), 0);
    }
}
