//! Type definitions for the board controller
//!
//! Newtypes and enums shared by the controller, the engine bridge and the
//! board view. Coordinates are `(row, col)` pairs where row 0 is rank 1 and
//! col 0 is file a, so `Position::new(1, 4)` is e2.

use crate::game::error::{GameError, GameResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Board coordinate, bijective with algebraic notation
///
/// # Examples
///
/// ```rust,ignore
/// let e4 = Position::from_algebraic("e4").unwrap();
/// assert_eq!((e4.row(), e4.col()), (3, 4));
/// assert_eq!(e4.to_algebraic(), "e4");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    row: u8,
    col: u8,
}

impl Position {
    /// Create a position from row and column indices (0-7)
    ///
    /// Returns `None` when either index is off the board.
    pub fn new(row: u8, col: u8) -> Option<Self> {
        if row < 8 && col < 8 {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// Parse algebraic notation such as `"e4"`
    ///
    /// The file letter is accepted in either case.
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return None;
        }
        Self::new(rank - b'1', file - b'a')
    }

    pub fn to_algebraic(self) -> String {
        format!("{}{}", (b'a' + self.col) as char, self.row + 1)
    }

    pub fn row(self) -> u8 {
        self.row
    }

    pub fn col(self) -> u8 {
        self.col
    }

    /// Row-major index 0..64 (a1 = 0, h8 = 63)
    pub fn index(self) -> usize {
        self.row as usize * 8 + self.col as usize
    }

    /// Inverse of [`Position::index`]
    pub fn from_index(index: usize) -> Option<Self> {
        if index < 64 {
            Self::new((index / 8) as u8, (index % 8) as u8)
        } else {
            None
        }
    }

    /// Whether this square is on the first or last rank
    pub fn is_back_rank(self) -> bool {
        self.row == 0 || self.row == 7
    }

    /// All 64 positions, a1 first
    pub fn all() -> impl Iterator<Item = Position> {
        (0..64).filter_map(Self::from_index)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.col) as char, self.row + 1)
    }
}

impl FromStr for Position {
    type Err = GameError;

    fn from_str(s: &str) -> GameResult<Self> {
        Self::from_algebraic(s).ok_or_else(|| GameError::InvalidPosition {
            input: s.to_string(),
        })
    }
}

/// Side color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    #[default]
    White,
    Black,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Capitalized name used in display text
    pub fn name(self) -> &'static str {
        match self {
            Color::White => "White",
            Color::Black => "Black",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::King,
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Pawn,
    ];

    /// Lowercase letter used by the engine protocol
    pub fn letter(self) -> char {
        match self {
            PieceKind::King => 'k',
            PieceKind::Queen => 'q',
            PieceKind::Rook => 'r',
            PieceKind::Bishop => 'b',
            PieceKind::Knight => 'n',
            PieceKind::Pawn => 'p',
        }
    }

    pub fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'k' => Some(PieceKind::King),
            'q' => Some(PieceKind::Queen),
            'r' => Some(PieceKind::Rook),
            'b' => Some(PieceKind::Bishop),
            'n' => Some(PieceKind::Knight),
            'p' => Some(PieceKind::Pawn),
            _ => None,
        }
    }

    /// Material value in pawns
    pub fn value(self) -> i32 {
        match self {
            PieceKind::Pawn => 1,
            PieceKind::Knight | PieceKind::Bishop => 3,
            PieceKind::Rook => 5,
            PieceKind::Queen => 9,
            PieceKind::King => 0,
        }
    }
}

/// A piece with an explicit color
///
/// The engine encodes pieces as single letters (uppercase white, lowercase
/// black). Decoding happens once, in [`Piece::from_symbol`]; everything else
/// works with `color` directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self { kind, color }
    }

    pub fn from_symbol(c: char) -> Option<Self> {
        let kind = PieceKind::from_letter(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Self { kind, color })
    }

    pub fn symbol(self) -> char {
        match self.color {
            Color::White => self.kind.letter().to_ascii_uppercase(),
            Color::Black => self.kind.letter(),
        }
    }

    /// Unicode glyph for display
    pub fn glyph(self) -> char {
        match (self.color, self.kind) {
            (Color::White, PieceKind::King) => '♔',
            (Color::White, PieceKind::Queen) => '♕',
            (Color::White, PieceKind::Rook) => '♖',
            (Color::White, PieceKind::Bishop) => '♗',
            (Color::White, PieceKind::Knight) => '♘',
            (Color::White, PieceKind::Pawn) => '♙',
            (Color::Black, PieceKind::King) => '♚',
            (Color::Black, PieceKind::Queen) => '♛',
            (Color::Black, PieceKind::Rook) => '♜',
            (Color::Black, PieceKind::Bishop) => '♝',
            (Color::Black, PieceKind::Knight) => '♞',
            (Color::Black, PieceKind::Pawn) => '♟',
        }
    }
}

/// A move as submitted to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub from: Position,
    pub to: Position,
    pub promotion: Option<PieceKind>,
}

impl Move {
    pub fn new(from: Position, to: Position) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    pub fn with_promotion(mut self, kind: PieceKind) -> Self {
        self.promotion = Some(kind);
        self
    }

    /// Ledger notation: `e2-e4`, `e7-e8=Q`
    pub fn notation(&self) -> String {
        match self.promotion {
            Some(kind) => format!(
                "{}-{}={}",
                self.from,
                self.to,
                kind.letter().to_ascii_uppercase()
            ),
            None => format!("{}-{}", self.from, self.to),
        }
    }

    /// Promotion argument for the engine call surface (empty when none)
    pub fn promotion_arg(&self) -> String {
        self.promotion
            .map(|kind| kind.letter().to_string())
            .unwrap_or_default()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.notation())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_algebraic_roundtrip() {
        for pos in Position::all() {
            let text = pos.to_algebraic();
            assert_eq!(Position::from_algebraic(&text), Some(pos), "{text}");
        }
    }

    #[test]
    fn test_position_coordinates() {
        let e2 = Position::from_algebraic("e2").unwrap();
        assert_eq!((e2.row(), e2.col()), (1, 4));
        let h8 = Position::from_algebraic("H8").unwrap();
        assert_eq!((h8.row(), h8.col()), (7, 7));
        assert_eq!(h8.index(), 63);
    }

    #[test]
    fn test_position_rejects_garbage() {
        assert_eq!(Position::from_algebraic("i1"), None);
        assert_eq!(Position::from_algebraic("a9"), None);
        assert_eq!(Position::from_algebraic("a10"), None);
        assert_eq!(Position::from_algebraic(""), None);
        assert!("z0".parse::<Position>().is_err());
        assert_eq!(Position::new(8, 0), None);
    }

    #[test]
    fn test_piece_symbol_carries_color() {
        let white_knight = Piece::from_symbol('N').unwrap();
        assert_eq!(white_knight, Piece::new(PieceKind::Knight, Color::White));
        let black_pawn = Piece::from_symbol('p').unwrap();
        assert_eq!(black_pawn.color, Color::Black);
        assert_eq!(black_pawn.symbol(), 'p');
        assert_eq!(Piece::from_symbol('x'), None);
    }

    #[test]
    fn test_move_notation() {
        let e2 = Position::from_algebraic("e2").unwrap();
        let e4 = Position::from_algebraic("e4").unwrap();
        assert_eq!(Move::new(e2, e4).notation(), "e2-e4");

        let a7 = Position::from_algebraic("a7").unwrap();
        let a8 = Position::from_algebraic("a8").unwrap();
        let promo = Move::new(a7, a8).with_promotion(PieceKind::Rook);
        assert_eq!(promo.notation(), "a7-a8=R");
        assert_eq!(promo.promotion_arg(), "r");
        assert_eq!(Move::new(e2, e4).promotion_arg(), "");
    }
}
