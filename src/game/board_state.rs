//! Board contents as last reported by the engine

use crate::game::types::{Color, Piece, PieceKind, Position};

/// 64 optional occupants indexed by [`Position::index`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; 64],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub const fn empty() -> Self {
        Self {
            squares: [None; 64],
        }
    }

    /// Standard starting position
    pub fn standard() -> Self {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut board = Self::empty();
        for (col, kind) in BACK_RANK.into_iter().enumerate() {
            let col = col as u8;
            board.put(0, col, Piece::new(kind, Color::White));
            board.put(1, col, Piece::new(PieceKind::Pawn, Color::White));
            board.put(6, col, Piece::new(PieceKind::Pawn, Color::Black));
            board.put(7, col, Piece::new(kind, Color::Black));
        }
        board
    }

    fn put(&mut self, row: u8, col: u8, piece: Piece) {
        if let Some(pos) = Position::new(row, col) {
            self.set(pos, Some(piece));
        }
    }

    pub fn piece_at(&self, pos: Position) -> Option<Piece> {
        self.squares[pos.index()]
    }

    pub fn set(&mut self, pos: Position, piece: Option<Piece>) {
        self.squares[pos.index()] = piece;
    }

    /// Occupied squares only
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        Position::all().filter_map(move |pos| self.piece_at(pos).map(|piece| (pos, piece)))
    }

    pub fn piece_count(&self) -> usize {
        self.squares.iter().filter(|s| s.is_some()).count()
    }
}
