//! Pawn promotion helpers
//!
//! When a legal move takes a pawn to the first or last rank the controller
//! suspends the move until the player picks a piece. The pick is free-form
//! text from the host; anything unrecognized falls back to a queen.

use crate::game::error::{GameError, GameResult};
use crate::game::types::{Piece, PieceKind, Position};

/// Pieces a pawn may promote to
pub const PROMOTION_CHOICES: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// Check if moving `piece` to `target` is a promotion
pub fn is_promotion_move(piece: Piece, target: Position) -> bool {
    piece.kind == PieceKind::Pawn && target.is_back_rank()
}

/// Parse a promotion answer: `q`, `r`, `b`, `n` or the full piece name
pub fn parse_promotion_choice(input: &str) -> GameResult<PieceKind> {
    let answer = input.trim().to_ascii_lowercase();
    PROMOTION_CHOICES
        .into_iter()
        .find(|kind| {
            (answer.len() == 1 && answer.starts_with(kind.letter()))
                || answer == format!("{kind:?}").to_ascii_lowercase()
        })
        .ok_or_else(|| GameError::InvalidPromotionChoice {
            input: input.to_string(),
        })
}

/// Resolve an optional answer, defaulting to a queen
pub fn resolve_promotion_choice(input: Option<&str>) -> PieceKind {
    match input.map(parse_promotion_choice) {
        Some(Ok(kind)) => kind,
        Some(Err(err)) => {
            tracing::debug!("[PROMOTION] {err}, promoting to queen");
            PieceKind::Queen
        }
        None => PieceKind::Queen,
    }
}
