//! Selection state for the click-driven move state machine

use crate::game::types::{Piece, Position};

/// Where the click state machine currently stands
///
/// `AwaitingPromotionChoice` holds a move the engine already accepted as
/// legal; it is completed by `SelectionController::choose_promotion`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    Idle,
    PieceSelected {
        square: Position,
        possible_moves: Vec<Position>,
    },
    AwaitingPromotionChoice {
        from: Position,
        to: Position,
        captured: Option<Piece>,
    },
}

impl SelectionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, SelectionState::Idle)
    }

    /// The selected square, if a piece is selected
    pub fn selected_square(&self) -> Option<Position> {
        match self {
            SelectionState::PieceSelected { square, .. } => Some(*square),
            _ => None,
        }
    }

    pub fn possible_moves(&self) -> &[Position] {
        match self {
            SelectionState::PieceSelected { possible_moves, .. } => possible_moves,
            _ => &[],
        }
    }

    pub fn is_awaiting_promotion(&self) -> bool {
        matches!(self, SelectionState::AwaitingPromotionChoice { .. })
    }

    pub fn clear(&mut self) {
        *self = SelectionState::Idle;
    }
}
