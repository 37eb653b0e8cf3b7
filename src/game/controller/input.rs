//! Click handling
//!
//! | State                    | Click                  | Result                       |
//! |--------------------------|------------------------|------------------------------|
//! | Idle                     | mover's piece          | PieceSelected, highlights    |
//! | Idle                     | empty / opponent piece | nothing                      |
//! | PieceSelected(s)         | s                      | Idle                         |
//! | PieceSelected(s), stale  | anything else          | as from Idle                 |
//! | PieceSelected(s)         | anything else          | move attempt                 |
//! | AwaitingPromotionChoice  | anything               | nothing                      |
//!
//! A selection is stale once a snapshot leaves `s` without a piece of the
//! side to move. A move attempt asks the engine first. Illegal attempts
//! post an error notice and change nothing else.

use super::{SelectionController, INVALID_MOVE_NOTICE, MAX_PENDING_MOVES};
use crate::core::config::CaptureSource;
use crate::game::resources::{
    is_promotion_move, resolve_promotion_choice, NoticeKind, SelectionState,
};
use crate::game::types::{Move, Piece, Position};
use tracing::{debug, info, warn};

/// What a click or promotion choice did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Nothing changed
    Ignored,
    Selected {
        square: Position,
        possible_moves: Vec<Position>,
    },
    Deselected,
    /// The engine rejected the move; an error notice was posted
    Rejected { from: Position, to: Position },
    /// Legal pawn move to the last rank, waiting on `choose_promotion`
    PromotionRequired { from: Position, to: Position },
    /// Move submitted to the engine
    Moved(Move),
}

impl SelectionController {
    /// Handle a click on `pos`
    pub fn click(&mut self, pos: Position) -> ClickOutcome {
        if !self.active {
            debug!("[INPUT] Click on {} ignored: no active game", pos);
            return ClickOutcome::Ignored;
        }

        match &self.selection {
            SelectionState::AwaitingPromotionChoice { .. } => {
                debug!("[INPUT] Click on {} ignored: promotion pending", pos);
                ClickOutcome::Ignored
            }
            SelectionState::Idle => self.try_select(pos),
            SelectionState::PieceSelected { square, .. } if *square == pos => {
                debug!("[INPUT] Deselected {}", pos);
                self.clear_selection();
                ClickOutcome::Deselected
            }
            SelectionState::PieceSelected { square, .. } => {
                let from = *square;
                if !self.mover_owns(from) {
                    debug!("[INPUT] Selection on {} went stale, reselecting", from);
                    self.clear_selection();
                    return self.try_select(pos);
                }
                self.attempt_move(from, pos)
            }
        }
    }

    fn mover_owns(&self, pos: Position) -> bool {
        self.view
            .occupant(pos)
            .is_some_and(|piece| piece.color == self.turn.color)
    }

    /// Complete a pending promotion; unknown or missing choices become a queen
    pub fn choose_promotion(&mut self, choice: Option<&str>) -> ClickOutcome {
        let SelectionState::AwaitingPromotionChoice { from, to, captured } = self.selection
        else {
            debug!("[PROMOTION] No promotion pending");
            return ClickOutcome::Ignored;
        };
        let kind = resolve_promotion_choice(choice);
        info!("[PROMOTION] {}-{} promotes to {:?}", from, to, kind);
        self.execute_move(Move::new(from, to).with_promotion(kind), captured)
    }

    fn try_select(&mut self, pos: Position) -> ClickOutcome {
        let Some(piece) = self.view.occupant(pos) else {
            return ClickOutcome::Ignored;
        };
        if piece.color != self.turn.color {
            debug!("[INPUT] {:?} on {} does not belong to the mover", piece, pos);
            return ClickOutcome::Ignored;
        }

        let possible_moves = self.bridge.legal_destinations(pos);
        debug!(
            "[INPUT] Selected {:?} on {} with {} destinations",
            piece,
            pos,
            possible_moves.len()
        );
        self.view.mark_selected(pos);
        self.view.highlight(&possible_moves);
        self.selection = SelectionState::PieceSelected {
            square: pos,
            possible_moves: possible_moves.clone(),
        };
        ClickOutcome::Selected {
            square: pos,
            possible_moves,
        }
    }

    fn attempt_move(&mut self, from: Position, to: Position) -> ClickOutcome {
        if let Err(e) = self.bridge.check_move(from, to) {
            info!("[INPUT] {}", e);
            self.notices.post(INVALID_MOVE_NOTICE, NoticeKind::Error);
            self.clear_selection();
            return ClickOutcome::Rejected { from, to };
        }

        let captured = self.view.occupant(to);
        let promoting = self
            .view
            .occupant(from)
            .is_some_and(|piece| is_promotion_move(piece, to));
        if promoting {
            debug!("[PROMOTION] Awaiting choice for {}-{}", from, to);
            self.selection = SelectionState::AwaitingPromotionChoice { from, to, captured };
            return ClickOutcome::PromotionRequired { from, to };
        }

        self.execute_move(Move::new(from, to), captured)
    }

    fn execute_move(&mut self, mv: Move, captured: Option<Piece>) -> ClickOutcome {
        if let Err(e) = self.bridge.submit_move(&mv) {
            warn!("[INPUT] Could not submit {}: {}", mv, e);
            self.clear_selection();
            return ClickOutcome::Ignored;
        }

        let notation = mv.notation();
        info!("[INPUT] {} played {}", self.turn.color, notation);
        self.history.add_move(notation.clone());
        if self.pending.len() >= MAX_PENDING_MOVES {
            if let Some(dropped) = self.pending.pop_front() {
                debug!("[INPUT] {} was never confirmed, no longer tracked", dropped);
            }
        }
        self.pending.push_back(notation);

        if self.config.capture_source == CaptureSource::Snapshot {
            if let Some(piece) = captured {
                debug!("[INPUT] Captured {:?}", piece);
                self.captured.add_capture(piece);
            }
        }

        self.turn.switch();
        self.clear_selection();
        ClickOutcome::Moved(mv)
    }

    fn clear_selection(&mut self) {
        self.selection.clear();
        self.view.clear_decorations();
    }
}
