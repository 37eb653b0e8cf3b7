//! Applying engine updates
//!
//! Board snapshots repaint the whole view. While a game is active they
//! also confirm pending moves, record engine-initiated moves in the ledger,
//! derive captures (in [`CaptureSource::BoardDiff`] mode) and resync the
//! tracked turn. Captures are diffed against the previous confirmed
//! snapshot, so the first move-less snapshot of a game is taken as the
//! baseline. Status reports end the game at most once.

use super::SelectionController;
use crate::core::config::CaptureSource;
use crate::game::resources::engine::{BoardSnapshot, EngineUpdate};
use crate::game::resources::{vanished_pieces, StatusReport};
use crate::game::types::Piece;
use tracing::{debug, info};

impl SelectionController {
    /// Apply every queued engine update in arrival order
    ///
    /// Returns the number of updates applied.
    pub fn process_engine_updates(&mut self) -> usize {
        let mut applied = 0;
        while let Some(update) = self.bridge.next_update() {
            self.apply_update(update);
            applied += 1;
        }
        applied
    }

    pub fn apply_update(&mut self, update: EngineUpdate) {
        match update {
            EngineUpdate::Board(snapshot) => self.apply_board(snapshot),
            EngineUpdate::Status(report) => self.apply_status(report),
            EngineUpdate::Cleared => debug!("[BOARD_SYNC] Engine cleared its board"),
        }
    }

    fn apply_board(&mut self, snapshot: BoardSnapshot) {
        if self.active {
            // The first snapshot without a move only establishes the position.
            let diff = self.baseline_confirmed || snapshot.last_move.is_some();
            if diff && self.config.capture_source == CaptureSource::BoardDiff {
                let before: Vec<Piece> = self.view.board().pieces().map(|(_, p)| p).collect();
                let after: Vec<Piece> = snapshot.board.pieces().map(|(_, p)| p).collect();
                for piece in vanished_pieces(&before, &after) {
                    debug!("[BOARD_SYNC] Captured {:?}", piece);
                    self.captured.add_capture(piece);
                }
            }

            if let Some(last_move) = snapshot.last_move.as_deref() {
                self.record_confirmed_move(last_move);
            }

            if let Some(color) = snapshot.turn {
                self.turn.sync_to(color, self.history.len());
            }
            self.baseline_confirmed = true;
        }

        self.view.repaint(&snapshot.board);
        debug!(
            "[BOARD_SYNC] Repainted {} pieces (repaint #{})",
            snapshot.board.piece_count(),
            self.view.repaint_count()
        );
    }

    /// Match a reported move against our pending submissions
    fn record_confirmed_move(&mut self, notation: &str) {
        if self.pending.front().map(String::as_str) == Some(notation) {
            self.pending.pop_front();
            return;
        }
        if self.pending.contains(&notation.to_string()) {
            // Earlier submissions were never echoed; keep the queue in order.
            while let Some(front) = self.pending.pop_front() {
                if front == notation {
                    break;
                }
            }
            return;
        }
        info!("[BOARD_SYNC] Engine played {}", notation);
        self.history.add_move(notation);
    }

    fn apply_status(&mut self, report: StatusReport) {
        debug!("[BOARD_SYNC] Status {:?}", report);
        if !report.status.is_terminal() {
            if self.active {
                self.status = report;
            }
            return;
        }
        if !self.active {
            debug!("[BOARD_SYNC] Ignoring terminal status outside an active game");
            return;
        }
        self.end_game(report);
    }
}
