//! In-process rule engine backed by shakmaty
//!
//! Plays legal random replies for the sides not controlled by a human.
//! Difficulty is accepted and reported but does not change the picker.

use super::bridge::{EngineCallback, RuleEngine};
use super::wire;
use crate::game::board_state::Board;
use crate::game::resources::game_over::{GameStatus, StatusReport};
use crate::game::types::{Color, Move as UiMove, Piece, PieceKind, Position};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use shakmaty::{Chess, File, Move, Position as _, Role, Square};
use tracing::{debug, info, warn};

/// Upper bound on consecutive engine plies when neither side is human
const MAX_AUTO_PLIES: usize = 600;

pub struct LocalEngine {
    position: Option<Chess>,
    human_white: bool,
    human_black: bool,
    difficulty: u8,
    finished: bool,
    rng: StdRng,
    board_callback: Option<EngineCallback>,
    status_callback: Option<EngineCallback>,
}

impl Default for LocalEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalEngine {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Engine whose replies are reproducible
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            position: None,
            human_white: true,
            human_black: false,
            difficulty: 2,
            finished: false,
            rng,
            board_callback: None,
            status_callback: None,
        }
    }

    pub fn difficulty(&self) -> u8 {
        self.difficulty
    }

    /// Side to move, if a game is in progress
    pub fn turn(&self) -> Option<Color> {
        self.position.as_ref().map(|pos| color_of(pos.turn()))
    }

    fn is_human(&self, color: Color) -> bool {
        match color {
            Color::White => self.human_white,
            Color::Black => self.human_black,
        }
    }

    fn find_move(&self, from: &str, to: &str, promotion: Option<Role>) -> Option<Move> {
        let position = self.position.as_ref()?;
        let from: Square = from.parse().ok()?;
        let to: Square = to.parse().ok()?;
        position.legal_moves().into_iter().find(|m| {
            m.from() == Some(from)
                && ui_destination(m) == to
                && (m.promotion().is_none() || m.promotion() == promotion)
        })
    }

    /// Play `m`, then publish the board and status
    fn apply(&mut self, m: Move) {
        let Some(position) = self.position.take() else {
            return;
        };
        let notation = notation_of(&m);
        match position.clone().play(m) {
            Ok(next) => {
                debug!("[LOCAL_ENGINE] Played {}", notation);
                self.position = Some(next);
                self.publish(Some(&notation));
            }
            Err(e) => {
                warn!("[LOCAL_ENGINE] Rejected {}: {}", notation, e);
                self.position = Some(position);
            }
        }
    }

    /// Reply for every consecutive engine-controlled turn
    fn play_engine_turns(&mut self) {
        for _ in 0..MAX_AUTO_PLIES {
            if self.finished {
                return;
            }
            let Some(position) = &self.position else {
                return;
            };
            if self.is_human(color_of(position.turn())) {
                return;
            }
            let moves = position.legal_moves();
            let Some(reply) = moves.choose(&mut self.rng).cloned() else {
                return;
            };
            self.apply(reply);
        }
    }

    fn publish(&mut self, last_move: Option<&str>) {
        let Some(position) = &self.position else {
            return;
        };
        let board = board_of(position);
        let turn = color_of(position.turn());
        let report = status_of(position);
        if report.status.is_terminal() {
            info!("[LOCAL_ENGINE] Game over: {:?}", report.status);
            self.finished = true;
        }

        if let Some(cb) = &self.board_callback {
            cb(wire::encode_board(&board, Some(turn), last_move));
        }
        if let Some(cb) = &self.status_callback {
            cb(wire::encode_status(&report));
        }
    }
}

impl RuleEngine for LocalEngine {
    fn legal_destinations(&self, from: &str) -> String {
        if self.finished {
            return "[]".to_string();
        }
        let (Some(position), Ok(from)) = (&self.position, from.parse::<Square>()) else {
            return "[]".to_string();
        };
        let mut targets: Vec<Position> = Vec::new();
        for m in position.legal_moves().iter().filter(|m| m.from() == Some(from)) {
            if let Some(target) = to_ui(ui_destination(m)) {
                if !targets.contains(&target) {
                    targets.push(target);
                }
            }
        }
        wire::encode_destinations(&targets)
    }

    fn is_legal(&self, from: &str, to: &str) -> bool {
        if self.finished {
            return false;
        }
        let Some(position) = &self.position else {
            return false;
        };
        let (Ok(from), Ok(to)) = (from.parse::<Square>(), to.parse::<Square>()) else {
            return false;
        };
        position
            .legal_moves()
            .iter()
            .any(|m| m.from() == Some(from) && ui_destination(m) == to)
    }

    fn submit_move(&mut self, from: &str, to: &str, promotion: &str) {
        if self.finished {
            debug!("[LOCAL_ENGINE] Ignoring move after game end");
            return;
        }
        let role = match promotion {
            "" | "q" => Role::Queen,
            "r" => Role::Rook,
            "b" => Role::Bishop,
            "n" => Role::Knight,
            other => {
                warn!("[LOCAL_ENGINE] Unknown promotion {:?}, using queen", other);
                Role::Queen
            }
        };
        let Some(m) = self.find_move(from, to, Some(role)) else {
            warn!("[LOCAL_ENGINE] No legal move {}-{}", from, to);
            return;
        };
        self.apply(m);
        self.play_engine_turns();
    }

    fn begin_game(&mut self, human_white: bool, human_black: bool, difficulty: u8) {
        info!(
            "[LOCAL_ENGINE] New game (difficulty {}, white human: {}, black human: {})",
            difficulty, human_white, human_black
        );
        self.human_white = human_white;
        self.human_black = human_black;
        self.difficulty = difficulty;
        self.finished = false;
        self.position = Some(Chess::default());
        self.publish(None);
        self.play_engine_turns();
    }

    fn resign(&mut self) {
        let Some(position) = &self.position else {
            return;
        };
        if self.finished {
            return;
        }
        let winner = color_of(position.turn()).opponent();
        self.finished = true;
        if let Some(cb) = &self.status_callback {
            cb(wire::encode_status(&StatusReport::new(
                GameStatus::Resigned,
                Some(winner),
            )));
        }
    }

    fn reset_game(&mut self) {
        self.position = None;
        self.finished = false;
        if let Some(cb) = &self.board_callback {
            cb("{}".to_string());
        }
    }

    fn register_board_callback(&mut self, callback: EngineCallback) {
        self.board_callback = Some(callback);
    }

    fn register_status_callback(&mut self, callback: EngineCallback) {
        self.status_callback = Some(callback);
    }
}

/// Square the user clicks to make `m`; castling targets the king's landing square
fn ui_destination(m: &Move) -> Square {
    match m {
        Move::Castle { king, rook } => {
            let file = if rook.file() > king.file() {
                File::G
            } else {
                File::C
            };
            Square::from_coords(file, king.rank())
        }
        other => other.to(),
    }
}

fn to_ui(square: Square) -> Option<Position> {
    Position::from_index(usize::from(square))
}

fn notation_of(m: &Move) -> String {
    let (Some(from), Some(to)) = (m.from().and_then(to_ui), to_ui(ui_destination(m))) else {
        return format!("{m:?}");
    };
    let ui = UiMove::new(from, to);
    match m.promotion().map(kind_of) {
        Some(kind) => ui.with_promotion(kind).notation(),
        None => ui.notation(),
    }
}

fn color_of(color: shakmaty::Color) -> Color {
    match color {
        shakmaty::Color::White => Color::White,
        shakmaty::Color::Black => Color::Black,
    }
}

fn kind_of(role: Role) -> PieceKind {
    match role {
        Role::Pawn => PieceKind::Pawn,
        Role::Knight => PieceKind::Knight,
        Role::Bishop => PieceKind::Bishop,
        Role::Rook => PieceKind::Rook,
        Role::Queen => PieceKind::Queen,
        Role::King => PieceKind::King,
    }
}

fn board_of(position: &Chess) -> Board {
    let mut board = Board::empty();
    for pos in Position::all() {
        let square = Square::new(pos.index() as u32);
        let piece = position
            .board()
            .piece_at(square)
            .map(|p| Piece::new(kind_of(p.role), color_of(p.color)));
        board.set(pos, piece);
    }
    board
}

fn status_of(position: &Chess) -> StatusReport {
    let to_move = color_of(position.turn());
    if position.is_checkmate() {
        StatusReport::new(GameStatus::Checkmate, Some(to_move.opponent()))
    } else if position.is_stalemate() {
        StatusReport::new(GameStatus::Stalemate, None)
    } else if position.is_check() {
        StatusReport::new(GameStatus::Check, None)
    } else {
        StatusReport::new(GameStatus::Playing, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    type Log = Arc<Mutex<Vec<String>>>;

    fn engine_with_log(human_white: bool, human_black: bool) -> (LocalEngine, Log, Log) {
        let boards: Log = Arc::default();
        let statuses: Log = Arc::default();
        let mut engine = LocalEngine::with_seed(7);
        let b = boards.clone();
        engine.register_board_callback(Box::new(move |json| b.lock().push(json)));
        let s = statuses.clone();
        engine.register_status_callback(Box::new(move |json| s.lock().push(json)));
        engine.begin_game(human_white, human_black, 3);
        (engine, boards, statuses)
    }

    fn play(engine: &mut LocalEngine, from: &str, to: &str) {
        assert!(engine.is_legal(from, to), "{from}-{to} should be legal");
        engine.submit_move(from, to, "");
    }

    #[test]
    fn test_begin_publishes_start_position() {
        let (engine, boards, statuses) = engine_with_log(true, true);
        let snapshot = wire::decode_board(&boards.lock()[0]).unwrap().unwrap();
        assert_eq!(snapshot.board, Board::standard());
        assert_eq!(snapshot.turn, Some(Color::White));
        assert_eq!(snapshot.last_move, None);
        assert_eq!(
            wire::decode_status(&statuses.lock()[0]).unwrap().status,
            GameStatus::Playing
        );
        assert_eq!(engine.difficulty(), 3);
    }

    #[test]
    fn test_destinations_from_start() {
        let (engine, _, _) = engine_with_log(true, true);
        let targets = wire::decode_destinations(&engine.legal_destinations("e2")).unwrap();
        assert_eq!(targets.len(), 2);
        assert!(engine.is_legal("g1", "f3"));
        assert!(!engine.is_legal("e2", "e5"));
        assert_eq!(engine.legal_destinations("e4"), "[]");
    }

    #[test]
    fn test_engine_replies_for_black() {
        let (mut engine, boards, _) = engine_with_log(true, false);
        play(&mut engine, "e2", "e4");

        let boards = boards.lock();
        assert_eq!(boards.len(), 3, "start, human move, engine reply");
        let human = wire::decode_board(&boards[1]).unwrap().unwrap();
        assert_eq!(human.last_move.as_deref(), Some("e2-e4"));
        let reply = wire::decode_board(&boards[2]).unwrap().unwrap();
        assert_eq!(reply.turn, Some(Color::White));
        assert!(reply.last_move.is_some());
        assert_eq!(engine.turn(), Some(Color::White));
    }

    #[test]
    fn test_fools_mate_reports_checkmate() {
        let (mut engine, _, statuses) = engine_with_log(true, true);
        play(&mut engine, "f2", "f3");
        play(&mut engine, "e7", "e5");
        play(&mut engine, "g2", "g4");
        play(&mut engine, "d8", "h4");

        let last = wire::decode_status(statuses.lock().last().unwrap()).unwrap();
        assert_eq!(last, StatusReport::new(GameStatus::Checkmate, Some(Color::Black)));
        assert!(!engine.is_legal("a2", "a3"), "no moves after mate");
        assert_eq!(engine.legal_destinations("a2"), "[]");
    }

    #[test]
    fn test_castling_uses_king_destination() {
        let (mut engine, boards, _) = engine_with_log(true, true);
        let opening = [
            ("e2", "e4"),
            ("e7", "e5"),
            ("g1", "f3"),
            ("b8", "c6"),
            ("f1", "c4"),
            ("g8", "f6"),
        ];
        for (from, to) in opening {
            play(&mut engine, from, to);
        }
        let targets = wire::decode_destinations(&engine.legal_destinations("e1")).unwrap();
        assert!(targets.contains(&Position::from_algebraic("g1").unwrap()));

        play(&mut engine, "e1", "g1");
        let snapshot = wire::decode_board(boards.lock().last().unwrap()).unwrap().unwrap();
        assert_eq!(snapshot.last_move.as_deref(), Some("e1-g1"));
        let g1 = Position::from_algebraic("g1").unwrap();
        let f1 = Position::from_algebraic("f1").unwrap();
        assert_eq!(snapshot.board.piece_at(g1).map(|p| p.kind), Some(PieceKind::King));
        assert_eq!(snapshot.board.piece_at(f1).map(|p| p.kind), Some(PieceKind::Rook));
    }

    #[test]
    fn test_resign_reports_opponent_as_winner() {
        let (mut engine, _, statuses) = engine_with_log(true, true);
        engine.resign();
        let report = wire::decode_status(statuses.lock().last().unwrap()).unwrap();
        assert_eq!(report, StatusReport::new(GameStatus::Resigned, Some(Color::Black)));
        assert!(!engine.is_legal("e2", "e4"));
        assert_eq!(engine.legal_destinations("e2"), "[]", "no highlights after resigning");
    }

    #[test]
    fn test_reset_sends_empty_payload() {
        let (mut engine, boards, _) = engine_with_log(true, true);
        engine.reset_game();
        assert_eq!(boards.lock().last().map(String::as_str), Some("{}"));
        assert_eq!(engine.turn(), None);
    }

    #[test]
    fn test_engine_versus_engine_terminates() {
        let (_engine, boards, _) = engine_with_log(false, false);
        assert!(boards.lock().len() > 1);
        assert!(boards.lock().len() <= MAX_AUTO_PLIES + 1);
    }
}
