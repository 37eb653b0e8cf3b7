//! Engine wire format
//!
//! The engine talks in JSON strings. Board snapshots look like
//!
//! ```text
//! { "board": [[{"piece":"r"}, {"piece":""}, ...], ...],
//!   "turn": "black", "last_move": "e2-e4" }
//! ```
//!
//! with rows ordered rank 8 first and cells ordered file a first. `turn`
//! and `last_move` are optional; extra per-cell fields are ignored. Status
//! updates are `{"status": "...", "winner": "white"}`.

use crate::game::board_state::Board;
use crate::game::error::{GameError, GameResult};
use crate::game::resources::game_over::StatusReport;
use crate::game::types::{Color, Piece, Position};
use serde::Deserialize;
use serde_json::{json, Value};

/// Decoded board callback payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSnapshot {
    pub board: Board,
    /// Side to move, when the engine reports it
    pub turn: Option<Color>,
    /// Notation of the move that produced this board, when reported
    pub last_move: Option<String>,
}

#[derive(Deserialize)]
struct WireCell {
    #[serde(default)]
    piece: Option<String>,
}

#[derive(Deserialize)]
struct WireBoard {
    #[serde(default)]
    board: Option<Vec<Vec<WireCell>>>,
    #[serde(default)]
    turn: Option<String>,
    #[serde(default)]
    last_move: Option<String>,
}

fn malformed(message: impl Into<String>) -> GameError {
    GameError::MalformedPayload {
        message: message.into(),
    }
}

/// Decode a board callback payload
///
/// Returns `Ok(None)` for payloads without a `board` field, which the
/// engine sends after a reset.
pub fn decode_board(json: &str) -> GameResult<Option<BoardSnapshot>> {
    let wire: WireBoard = serde_json::from_str(json)?;
    let Some(rows) = wire.board else {
        return Ok(None);
    };
    if rows.len() != 8 {
        return Err(malformed(format!("expected 8 rows, got {}", rows.len())));
    }

    let mut board = Board::empty();
    for (row_index, cells) in rows.iter().enumerate() {
        if cells.len() != 8 {
            return Err(malformed(format!(
                "row {} has {} cells",
                row_index,
                cells.len()
            )));
        }
        let row = 7 - row_index as u8;
        for (col, cell) in cells.iter().enumerate() {
            let Some(pos) = Position::new(row, col as u8) else {
                continue;
            };
            board.set(pos, decode_piece(cell.piece.as_deref())?);
        }
    }

    let turn = match wire.turn.as_deref() {
        Some("white") => Some(Color::White),
        Some("black") => Some(Color::Black),
        _ => None,
    };
    let last_move = wire.last_move.filter(|m| !m.is_empty());

    Ok(Some(BoardSnapshot {
        board,
        turn,
        last_move,
    }))
}

fn decode_piece(symbol: Option<&str>) -> GameResult<Option<Piece>> {
    let symbol = symbol.unwrap_or("");
    let mut chars = symbol.chars();
    match (chars.next(), chars.next()) {
        (None, _) => Ok(None),
        (Some(c), None) => Piece::from_symbol(c)
            .map(Some)
            .ok_or_else(|| malformed(format!("unknown piece {symbol:?}"))),
        _ => Err(malformed(format!("unknown piece {symbol:?}"))),
    }
}

/// Encode a board in the wire format
pub fn encode_board(board: &Board, turn: Option<Color>, last_move: Option<&str>) -> String {
    let rows: Vec<Value> = (0..8u8)
        .rev()
        .map(|row| {
            let cells: Vec<Value> = (0..8u8)
                .filter_map(|col| Position::new(row, col))
                .map(|pos| {
                    let piece = board
                        .piece_at(pos)
                        .map(|p| p.symbol().to_string())
                        .unwrap_or_default();
                    json!({ "piece": piece })
                })
                .collect();
            Value::Array(cells)
        })
        .collect();

    let mut payload = json!({ "board": rows });
    if let Some(turn) = turn {
        payload["turn"] = json!(turn);
    }
    if let Some(last_move) = last_move {
        payload["last_move"] = json!(last_move);
    }
    payload.to_string()
}

pub fn decode_status(json: &str) -> GameResult<StatusReport> {
    Ok(serde_json::from_str(json)?)
}

pub fn encode_status(report: &StatusReport) -> String {
    serde_json::to_value(report)
        .map(|v| v.to_string())
        .unwrap_or_else(|_| r#"{"status":"ready"}"#.to_string())
}

/// Decode a JSON array of algebraic squares
pub fn decode_destinations(json: &str) -> GameResult<Vec<Position>> {
    let names: Vec<String> = serde_json::from_str(json)?;
    names.iter().map(|name| name.parse::<Position>()).collect()
}

pub fn encode_destinations(positions: &[Position]) -> String {
    let names: Vec<String> = positions.iter().map(|p| p.to_algebraic()).collect();
    json!(names).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::resources::game_over::GameStatus;

    #[test]
    fn test_board_roundtrip_preserves_occupants() {
        let board = Board::standard();
        let json = encode_board(&board, Some(Color::Black), Some("e2-e4"));
        let snapshot = decode_board(&json).unwrap().unwrap();
        assert_eq!(snapshot.board, board);
        assert_eq!(snapshot.turn, Some(Color::Black));
        assert_eq!(snapshot.last_move.as_deref(), Some("e2-e4"));
    }

    #[test]
    fn test_first_wire_row_is_rank_eight() {
        let json = encode_board(&Board::standard(), None, None);
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["board"][0][0]["piece"], "r");
        assert_eq!(value["board"][7][4]["piece"], "K");
        assert_eq!(value["board"][4][4]["piece"], "");
    }

    #[test]
    fn test_reset_payload_has_no_board() {
        assert_eq!(decode_board("{}").unwrap(), None);
    }

    #[test]
    fn test_extra_cell_fields_are_ignored() {
        let cell = r#"{"piece":"","color":"","position":"a1"}"#;
        let row = format!("[{}]", vec![cell; 8].join(","));
        let json = format!(r#"{{"board":[{}],"turn":"white"}}"#, vec![row; 8].join(","));
        let snapshot = decode_board(&json).unwrap().unwrap();
        assert_eq!(snapshot.board, Board::empty());
        assert_eq!(snapshot.turn, Some(Color::White));
    }

    #[test]
    fn test_malformed_boards_are_rejected() {
        assert!(decode_board(r#"{"board":[]}"#).is_err());
        assert!(decode_board("not json").is_err());

        let row = format!("[{}]", vec![r#"{"piece":"x"}"#; 8].join(","));
        let json = format!(r#"{{"board":[{}]}}"#, vec![row; 8].join(","));
        assert!(decode_board(&json).is_err());
    }

    #[test]
    fn test_status_decoding() {
        let report = decode_status(r#"{"status":"checkmate","winner":"white"}"#).unwrap();
        assert_eq!(report, StatusReport::new(GameStatus::Checkmate, Some(Color::White)));

        let playing =
            decode_status(r#"{"status":"playing","turn":"white","check":false}"#).unwrap();
        assert_eq!(playing.status, GameStatus::Playing);
        assert!(decode_status(r#"{"status":"exploded"}"#).is_err());

        let encoded = encode_status(&report);
        assert_eq!(decode_status(&encoded).unwrap(), report);
    }

    #[test]
    fn test_destinations() {
        let targets = decode_destinations(r#"["e3","e4"]"#).unwrap();
        assert_eq!(
            targets,
            vec![
                Position::from_algebraic("e3").unwrap(),
                Position::from_algebraic("e4").unwrap()
            ]
        );
        assert_eq!(encode_destinations(&targets), r#"["e3","e4"]"#);
        assert!(decode_destinations(r#"["zz"]"#).is_err());
    }
}
