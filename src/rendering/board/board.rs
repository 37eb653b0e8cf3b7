//! Board view model
//!
//! The presentational side of the board: 64 addressable cells, each with
//! its row, column, algebraic name and current occupant, plus the selection
//! and move-hint decorations. The view never decides anything; the
//! controller drives it.
//!
//! # Repainting
//!
//! [`BoardView::repaint`] overwrites every cell from a full [`Board`]
//! snapshot. There is no incremental diff, so a skipped update is corrected
//! by the next one.

use crate::game::board_state::Board;
use crate::game::types::{Piece, Position};
use std::fmt::Write;

/// One addressable cell of the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub position: Position,
    pub occupant: Option<Piece>,
    pub selected: bool,
    pub possible_move: bool,
}

impl Cell {
    pub fn row(&self) -> u8 {
        self.position.row()
    }

    pub fn col(&self) -> u8 {
        self.position.col()
    }

    /// Dark squares are those whose row + col is even (a1 is dark)
    pub fn is_dark(&self) -> bool {
        (self.row() + self.col()) % 2 == 0
    }
}

/// The 8x8 grid the host draws
#[derive(Debug, Clone)]
pub struct BoardView {
    cells: Vec<Cell>,
    repaints: u64,
}

impl Default for BoardView {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardView {
    /// Empty grid with no decorations
    pub fn new() -> Self {
        let cells = Position::all()
            .map(|position| Cell {
                position,
                occupant: None,
                selected: false,
                possible_move: false,
            })
            .collect();
        Self { cells, repaints: 0 }
    }

    /// Overwrite every cell's occupant from `board`
    pub fn repaint(&mut self, board: &Board) {
        for cell in &mut self.cells {
            cell.occupant = board.piece_at(cell.position);
        }
        self.repaints += 1;
    }

    /// Number of full repaints applied so far
    pub fn repaint_count(&self) -> u64 {
        self.repaints
    }

    pub fn cell(&self, pos: Position) -> &Cell {
        &self.cells[pos.index()]
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn occupant(&self, pos: Position) -> Option<Piece> {
        self.cell(pos).occupant
    }

    /// Occupants as a [`Board`], the view's cached copy of engine state
    pub fn board(&self) -> Board {
        let mut board = Board::empty();
        for cell in &self.cells {
            board.set(cell.position, cell.occupant);
        }
        board
    }

    pub fn mark_selected(&mut self, pos: Position) {
        for cell in &mut self.cells {
            cell.selected = cell.position == pos;
        }
    }

    pub fn highlight(&mut self, targets: &[Position]) {
        for cell in &mut self.cells {
            cell.possible_move = targets.contains(&cell.position);
        }
    }

    /// Remove selection and move-hint decorations
    pub fn clear_decorations(&mut self) {
        for cell in &mut self.cells {
            cell.selected = false;
            cell.possible_move = false;
        }
    }

    pub fn selected(&self) -> Option<Position> {
        self.cells.iter().find(|c| c.selected).map(|c| c.position)
    }

    /// Currently highlighted squares, a1 first
    pub fn highlighted(&self) -> Vec<Position> {
        self.cells
            .iter()
            .filter(|c| c.possible_move)
            .map(|c| c.position)
            .collect()
    }

    /// Plain-text board: rank 8 on top, `_` for empty dark squares,
    /// `*` marks move hints, brackets mark the selected square
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for row in (0..8u8).rev() {
            let _ = write!(out, "{} ", row + 1);
            for col in 0..8u8 {
                let Some(pos) = Position::new(row, col) else {
                    continue;
                };
                let cell = self.cell(pos);
                let body = match cell.occupant {
                    Some(piece) => piece.symbol(),
                    None if cell.possible_move => '*',
                    None if cell.is_dark() => '_',
                    None => ' ',
                };
                if cell.selected {
                    let _ = write!(out, "[{body}]");
                } else {
                    let _ = write!(out, " {body} ");
                }
            }
            out.push('\n');
        }
        out.push_str("   a  b  c  d  e  f  g  h\n");
        out
    }
}
