//! Connect 4 game state for the search engine
//!
//! Connect 4 is a two-player connection game where players drop colored discs
//! into a vertically suspended grid. The objective is to be the first to form
//! a horizontal, vertical, or diagonal line of `connect_n` discs. The classic
//! board is 7 columns by 6 rows with lines of four, but any size is supported.
//!
//! # Board Layout
//!
//! The board is stored in row-major order, with row 0 at the bottom:
//! ```text
//! Row 5: [35][36][37][38][39][40][41]  <- Top
//! Row 4: [28][29][30][31][32][33][34]
//! Row 3: [21][22][23][24][25][26][27]
//! Row 2: [14][15][16][17][18][19][20]
//! Row 1: [ 7][ 8][ 9][10][11][12][13]
//! Row 0: [ 0][ 1][ 2][ 3][ 4][ 5][ 6]  <- Bottom
//!         Col 0  1  2  3  4  5  6
//! ```
//!
//! # Usage
//!
//! ```rust
//! use engine_core::{GameState, Player};
//! use games_connect4::{Action, Connect4};
//!
//! let mut game = Connect4::new();
//! game.drop_piece(3).unwrap(); // Red takes the center
//! game.apply_action(Action::Drop(3)); // Yellow stacks on top
//!
//! assert_eq!(game.to_move(), Player::Red);
//! assert_eq!(game.legal_actions().len(), 7);
//! ```

use std::fmt;

use engine_core::{GameState, Player};
use thiserror::Error;

/// Classic board dimensions
pub const DEFAULT_COLS: usize = 7;
pub const DEFAULT_ROWS: usize = 6;
pub const DEFAULT_CONNECT_N: usize = 4;

/// Largest board (rows x cols) accepted by [`Connect4::with_dimensions`]
pub const MAX_CELLS: usize = 1 << 16;

/// Errors raised by board construction and piece drops.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("Invalid board: {rows} rows x {cols} columns with lines of {connect_n}")]
    InvalidDimensions {
        rows: usize,
        cols: usize,
        connect_n: usize,
    },

    #[error("Column {column} is out of range (board has {cols} columns)")]
    ColumnOutOfRange { column: usize, cols: usize },

    #[error("Column {0} is full")]
    ColumnFull(usize),

    #[error("Game is already over")]
    GameOver,
}

/// Connect 4 action - drop a piece in a column (0-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Drop(usize),
}

impl Action {
    /// Get the column for this action
    pub fn column(&self) -> usize {
        match self {
            Action::Drop(col) => *col,
        }
    }
}

/// Connect 4 game state
///
/// Tracks the board, whose turn it is, the most recent move and the winner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connect4 {
    rows: usize,
    cols: usize,
    connect_n: usize,
    /// Cell owners, row-major with row 0 at the bottom
    board: Vec<Option<Player>>,
    /// Number of pieces in each column
    column_heights: Vec<usize>,
    to_move: Player,
    /// (row, col) of the most recent drop
    last_move: Option<(usize, usize)>,
    winner: Option<Player>,
}

impl Connect4 {
    /// Create an empty classic 6x7 connect-4 board with Red to move.
    pub fn new() -> Self {
        Self::empty(DEFAULT_ROWS, DEFAULT_COLS, DEFAULT_CONNECT_N)
    }

    /// Create an empty board of arbitrary size, up to [`MAX_CELLS`] cells.
    pub fn with_dimensions(rows: usize, cols: usize, connect_n: usize) -> Result<Self, BoardError> {
        let too_large = rows.checked_mul(cols).map_or(true, |cells| cells > MAX_CELLS);
        if rows == 0 || cols == 0 || too_large || connect_n == 0 || connect_n > rows.max(cols) {
            return Err(BoardError::InvalidDimensions {
                rows,
                cols,
                connect_n,
            });
        }
        Ok(Self::empty(rows, cols, connect_n))
    }

    /// Replay a sequence of column drops on a classic board.
    pub fn from_moves(columns: &[usize]) -> Result<Self, BoardError> {
        let mut game = Self::new();
        for &col in columns {
            game.drop_piece(col)?;
        }
        Ok(game)
    }

    fn empty(rows: usize, cols: usize, connect_n: usize) -> Self {
        Self {
            rows,
            cols,
            connect_n,
            board: vec![None; rows * cols],
            column_heights: vec![0; cols],
            to_move: Player::Red,
            last_move: None,
            winner: None,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn connect_n(&self) -> usize {
        self.connect_n
    }

    /// Convert column and row to board index
    #[inline]
    fn pos(&self, col: usize, row: usize) -> usize {
        row * self.cols + col
    }

    /// Owner of the chip at (row, col); `None` if empty or out of bounds.
    pub fn cell(&self, row: usize, col: usize) -> Option<Player> {
        if row < self.rows && col < self.cols {
            self.board[self.pos(col, row)]
        } else {
            None
        }
    }

    /// (row, col) of the most recent drop
    pub fn last_move(&self) -> Option<(usize, usize)> {
        self.last_move
    }

    /// Total number of pieces on the board
    pub fn moves_played(&self) -> usize {
        self.column_heights.iter().sum()
    }

    /// Whether every column is full
    pub fn is_full(&self) -> bool {
        self.column_heights.iter().all(|&h| h >= self.rows)
    }

    /// Whether the game is over (someone connected or the board is full)
    pub fn is_done(&self) -> bool {
        self.winner.is_some() || self.is_full()
    }

    /// Whether a piece can be dropped in `col` right now
    pub fn is_playable(&self, col: usize) -> bool {
        !self.is_done() && col < self.cols && self.column_heights[col] < self.rows
    }

    /// Get legal moves (columns that are not full), ascending
    pub fn legal_moves(&self) -> Vec<usize> {
        if self.is_done() {
            return Vec::new();
        }

        (0..self.cols)
            .filter(|&col| self.column_heights[col] < self.rows)
            .collect()
    }

    /// Drop a piece for the player to move; returns the row it landed in.
    pub fn drop_piece(&mut self, col: usize) -> Result<usize, BoardError> {
        if self.is_done() {
            return Err(BoardError::GameOver);
        }
        if col >= self.cols {
            return Err(BoardError::ColumnOutOfRange {
                column: col,
                cols: self.cols,
            });
        }
        let row = self.column_heights[col];
        if row >= self.rows {
            return Err(BoardError::ColumnFull(col));
        }

        let pos = self.pos(col, row);
        self.board[pos] = Some(self.to_move);
        self.column_heights[col] += 1;
        self.last_move = Some((row, col));

        if self.completes_line(col, row) {
            self.winner = Some(self.to_move);
        }
        self.to_move = self.to_move.opponent();

        Ok(row)
    }

    /// Check if the piece at (col, row) is part of a line of `connect_n`
    fn completes_line(&self, col: usize, row: usize) -> bool {
        let Some(player) = self.board[self.pos(col, row)] else {
            return false;
        };

        // Direction vectors: horizontal, vertical, diagonal /, diagonal \
        let directions: [(isize, isize); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

        directions.iter().any(|&(dc, dr)| {
            let count = 1
                + self.run_length(col, row, dc, dr, player)
                + self.run_length(col, row, -dc, -dr, player);
            count >= self.connect_n
        })
    }

    /// Count consecutive `player` chips starting next to (col, row) along (dc, dr)
    fn run_length(&self, col: usize, row: usize, dc: isize, dr: isize, player: Player) -> usize {
        let mut count = 0;
        let (mut c, mut r) = (col as isize + dc, row as isize + dr);
        while c >= 0 && r >= 0 && (c as usize) < self.cols && (r as usize) < self.rows {
            if self.board[self.pos(c as usize, r as usize)] != Some(player) {
                break;
            }
            count += 1;
            c += dc;
            r += dr;
        }
        count
    }
}

impl Default for Connect4 {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState for Connect4 {
    type Action = Action;

    fn legal_actions(&self) -> Vec<Action> {
        self.legal_moves().into_iter().map(Action::Drop).collect()
    }

    fn is_terminal(&self) -> bool {
        self.is_done()
    }

    /// Illegal drops leave the state unchanged.
    fn apply_action(&mut self, action: Action) {
        let _ = self.drop_piece(action.column());
    }

    fn to_move(&self) -> Player {
        self.to_move
    }

    fn last_mover(&self) -> Option<Player> {
        self.last_move.map(|_| self.to_move.opponent())
    }

    fn winner(&self) -> Option<Player> {
        self.winner
    }
}

/// Renders the top row first: `.` empty, `R` Red, `Y` Yellow, then 1-based column labels.
impl fmt::Display for Connect4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..self.rows).rev() {
            for col in 0..self.cols {
                let symbol = match self.cell(row, col) {
                    Some(Player::Red) => 'R',
                    Some(Player::Yellow) => 'Y',
                    None => '.',
                };
                write!(f, "{:>3}", symbol)?;
            }
            writeln!(f)?;
        }
        for col in 0..self.cols {
            write!(f, "{:>3}", col + 1)?;
        }
        writeln!(f)
    }
}
