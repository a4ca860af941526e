//! Board snapshots and the types that describe a position.
//!
//! A [`Board`] is a plain value: cloning yields an independent grid, and the
//! rules engine always returns a new board instead of mutating the caller's.
//! Equality and hashing cover the full grid content, which is what the ko
//! check and the transposition table key on.

use std::fmt;

use crate::constants::DEFAULT_BOARD_SIZE;
use crate::error::{MoveError, ParseError};
use crate::rules;

/// A point on the board as `(row, col)`, zero-indexed.
pub type Point = (usize, usize);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    #[inline]
    pub fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Exchange-format digit (`1` for Black, `2` for White).
    pub fn digit(self) -> u8 {
        match self {
            Color::Black => 1,
            Color::White => 2,
        }
    }

    pub fn from_digit(d: u8) -> Option<Color> {
        match d {
            1 => Some(Color::Black),
            2 => Some(Color::White),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "black"),
            Color::White => write!(f, "white"),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    Black,
    White,
}

impl Cell {
    /// The stone color on this cell, if any.
    #[inline]
    pub fn stone(self) -> Option<Color> {
        match self {
            Cell::Empty => None,
            Cell::Black => Some(Color::Black),
            Cell::White => Some(Color::White),
        }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// Parse one cell of a board row. Accepts exchange digits and display glyphs.
    pub fn from_char(ch: char) -> Option<Cell> {
        match ch {
            '0' | '.' => Some(Cell::Empty),
            '1' | 'X' => Some(Cell::Black),
            '2' | 'O' => Some(Cell::White),
            _ => None,
        }
    }

    pub fn digit(self) -> char {
        match self {
            Cell::Empty => '0',
            Cell::Black => '1',
            Cell::White => '2',
        }
    }
}

impl From<Color> for Cell {
    fn from(color: Color) -> Self {
        match color {
            Color::Black => Cell::Black,
            Color::White => Cell::White,
        }
    }
}

/// An action: place a stone, or pass.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    Place(Point),
    Pass,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Place((r, c)) => write!(f, "{r},{c}"),
            Move::Pass => write!(f, "PASS"),
        }
    }
}

/// A square grid of cells.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_SIZE)
    }
}

impl Board {
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "board size must be positive");
        Self {
            size,
            cells: vec![Cell::Empty; size * size],
        }
    }

    /// Build a board from text rows, one character per cell.
    ///
    /// Accepts `0`/`1`/`2` (exchange digits) or `.`/`X`/`O`. The board size is
    /// the number of rows; every row must have exactly that many cells.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, ParseError> {
        let size = rows.len();
        if size == 0 {
            return Err(ParseError::LineCount {
                expected: 1,
                got: 0,
            });
        }
        let mut board = Board::new(size);
        for (r, row) in rows.iter().enumerate() {
            let row = row.as_ref().trim();
            let width = row.chars().count();
            if width != size {
                return Err(ParseError::RowWidth {
                    row: r,
                    expected: size,
                    got: width,
                });
            }
            for (c, ch) in row.chars().enumerate() {
                let cell = Cell::from_char(ch).ok_or(ParseError::InvalidCell {
                    character: ch,
                    row: r,
                    col: c,
                })?;
                board.set((r, c), cell);
            }
        }
        Ok(board)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn idx(&self, (r, c): Point) -> usize {
        r * self.size + c
    }

    #[inline]
    pub fn contains(&self, (r, c): Point) -> bool {
        r < self.size && c < self.size
    }

    #[inline]
    pub fn get(&self, p: Point) -> Cell {
        self.cells[self.idx(p)]
    }

    /// Overwrite one cell. Used to build positions; game play goes through
    /// [`rules::apply_move`].
    #[inline]
    pub fn set(&mut self, p: Point, cell: Cell) {
        let i = self.idx(p);
        self.cells[i] = cell;
    }

    /// Up to four in-bounds orthogonal neighbors of `p`, without wraparound.
    pub fn neighbors(&self, (r, c): Point) -> impl Iterator<Item = Point> + use<> {
        let n = self.size;
        [
            (r > 0).then(|| (r - 1, c)),
            (r + 1 < n).then(|| (r + 1, c)),
            (c > 0).then(|| (r, c - 1)),
            (c + 1 < n).then(|| (r, c + 1)),
        ]
        .into_iter()
        .flatten()
    }

    /// Every point in row-major order.
    pub fn points(&self) -> impl Iterator<Item = Point> + use<> {
        let n = self.size;
        (0..n).flat_map(move |r| (0..n).map(move |c| (r, c)))
    }

    /// Dense index of a point, for visited masks sized `size * size`.
    #[inline]
    pub fn index_of(&self, p: Point) -> usize {
        self.idx(p)
    }

    pub fn stone_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| c.is_empty())
    }

    pub fn center(&self) -> Point {
        (self.size / 2, self.size / 2)
    }

    /// Rows rendered as exchange digits.
    pub fn to_rows(&self) -> Vec<String> {
        (0..self.size)
            .map(|r| (0..self.size).map(|c| self.get((r, c)).digit()).collect())
            .collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.size {
            for c in 0..self.size {
                let ch = match self.get((r, c)) {
                    Cell::Black => 'X',
                    Cell::White => 'O',
                    Cell::Empty => '.',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// The position handed to the agent: current board, the board before the
/// opponent's last move (for ko), and the color to move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub board: Board,
    pub prev: Board,
    pub to_move: Color,
}

impl GameState {
    /// An empty board with Black to move.
    pub fn new(size: usize) -> Self {
        Self {
            board: Board::new(size),
            prev: Board::new(size),
            to_move: Color::Black,
        }
    }

    /// Validate `mv` for the side to move and return the following state.
    ///
    /// A pass keeps the grid; either way the current board becomes `prev`.
    pub fn play(&self, mv: Move) -> Result<GameState, MoveError> {
        let board = match mv {
            Move::Pass => self.board.clone(),
            Move::Place(p) => rules::check_move(&self.board, &self.prev, self.to_move, p)?,
        };
        Ok(GameState {
            prev: self.board.clone(),
            board,
            to_move: self.to_move.opponent(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbors_respect_edges() {
        let board = Board::new(5);
        assert_eq!(board.neighbors((0, 0)).count(), 2);
        assert_eq!(board.neighbors((0, 2)).count(), 3);
        assert_eq!(board.neighbors((4, 4)).count(), 2);
        let mut center: Vec<Point> = board.neighbors((2, 2)).collect();
        center.sort();
        assert_eq!(center, vec![(1, 2), (2, 1), (2, 3), (3, 2)]);
    }

    #[test]
    fn test_points_are_row_major() {
        let board = Board::new(3);
        let pts: Vec<Point> = board.points().collect();
        assert_eq!(pts.len(), 9);
        assert_eq!(pts[0], (0, 0));
        assert_eq!(pts[1], (0, 1));
        assert_eq!(pts[3], (1, 0));
        assert_eq!(pts[8], (2, 2));
    }

    #[test]
    fn test_from_rows_accepts_digits_and_glyphs() {
        let a = Board::from_rows(&["120", "000", "000"]).unwrap();
        let b = Board::from_rows(&["XO.", "...", "..."]).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.get((0, 0)), Cell::Black);
        assert_eq!(a.get((0, 1)), Cell::White);
        assert_eq!(a.stone_count(), 2);
        assert_eq!(a.to_rows(), vec!["120", "000", "000"]);
    }

    #[test]
    fn test_from_rows_rejects_bad_input() {
        assert!(matches!(
            Board::from_rows(&["000", "00", "000"]),
            Err(ParseError::RowWidth { row: 1, .. })
        ));
        assert!(matches!(
            Board::from_rows(&["000", "0a0", "000"]),
            Err(ParseError::InvalidCell { character: 'a', row: 1, col: 1 })
        ));
    }

    #[test]
    fn test_clone_is_independent() {
        let board = Board::new(5);
        let mut copy = board.clone();
        copy.set((1, 1), Cell::Black);
        assert!(board.is_empty());
        assert_ne!(board, copy);
    }

    #[test]
    fn test_move_display() {
        assert_eq!(Move::Place((2, 3)).to_string(), "2,3");
        assert_eq!(Move::Pass.to_string(), "PASS");
    }

    #[test]
    fn test_play_advances_state() {
        let state = GameState::new(5);
        let next = state.play(Move::Place((2, 2))).unwrap();
        assert_eq!(next.to_move, Color::White);
        assert_eq!(next.board.get((2, 2)), Cell::Black);
        assert!(next.prev.is_empty());

        let passed = next.play(Move::Pass).unwrap();
        assert_eq!(passed.board, next.board);
        assert_eq!(passed.prev, next.board);
        assert_eq!(passed.to_move, Color::Black);

        assert_eq!(passed.play(Move::Place((2, 2))), Err(MoveError::Occupied));
    }
}
