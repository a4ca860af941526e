//! Error types for the go5 crate.

use thiserror::Error;

use crate::board::Point;

/// Why a stone may not be placed at a point.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("illegal move: {0:?} is off the board")]
    OutOfBounds(Point),

    #[error("illegal move: point not empty")]
    Occupied,

    /// Filling one's own eye is excluded from the move set.
    #[error("illegal move: fills own eye")]
    OwnEye,

    #[error("illegal move: suicide")]
    Suicide,

    #[error("illegal move: retakes ko")]
    Ko,
}

/// Errors raised while parsing the position exchange format.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected {expected} lines, got {got}")]
    LineCount { expected: usize, got: usize },

    #[error("row {row} has {got} cells, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("invalid cell '{character}' at row {row}, column {col}")]
    InvalidCell { character: char, row: usize, col: usize },

    #[error("invalid color '{0}' (expected 1 or 2)")]
    InvalidColor(String),
}

/// Errors raised while reading or writing exchange files.
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),
}
