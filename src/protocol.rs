//! Position exchange format.
//!
//! A host hands the agent a position as text and expects one action back.
//!
//! ## Input
//!
//! ```text
//! 1        <- color to move: 1 = Black, 2 = White
//! 00000    <- N rows: the board before the opponent's last move
//! 00000
//! 00100
//! 00000
//! 00000
//! 00000    <- N rows: the current board
//! 00000
//! 00100
//! 00020
//! 00000
//! ```
//!
//! ## Output
//!
//! `row,col` (zero-indexed) or `PASS`.

use std::fs;
use std::path::Path;

use crate::board::{Board, Color, GameState, Move};
use crate::error::{ParseError, ProtocolError};

/// Parse an exchange input for an `size`x`size` board.
///
/// Blank lines are ignored; anything after the current board is ignored too.
pub fn parse_input(text: &str, size: usize) -> Result<GameState, ParseError> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let expected = 1 + 2 * size;
    if lines.len() < expected {
        return Err(ParseError::LineCount {
            expected,
            got: lines.len(),
        });
    }

    let to_move = lines[0]
        .parse::<u8>()
        .ok()
        .and_then(Color::from_digit)
        .ok_or_else(|| ParseError::InvalidColor(lines[0].to_string()))?;
    let prev = Board::from_rows(&lines[1..=size])?;
    let board = Board::from_rows(&lines[size + 1..expected])?;

    Ok(GameState {
        board,
        prev,
        to_move,
    })
}

/// Render a state in the exchange input format.
pub fn format_input(state: &GameState) -> String {
    let mut out = format!("{}\n", state.to_move.digit());
    for row in state.prev.to_rows().iter().chain(state.board.to_rows().iter()) {
        out.push_str(row);
        out.push('\n');
    }
    out
}

/// Render an action in the exchange output format.
pub fn format_move(mv: Move) -> String {
    mv.to_string()
}

pub fn read_input(path: &Path, size: usize) -> Result<GameState, ProtocolError> {
    let text = fs::read_to_string(path)?;
    Ok(parse_input(&text, size)?)
}

pub fn write_output(path: &Path, mv: Move) -> Result<(), ProtocolError> {
    fs::write(path, format_move(mv))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;

    const SAMPLE: &str = "2\n00000\n00000\n00100\n00000\n00000\n00000\n00000\n00100\n00020\n00000\n";

    #[test]
    fn test_parse_input() {
        let state = parse_input(SAMPLE, 5).unwrap();
        assert_eq!(state.to_move, Color::White);
        assert_eq!(state.prev.stone_count(), 1);
        assert_eq!(state.board.get((2, 2)), Cell::Black);
        assert_eq!(state.board.get((3, 3)), Cell::White);
    }

    #[test]
    fn test_format_input_round_trips() {
        let state = parse_input(SAMPLE, 5).unwrap();
        assert_eq!(format_input(&state), SAMPLE);
    }

    #[test]
    fn test_parse_input_tolerates_blank_lines() {
        let padded = SAMPLE.replace('\n', "\n\n");
        assert_eq!(parse_input(&padded, 5), parse_input(SAMPLE, 5));
    }

    #[test]
    fn test_parse_input_errors() {
        assert_eq!(
            parse_input("1\n00000\n", 5),
            Err(ParseError::LineCount {
                expected: 11,
                got: 2
            })
        );
        assert_eq!(
            parse_input(&SAMPLE.replacen('2', "3", 1), 5),
            Err(ParseError::InvalidColor("3".to_string()))
        );
        assert!(matches!(
            parse_input(&SAMPLE.replace("00020", "00030"), 5),
            Err(ParseError::InvalidCell { character: '3', row: 3, col: 3 })
        ));
    }

    #[test]
    fn test_format_move() {
        assert_eq!(format_move(Move::Place((0, 4))), "0,4");
        assert_eq!(format_move(Move::Pass), "PASS");
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.txt");
        let output = dir.path().join("output.txt");

        fs::write(&input, SAMPLE).unwrap();
        let state = read_input(&input, 5).unwrap();
        assert_eq!(state.to_move, Color::White);

        write_output(&output, Move::Place((1, 3))).unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), "1,3");

        assert!(matches!(
            read_input(&dir.path().join("missing.txt"), 5),
            Err(ProtocolError::Io(_))
        ));
    }
}
