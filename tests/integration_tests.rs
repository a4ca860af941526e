//! Integration tests for go5
//!
//! These play whole sequences through the public API: moves are validated by
//! `GameState::play`, chosen by `Agent`, and exchanged through `protocol`.

use std::fs;
use std::process::Command;

use go5::agent::{Agent, AgentConfig};
use go5::board::{Board, Cell, Color, GameState, Move};
use go5::error::MoveError;
use go5::evaluator::EvaluatorKind;
use go5::protocol::{format_input, format_move, parse_input};
use go5::rules::{is_legal, legal_moves};

// =============================================================================
// Helper functions for setting up test positions
// =============================================================================

/// Play a sequence of moves from the empty 5x5 board, alternating colors.
fn setup_position(moves: &[Move]) -> GameState {
    let mut state = GameState::new(5);
    for &mv in moves {
        state = state
            .play(mv)
            .unwrap_or_else(|e| panic!("{mv} rejected: {e}"));
    }
    state
}

/// A state built from rows, with `prev` equal to the current board.
fn setpos(rows: &[&str], to_move: Color) -> GameState {
    let board = Board::from_rows(rows).unwrap();
    GameState {
        prev: board.clone(),
        board,
        to_move,
    }
}

fn agent(depth: u8, evaluator: EvaluatorKind, seed: u64) -> Agent {
    Agent::from_config(&AgentConfig {
        depth,
        evaluator,
        seed: Some(seed),
        ..AgentConfig::default()
    })
}

/// Let one agent play both sides until two passes in a row or `max_moves`.
/// Returns the final state and the number of moves played.
fn self_play(agent: &mut Agent, max_moves: usize) -> (GameState, usize) {
    let mut state = GameState::new(5);
    let mut passes = 0;
    for played in 1..=max_moves {
        let mv = agent.decide(&state);
        if let Move::Place(pt) = mv {
            assert!(
                is_legal(&state.board, &state.prev, state.to_move, pt),
                "agent chose illegal {mv} for {}\n{}",
                state.to_move,
                state.board
            );
        }
        state = state.play(mv).unwrap();
        passes = if mv == Move::Pass { passes + 1 } else { 0 };
        if passes == 2 {
            return (state, played);
        }
    }
    (state, max_moves)
}

// =============================================================================
// Capture and legality through GameState::play
// =============================================================================

#[test]
fn test_corner_capture() {
    let state = setup_position(&[
        Move::Place((0, 1)),
        Move::Place((0, 0)),
        Move::Place((1, 0)),
    ]);
    assert_eq!(state.board.get((0, 0)), Cell::Empty);
    assert_eq!(state.board.stone_count(), 2);
    assert_eq!(state.to_move, Color::White);

    // White cannot refill the captured point, Black will not fill its own eye.
    assert_eq!(state.play(Move::Place((0, 0))), Err(MoveError::Suicide));
    let black = state.play(Move::Pass).unwrap();
    assert_eq!(black.play(Move::Place((0, 0))), Err(MoveError::OwnEye));
}

#[test]
fn test_occupied_and_out_of_bounds() {
    let state = setup_position(&[Move::Place((2, 2))]);
    assert_eq!(state.play(Move::Place((2, 2))), Err(MoveError::Occupied));
    assert_eq!(
        state.play(Move::Place((5, 0))),
        Err(MoveError::OutOfBounds((5, 0)))
    );
}

#[test]
fn test_pass_keeps_board() {
    let state = setup_position(&[Move::Place((2, 2))]);
    let next = state.play(Move::Pass).unwrap();
    assert_eq!(next.board, state.board);
    assert_eq!(next.prev, state.board);
    assert_eq!(next.to_move, Color::Black);
}

// =============================================================================
// Ko
// =============================================================================

const KO_SHAPE: [&str; 5] = [".XO..", "XO.O.", ".XO..", ".....", "....."];

#[test]
fn test_ko_recapture_is_forbidden() {
    let state = setpos(&KO_SHAPE, Color::Black);
    let taken = state.play(Move::Place((1, 2))).unwrap();
    assert_eq!(taken.board.get((1, 1)), Cell::Empty);
    assert_eq!(taken.board.get((1, 2)), Cell::Black);

    assert_eq!(taken.play(Move::Place((1, 1))), Err(MoveError::Ko));
    assert!(!legal_moves(&taken.board, &taken.prev, Color::White).contains(&(1, 1)));
}

#[test]
fn test_ko_recapture_after_exchange_elsewhere() {
    let state = setpos(&KO_SHAPE, Color::Black);
    let state = state
        .play(Move::Place((1, 2)))
        .and_then(|s| s.play(Move::Place((4, 4))))
        .and_then(|s| s.play(Move::Place((3, 3))))
        .unwrap();

    let retaken = state.play(Move::Place((1, 1))).unwrap();
    assert_eq!(retaken.board.get((1, 2)), Cell::Empty);
    assert_eq!(retaken.board.get((1, 1)), Cell::White);
}

#[test]
fn test_agent_never_plays_ko_recapture() {
    let state = setpos(&KO_SHAPE, Color::Black)
        .play(Move::Place((1, 2)))
        .unwrap();
    for seed in 0..5 {
        let mv = agent(2, EvaluatorKind::Liberty, seed).decide(&state);
        assert_ne!(mv, Move::Place((1, 1)));
        assert!(state.play(mv).is_ok());
    }
}

// =============================================================================
// Self-play
// =============================================================================

#[test]
fn test_self_play_liberty() {
    let mut agent = agent(2, EvaluatorKind::Liberty, 11);
    let (state, played) = self_play(&mut agent, 30);
    assert!(played >= 2);
    assert!(state.board.stone_count() <= 25);
}

#[test]
fn test_self_play_influence() {
    let mut agent = agent(2, EvaluatorKind::Influence, 3);
    let (state, played) = self_play(&mut agent, 12);
    assert!(played >= 2);
    assert!(!state.board.is_empty());
}

#[test]
fn test_self_play_is_reproducible() {
    let (a, _) = self_play(&mut agent(1, EvaluatorKind::Liberty, 42), 10);
    let (b, _) = self_play(&mut agent(1, EvaluatorKind::Liberty, 42), 10);
    assert_eq!(a, b);
}

// =============================================================================
// Exchange format end to end
// =============================================================================

#[test]
fn test_parse_decide_format() {
    let text = "2\n00000\n00000\n00000\n00000\n00000\n00000\n00000\n00100\n00000\n00000\n";
    let state = parse_input(text, 5).unwrap();
    assert_eq!(format_input(&state), text);

    let mv = agent(2, EvaluatorKind::Liberty, 5).decide(&state);
    let Move::Place((r, c)) = mv else {
        panic!("expected a placement, got {mv}");
    };
    assert_eq!(format_move(mv), format!("{r},{c}"));
    assert!(is_legal(&state.board, &state.prev, Color::White, (r, c)));
}

#[test]
fn test_genmove_binary() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.txt");
    let output = dir.path().join("output.txt");

    let state = setup_position(&[Move::Place((2, 2)), Move::Place((1, 2))]);
    fs::write(&input, format_input(&state)).unwrap();

    let status = Command::new(env!("CARGO_BIN_EXE_go5"))
        .arg("genmove")
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .args(["--seed", "9", "--depth", "2"])
        .status()
        .unwrap();
    assert!(status.success());

    let written = fs::read_to_string(&output).unwrap();
    let (r, c) = written.trim().split_once(',').unwrap();
    let pt = (r.parse().unwrap(), c.parse().unwrap());
    assert!(is_legal(&state.board, &state.prev, Color::Black, pt));
}

#[test]
fn test_genmove_rejects_bad_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.txt");
    let output = dir.path().join("output.txt");
    fs::write(&input, "7\n00000\n").unwrap();

    let status = Command::new(env!("CARGO_BIN_EXE_go5"))
        .arg("genmove")
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .status()
        .unwrap();
    assert!(!status.success());
    assert!(!output.exists());
}
