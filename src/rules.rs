//! Go rules over immutable board snapshots.
//!
//! This module provides the core game logic:
//! - Group discovery and liberty counting (visited-mask flood fill)
//! - Capture resolution
//! - Eye detection used to prune obviously self-owned points
//! - Legality testing with suicide and ko prohibition
//! - Move simulation producing a new [`Board`]
//!
//! Every function is pure: callers keep their board, and simulated moves come
//! back as fresh snapshots so search branches never observe each other.

use crate::board::{Board, Cell, Color, Move, Point};
use crate::error::MoveError;

/// A maximal set of same-colored, orthogonally connected stones.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
    pub color: Color,
    pub stones: Vec<Point>,
}

impl Group {
    pub fn len(&self) -> usize {
        self.stones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stones.is_empty()
    }
}

/// Collect the stones of `color` connected to `start`, marking them in `visited`.
///
/// `visited` is a mask indexed by [`Board::index_of`]; sharing it across calls
/// lets a full-board scan discover each group exactly once.
fn flood(board: &Board, start: Point, color: Color, visited: &mut [bool]) -> Vec<Point> {
    let target = Cell::from(color);
    let mut stones = Vec::new();
    let mut stack = vec![start];
    visited[board.index_of(start)] = true;

    while let Some(pt) = stack.pop() {
        stones.push(pt);
        for n in board.neighbors(pt) {
            let i = board.index_of(n);
            if !visited[i] && board.get(n) == target {
                visited[i] = true;
                stack.push(n);
            }
        }
    }
    stones
}

/// The group containing `pt`, or `None` if the point is empty.
pub fn group(board: &Board, pt: Point) -> Option<Group> {
    let color = board.get(pt).stone()?;
    let mut visited = vec![false; board.size() * board.size()];
    Some(Group {
        color,
        stones: flood(board, pt, color, &mut visited),
    })
}

/// The distinct empty points adjacent to any stone of `group`.
pub fn liberties(board: &Board, group: &Group) -> Vec<Point> {
    let mut seen = vec![false; board.size() * board.size()];
    let mut libs = Vec::new();
    for &pt in &group.stones {
        for n in board.neighbors(pt) {
            let i = board.index_of(n);
            if board.get(n).is_empty() && !seen[i] {
                seen[i] = true;
                libs.push(n);
            }
        }
    }
    libs
}

pub fn liberty_count(board: &Board, group: &Group) -> usize {
    liberties(board, group).len()
}

fn has_liberty(board: &Board, group: &Group) -> bool {
    group
        .stones
        .iter()
        .any(|&pt| board.neighbors(pt).any(|n| board.get(n).is_empty()))
}

/// Every group of `color` with no liberties.
///
/// Scans the board once; stones already assigned to a discovered group are
/// skipped, so each cell is visited a bounded number of times.
pub fn captured_groups(board: &Board, color: Color) -> Vec<Group> {
    let target = Cell::from(color);
    let mut visited = vec![false; board.size() * board.size()];
    let mut captured = Vec::new();

    for pt in board.points() {
        if board.get(pt) != target || visited[board.index_of(pt)] {
            continue;
        }
        let group = Group {
            color,
            stones: flood(board, pt, color, &mut visited),
        };
        if !has_liberty(board, &group) {
            captured.push(group);
        }
    }
    captured
}

/// Remove every captured stone of `color`. Returns the board unchanged when
/// nothing is captured.
pub fn resolve_captures(mut board: Board, color: Color) -> Board {
    for group in captured_groups(&board, color) {
        for pt in group.stones {
            board.set(pt, Cell::Empty);
        }
    }
    board
}

/// Check if `pt` is an eye of `color`: empty, with every orthogonal neighbor
/// holding a `color` stone.
///
/// Diagonals are ignored and edge points need fewer neighbors, so this
/// reports some false eyes. It only filters the move list.
pub fn is_eye(board: &Board, pt: Point, color: Color) -> bool {
    let own = Cell::from(color);
    board.get(pt).is_empty() && board.neighbors(pt).all(|n| board.get(n) == own)
}

/// Test a placement for `player` and return the resulting board.
///
/// Opponent captures are resolved before the suicide test, so a move that
/// only gains liberties by capturing is legal. The ko test compares the
/// result against `prev`, the board before the opponent's last move.
///
/// # Errors
/// - [`MoveError::OutOfBounds`] - the point is off the board
/// - [`MoveError::Occupied`] - the point is not empty
/// - [`MoveError::OwnEye`] - the point is an eye of `player`
/// - [`MoveError::Suicide`] - the placed stone's group has no liberties
/// - [`MoveError::Ko`] - the result recreates `prev`
pub fn check_move(
    board: &Board,
    prev: &Board,
    player: Color,
    pt: Point,
) -> Result<Board, MoveError> {
    if !board.contains(pt) {
        return Err(MoveError::OutOfBounds(pt));
    }
    if !board.get(pt).is_empty() {
        return Err(MoveError::Occupied);
    }
    if is_eye(board, pt, player) {
        return Err(MoveError::OwnEye);
    }

    let next = apply_move(board, Move::Place(pt), player);

    let mut visited = vec![false; next.size() * next.size()];
    let own = Group {
        color: player,
        stones: flood(&next, pt, player, &mut visited),
    };
    if !has_liberty(&next, &own) {
        return Err(MoveError::Suicide);
    }
    if next == *prev {
        return Err(MoveError::Ko);
    }
    Ok(next)
}

pub fn is_legal(board: &Board, prev: &Board, player: Color, pt: Point) -> bool {
    check_move(board, prev, player, pt).is_ok()
}

/// All legal placements for `player`, in row-major order. May be empty.
pub fn legal_moves(board: &Board, prev: &Board, player: Color) -> Vec<Point> {
    board
        .points()
        .filter(|&pt| is_legal(board, prev, player, pt))
        .collect()
}

/// Play `mv` for `player` and resolve opponent captures.
///
/// Does not validate: callers must have confirmed legality through
/// [`is_legal`] or [`legal_moves`]. A pass returns a copy of the board.
pub fn apply_move(board: &Board, mv: Move, player: Color) -> Board {
    match mv {
        Move::Pass => board.clone(),
        Move::Place(pt) => {
            let mut next = board.clone();
            next.set(pt, Cell::from(player));
            resolve_captures(next, player.opponent())
        }
    }
}

/// For every point, the liberty count of the group occupying it (0 when empty).
///
/// Indexed by [`Board::index_of`]. Each group is discovered once.
pub fn liberty_map(board: &Board) -> Vec<usize> {
    let mut map = vec![0; board.size() * board.size()];
    let mut visited = vec![false; board.size() * board.size()];

    for pt in board.points() {
        let Some(color) = board.get(pt).stone() else {
            continue;
        };
        if visited[board.index_of(pt)] {
            continue;
        }
        let group = Group {
            color,
            stones: flood(board, pt, color, &mut visited),
        };
        let libs = liberty_count(board, &group);
        for &s in &group.stones {
            map[board.index_of(s)] = libs;
        }
    }
    map
}
