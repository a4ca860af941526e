//! Static position evaluation.
//!
//! An [`Evaluator`] scores a board from one color's perspective; higher is
//! better for that color. The search only calls it at depth-limit leaves and
//! at positions where the side to move has no legal placement.
//!
//! Two heuristics are provided:
//! - [`LibertyEvaluator`] - stones plus the liberties of their groups
//! - [`InfluenceEvaluator`] - the same, plus a distance-weighted influence
//!   estimate of who controls each empty point

use crate::board::{Board, Color, Point};
use crate::constants::{
    EDGE_FACTOR_FIRST_LINE, EDGE_FACTOR_SECOND_LINE, INFLUENCE_BASE, INFLUENCE_PER_LIBERTY,
    INFLUENCE_RADIUS, TERRITORY_WEIGHT,
};
use crate::rules::liberty_map;

/// Scores a board for `color`.
pub trait Evaluator {
    fn score(&self, board: &Board, color: Color) -> f64;
}

impl<E: Evaluator + ?Sized> Evaluator for &E {
    fn score(&self, board: &Board, color: Color) -> f64 {
        (**self).score(board, color)
    }
}

impl<E: Evaluator + ?Sized> Evaluator for Box<E> {
    fn score(&self, board: &Board, color: Color) -> f64 {
        (**self).score(board, color)
    }
}

/// Adapts a plain function or closure into an [`Evaluator`].
pub struct FnEvaluator<F>(pub F);

impl<F> Evaluator for FnEvaluator<F>
where
    F: Fn(&Board, Color) -> f64,
{
    fn score(&self, board: &Board, color: Color) -> f64 {
        (self.0)(board, color)
    }
}

/// Material and liberties: each own stone adds `1 + liberties of its group`,
/// each opponent stone subtracts the same.
#[derive(Clone, Copy, Debug, Default)]
pub struct LibertyEvaluator;

impl Evaluator for LibertyEvaluator {
    fn score(&self, board: &Board, color: Color) -> f64 {
        material(board, color, &liberty_map(board))
    }
}

/// [`LibertyEvaluator`] plus a territory estimate scaled by `territory_weight`.
#[derive(Clone, Copy, Debug)]
pub struct InfluenceEvaluator {
    pub territory_weight: f64,
}

impl Default for InfluenceEvaluator {
    fn default() -> Self {
        Self {
            territory_weight: TERRITORY_WEIGHT,
        }
    }
}

impl Evaluator for InfluenceEvaluator {
    fn score(&self, board: &Board, color: Color) -> f64 {
        let libs = liberty_map(board);
        material(board, color, &libs) + self.territory_weight * territory_with(board, color, &libs)
    }
}

/// Which built-in evaluator to use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EvaluatorKind {
    #[default]
    Liberty,
    Influence,
}

impl EvaluatorKind {
    pub fn build(self) -> Box<dyn Evaluator> {
        match self {
            EvaluatorKind::Liberty => Box::new(LibertyEvaluator),
            EvaluatorKind::Influence => Box::new(InfluenceEvaluator::default()),
        }
    }
}

fn material(board: &Board, color: Color, libs: &[usize]) -> f64 {
    let mut score = 0.0;
    for pt in board.points() {
        let Some(stone) = board.get(pt).stone() else {
            continue;
        };
        let value = 1.0 + libs[board.index_of(pt)] as f64;
        if stone == color {
            score += value;
        } else {
            score -= value;
        }
    }
    score
}

/// Territory control estimate for `color`.
///
/// Every empty point accumulates influence from each stone in the surrounding
/// `(2 * INFLUENCE_RADIUS + 1)` square: `max(0, INFLUENCE_BASE - manhattan)`
/// plus `INFLUENCE_PER_LIBERTY` per liberty of the stone's group. The point
/// adds the influence difference, scaled by its edge factor, with the sign of
/// the stronger side. Equal influence contributes nothing.
pub fn territory(board: &Board, color: Color) -> f64 {
    territory_with(board, color, &liberty_map(board))
}

fn territory_with(board: &Board, color: Color, libs: &[usize]) -> f64 {
    let last = board.size() - 1;
    let mut score = 0.0;

    for (i, j) in board.points() {
        if !board.get((i, j)).is_empty() {
            continue;
        }
        let mut own = 0.0;
        let mut other = 0.0;
        for r in i.saturating_sub(INFLUENCE_RADIUS)..=(i + INFLUENCE_RADIUS).min(last) {
            for c in j.saturating_sub(INFLUENCE_RADIUS)..=(j + INFLUENCE_RADIUS).min(last) {
                let Some(stone) = board.get((r, c)).stone() else {
                    continue;
                };
                let dist = (i.abs_diff(r) + j.abs_diff(c)) as f64;
                let influence = (INFLUENCE_BASE - dist).max(0.0)
                    + INFLUENCE_PER_LIBERTY * libs[board.index_of((r, c))] as f64;
                if stone == color {
                    own += influence;
                } else {
                    other += influence;
                }
            }
        }
        score += (own - other) * edge_factor(board, (i, j));
    }
    score
}

/// Empty points on the first and second lines are worth slightly more.
fn edge_factor(board: &Board, (r, c): Point) -> f64 {
    let last = board.size() - 1;
    let line = r.min(c).min(last - r).min(last - c);
    match line {
        0 => EDGE_FACTOR_FIRST_LINE,
        1 => EDGE_FACTOR_SECOND_LINE,
        _ => 1.0,
    }
}
