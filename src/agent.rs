//! The playing agent.
//!
//! One call to [`Agent::decide`] is one turn: take the fixed opening point
//! when it applies, otherwise run the alpha-beta search and pick uniformly
//! among the equally-best moves.

use log::debug;

use crate::board::{GameState, Move, Point};
use crate::constants::DEFAULT_DEPTH;
use crate::evaluator::{Evaluator, EvaluatorKind};
use crate::rules::is_legal;
use crate::search::{SearchEngine, SearchOutcome};

/// Runtime settings for an [`Agent`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AgentConfig {
    /// Search depth in plies
    pub depth: u8,
    /// Play the center on the first two plies without searching
    pub opening_override: bool,
    pub evaluator: EvaluatorKind,
    /// Seed for tie-breaking; `None` seeds from the environment
    pub seed: Option<u64>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            opening_override: true,
            evaluator: EvaluatorKind::default(),
            seed: None,
        }
    }
}

pub struct Agent<E = Box<dyn Evaluator>> {
    engine: SearchEngine<E>,
    opening_override: bool,
    rng: fastrand::Rng,
}

impl Agent<Box<dyn Evaluator>> {
    /// Build an agent using the evaluator named in `config`.
    pub fn from_config(config: &AgentConfig) -> Self {
        Self::new(config.evaluator.build(), config)
    }
}

impl<E: Evaluator> Agent<E> {
    /// Build an agent around a custom evaluator. `config.evaluator` is ignored.
    pub fn new(evaluator: E, config: &AgentConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        Self {
            engine: SearchEngine::new(evaluator, config.depth),
            opening_override: config.opening_override,
            rng,
        }
    }

    /// Choose the action for the side to move in `state`.
    pub fn decide(&mut self, state: &GameState) -> Move {
        if self.opening_override {
            if let Some(pt) = opening_move(state) {
                debug!("{}: opening override at {pt:?}", state.to_move);
                return Move::Place(pt);
            }
        }

        match self.engine.choose_move(state) {
            SearchOutcome::Pass => Move::Pass,
            SearchOutcome::Moves { moves, .. } => {
                let pt = moves[self.rng.usize(..moves.len())];
                debug!("{}: picked {pt:?} of {} tied moves", state.to_move, moves.len());
                Move::Place(pt)
            }
        }
    }
}

/// The center point on an empty board, or on the second ply while the
/// center is still free.
fn opening_move(state: &GameState) -> Option<Point> {
    let board = &state.board;
    let center = board.center();
    let early = match board.stone_count() {
        0 => true,
        1 => board.get(center).is_empty(),
        _ => false,
    };
    (early && is_legal(board, &state.prev, state.to_move, center)).then_some(center)
}
