//! Negamax search with alpha-beta pruning and a transposition table.
//!
//! A [`Search`] owns one [`TranspositionTable`] and lives for a single
//! decision; nothing is shared between decisions. [`SearchEngine`] is the
//! reusable entry point that builds a fresh `Search` per call.
//!
//! Scores are always from the perspective of the side to move at the node.
//! Leaves are evaluated for the color the search was started for and negated
//! when the other side is to move.
//!
//! Table entries carry a [`Bound`], so a value produced under a narrow window
//! is only reused where it is valid. The root additionally re-searches any
//! child whose bounded score ties the current best, which makes the returned
//! set of equally-best moves identical to that of an unpruned search.

use std::collections::HashMap;

use log::{debug, trace};

use crate::board::{Board, Color, GameState, Move, Point};
use crate::constants::INF;
use crate::evaluator::Evaluator;
use crate::rules::{apply_move, legal_moves};

/// How a stored score relates to the true negamax value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    /// The stored score is exact
    Exact,
    /// The real score might be higher
    Lower,
    /// The real score might be lower
    Upper,
}

#[derive(Clone, Copy, Debug)]
struct TtEntry {
    score: f64,
    bound: Bound,
}

/// Transposition key: board content, remaining depth, and color to move.
///
/// The board is compared structurally, so distinct grids never share a key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SearchKey {
    board: Board,
    depth: u8,
    color: Color,
}

impl SearchKey {
    pub fn new(board: &Board, depth: u8, color: Color) -> Self {
        Self {
            board: board.clone(),
            depth,
            color,
        }
    }
}

/// The best score at the root and every move achieving it, in row-major order.
#[derive(Clone, Debug, PartialEq)]
pub struct RootEntry {
    pub score: f64,
    pub moves: Vec<Point>,
}

/// Search-scoped cache of node scores and root move sets.
#[derive(Default)]
pub struct TranspositionTable {
    scores: HashMap<SearchKey, TtEntry>,
    moves: HashMap<SearchKey, RootEntry>,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// A stored score usable inside the `(alpha, beta)` window.
    pub fn probe(&self, key: &SearchKey, alpha: f64, beta: f64) -> Option<f64> {
        let entry = self.scores.get(key)?;
        match entry.bound {
            Bound::Exact => Some(entry.score),
            Bound::Lower if entry.score >= beta => Some(entry.score),
            Bound::Upper if entry.score <= alpha => Some(entry.score),
            _ => None,
        }
    }

    /// The raw entry for `key`, regardless of window.
    pub fn get(&self, key: &SearchKey) -> Option<(f64, Bound)> {
        self.scores.get(key).map(|e| (e.score, e.bound))
    }

    /// Record a score. An exact entry is never replaced by a bound.
    pub fn store(&mut self, key: SearchKey, score: f64, bound: Bound) {
        if bound != Bound::Exact
            && matches!(self.scores.get(&key), Some(e) if e.bound == Bound::Exact)
        {
            return;
        }
        self.scores.insert(key, TtEntry { score, bound });
    }

    pub fn root_moves(&self, key: &SearchKey) -> Option<&RootEntry> {
        self.moves.get(key)
    }

    pub fn store_root_moves(&mut self, key: SearchKey, entry: RootEntry) {
        self.moves.insert(key, entry);
    }

    /// Number of stored node scores.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// Counters collected during one search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes entered, including cache hits
    pub nodes: u64,
    /// Static evaluations performed
    pub leaves: u64,
    /// Nodes answered from the transposition table
    pub cache_hits: u64,
    /// Beta cutoffs
    pub cutoffs: u64,
    /// Root children searched a second time to settle a tie
    pub researches: u64,
}

/// State of one decision's search.
pub struct Search<E> {
    evaluator: E,
    root_color: Color,
    table: TranspositionTable,
    stats: SearchStats,
}

impl<E: Evaluator> Search<E> {
    pub fn new(evaluator: E, root_color: Color) -> Self {
        Self {
            evaluator,
            root_color,
            table: TranspositionTable::new(),
            stats: SearchStats::default(),
        }
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    pub fn table(&self) -> &TranspositionTable {
        &self.table
    }

    fn leaf(&mut self, board: &Board, color: Color) -> f64 {
        self.stats.leaves += 1;
        let score = self.evaluator.score(board, self.root_color);
        if color == self.root_color { score } else { -score }
    }

    /// Negamax value of `board` for `color`, `depth` plies deep.
    ///
    /// `prev` is the board before the last move, for the ko rule. A node where
    /// `color` has no legal placement is scored statically; passing is not
    /// searched.
    pub fn search(
        &mut self,
        board: &Board,
        prev: &Board,
        depth: u8,
        mut alpha: f64,
        beta: f64,
        color: Color,
    ) -> f64 {
        self.stats.nodes += 1;

        let key = SearchKey::new(board, depth, color);
        if let Some(score) = self.table.probe(&key, alpha, beta) {
            self.stats.cache_hits += 1;
            return score;
        }

        if depth == 0 {
            let score = self.leaf(board, color);
            self.table.store(key, score, Bound::Exact);
            return score;
        }

        let moves = legal_moves(board, prev, color);
        if moves.is_empty() {
            let score = self.leaf(board, color);
            self.table.store(key, score, Bound::Exact);
            return score;
        }

        let alpha_orig = alpha;
        let mut best = -INF;
        for pt in moves {
            let child = apply_move(board, Move::Place(pt), color);
            let score = -self.search(&child, board, depth - 1, -beta, -alpha, color.opponent());
            best = best.max(score);
            alpha = alpha.max(best);
            if alpha >= beta {
                self.stats.cutoffs += 1;
                break;
            }
        }

        let bound = if best <= alpha_orig {
            Bound::Upper
        } else if best >= beta {
            Bound::Lower
        } else {
            Bound::Exact
        };
        self.table.store(key, best, bound);
        best
    }

    /// Search every root move for the root color and collect all moves tied
    /// for the best score.
    ///
    /// `moves` must be the legal moves of `board`; the ko rule is applied when
    /// they are generated. The result is cached under the root key, so
    /// repeating the call returns the stored set.
    pub fn root(&mut self, board: &Board, depth: u8, moves: &[Point]) -> RootEntry {
        debug_assert!(depth > 0, "root search needs at least one ply");
        let color = self.root_color;
        let key = SearchKey::new(board, depth, color);
        if let Some(entry) = self.table.root_moves(&key) {
            self.stats.cache_hits += 1;
            return entry.clone();
        }
        self.stats.nodes += 1;

        let mut best = -INF;
        let mut best_moves = Vec::new();
        for &pt in moves {
            let child = apply_move(board, Move::Place(pt), color);
            let opp = color.opponent();
            let mut score = -self.search(&child, board, depth - 1, -INF, -best, opp);
            if score == best {
                // A child failing high reports exactly the current best even
                // when it is worse; settle it with an open window.
                self.stats.researches += 1;
                score = -self.search(&child, board, depth - 1, -INF, INF, opp);
            }
            trace!("root {pt:?} scored {score:.3}");

            if score > best {
                best = score;
                best_moves.clear();
                best_moves.push(pt);
            } else if score == best {
                best_moves.push(pt);
            }
        }

        let entry = RootEntry {
            score: best,
            moves: best_moves,
        };
        self.table.store_root_moves(key, entry.clone());
        entry
    }
}

/// What the search recommends.
#[derive(Clone, Debug, PartialEq)]
pub enum SearchOutcome {
    /// The side to move has no legal placement.
    Pass,
    /// Every move achieving the best score. Never empty.
    Moves { score: f64, moves: Vec<Point> },
}

/// Depth-limited alpha-beta engine over a pluggable evaluator.
pub struct SearchEngine<E> {
    evaluator: E,
    depth: u8,
}

impl<E: Evaluator> SearchEngine<E> {
    /// Create an engine searching `depth` plies (at least one).
    pub fn new(evaluator: E, depth: u8) -> Self {
        Self {
            evaluator,
            depth: depth.max(1),
        }
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Choose among the best moves for the side to move.
    ///
    /// Returns [`SearchOutcome::Pass`] without searching when the side to move
    /// has no legal placement. Picking one of several tied moves is left to
    /// the caller.
    pub fn choose_move(&self, state: &GameState) -> SearchOutcome {
        self.analyze(state).0
    }

    /// Like [`choose_move`](Self::choose_move), also returning search counters.
    pub fn analyze(&self, state: &GameState) -> (SearchOutcome, SearchStats) {
        let color = state.to_move;
        let moves = legal_moves(&state.board, &state.prev, color);
        if moves.is_empty() {
            if legal_moves(&state.board, &state.prev, color.opponent()).is_empty() {
                debug!("{color}: neither side has a legal move, position is settled");
            } else {
                debug!("{color}: no legal move");
            }
            return (SearchOutcome::Pass, SearchStats::default());
        }

        let mut search = Search::new(&self.evaluator, color);
        let entry = search.root(&state.board, self.depth, &moves);
        let stats = search.stats();
        debug!(
            "{color}: depth {} over {} moves, {} nodes, {} leaves, {} cache hits, {} cutoffs, {} re-searches; best {:.3} shared by {}",
            self.depth,
            moves.len(),
            stats.nodes,
            stats.leaves,
            stats.cache_hits,
            stats.cutoffs,
            stats.researches,
            entry.score,
            entry.moves.len(),
        );

        (
            SearchOutcome::Moves {
                score: entry.score,
                moves: entry.moves,
            },
            stats,
        )
    }
}
