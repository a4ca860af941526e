//! Constants for board dimensions, search parameters, and evaluation weights.
//!
//! The board size is a runtime value carried by each [`Board`](crate::board::Board);
//! [`DEFAULT_BOARD_SIZE`] is what the agent, the exchange protocol and the CLI
//! assume when nothing else is configured.

// =============================================================================
// Board Geometry
// =============================================================================

/// Default board size (NxN).
pub const DEFAULT_BOARD_SIZE: usize = 5;

// =============================================================================
// Search Parameters
// =============================================================================

/// Default search depth in plies.
pub const DEFAULT_DEPTH: u8 = 2;

/// Deepest search the CLI accepts. A 5x5 search grows by roughly 20x per ply.
pub const MAX_DEPTH: u8 = 6;

/// Unreachable score bound used for the initial alpha-beta window.
pub const INF: f64 = f64::INFINITY;

// =============================================================================
// Evaluation Weights
// =============================================================================

/// Scale applied to the territory term relative to the material/liberty term.
pub const TERRITORY_WEIGHT: f64 = 0.5;

/// Chebyshev radius of the window scanned around an empty point for influence.
pub const INFLUENCE_RADIUS: usize = 2;

/// Influence of an adjacent stone; decreases by one per unit of Manhattan distance.
pub const INFLUENCE_BASE: f64 = 3.0;

/// Extra influence per liberty of the source stone's group.
pub const INFLUENCE_PER_LIBERTY: f64 = 0.3;

/// Multiplier for empty points on the outermost line.
pub const EDGE_FACTOR_FIRST_LINE: f64 = 1.2;

/// Multiplier for empty points on the second line.
pub const EDGE_FACTOR_SECOND_LINE: f64 = 1.1;
