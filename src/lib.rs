//! go5: a minimax Go agent for small boards.
//!
//! This crate provides a rules engine for Go on a small square board (5x5 by
//! default) and an alpha-beta search that picks moves for one side.
//!
//! ## Modules
//!
//! - [`board`] - Board snapshots, colors, moves, and game state
//! - [`rules`] - Groups, liberties, captures, ko, and legal moves
//! - [`evaluator`] - Static evaluation heuristics
//! - [`search`] - Negamax alpha-beta search with a transposition table
//! - [`agent`] - Opening override and tie-breaking around the search
//! - [`protocol`] - Text format for exchanging positions and moves
//! - [`constants`] - Default sizes, depths, and evaluation weights
//! - [`error`] - Error types
//!
//! ## Example
//!
//! ```
//! use go5::agent::{Agent, AgentConfig};
//! use go5::board::{GameState, Move};
//!
//! let mut agent = Agent::from_config(&AgentConfig::default());
//!
//! // Black opens on the center point without searching.
//! let state = GameState::new(5);
//! assert_eq!(agent.decide(&state), Move::Place((2, 2)));
//!
//! // White replies through the search.
//! let state = state.play(Move::Place((2, 2))).unwrap();
//! let reply = agent.decide(&state);
//! assert!(state.play(reply).is_ok());
//! ```

pub mod agent;
pub mod board;
pub mod constants;
pub mod error;
pub mod evaluator;
pub mod protocol;
pub mod rules;
pub mod search;
