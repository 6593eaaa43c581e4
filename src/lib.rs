//! Hoop Sort Solver Library
//!
//! Solves hoop sort puzzles: poles of stacked colored hoops, plus a couple of
//! empty poles, must be rearranged until every pole is empty or holds a
//! single color at full height.
//!
//! ## Modules
//! - `colors`: interned color ids and their names
//! - `pole`: a single stack of hoops and its queries
//! - `state`: game states, move generation, scoring and canonical keys
//! - `solver`: best-first search that reconstructs a winning move list
//! - `loader`: parsing of the plain-text puzzle format
//! - `report`: console rendering of states and outcomes

pub mod colors;
pub mod error;
pub mod loader;
pub mod pole;
pub mod report;
pub mod solver;
pub mod state;

pub use error::LoadError;
pub use loader::{load_puzzle, parse_puzzle};
pub use solver::{solve, solve_with, Outcome, Solution, SolverConfig};
pub use state::{GameState, Move, MoveRecord};
