//! Small positions for exercising the searchers.
//!
//! These stand in for a real game engine in tests:
//! - [`TreePosition`] walks an explicit game tree with fixed scores
//! - [`OpenGrid`] is a wall-free pacman board with food, capsules and ghosts

pub mod open_grid;
pub mod tree;

pub use open_grid::{Direction, OpenGrid};
pub use tree::{GameTree, TreePosition};

/// How a finished game ended, from the maximizer's side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    Win,
    Lose,
}
