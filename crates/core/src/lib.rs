//! Pacsearch Core - Position abstractions and common types
//!
//! This crate provides the traits a host game engine implements so that the
//! searchers in `pacsearch` can explore its positions without knowing
//! anything about the board representation.
//!
//! # Types
//!
//! - [`Position`] - Capability set the search skeleton needs
//! - [`PacmanView`] - Extra accessors used by the grid heuristics
//! - [`GridPos`] - Integer grid coordinate
//! - [`GhostState`] - Ghost position plus scared timer

mod error;
mod position;
mod types;

pub use error::{Result, SearchError};
pub use position::{AgentIndex, PacmanView, Position, MAXIMIZER};
pub use types::{manhattan_distance, GhostState, GridPos};
