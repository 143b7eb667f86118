//! Grid types shared by host engines and heuristics.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An integer cell coordinate on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell offset by `(dx, dy)`.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl From<(i32, i32)> for GridPos {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Grid L1 distance between two cells.
pub fn manhattan_distance(a: GridPos, b: GridPos) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

/// A ghost's location and how many moves it stays scared for.
///
/// A scared timer of zero means the ghost is dangerous.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GhostState {
    pub position: GridPos,
    pub scared_timer: u32,
}

impl GhostState {
    pub fn new(position: GridPos, scared_timer: u32) -> Self {
        Self {
            position,
            scared_timer,
        }
    }

    /// A ghost with no scared time left.
    pub fn dangerous(position: GridPos) -> Self {
        Self::new(position, 0)
    }

    pub fn is_scared(&self) -> bool {
        self.scared_timer > 0
    }
}
