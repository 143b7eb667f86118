use std::fmt::Debug;

use crate::types::{GhostState, GridPos};

/// Index of an agent within a position. Agent 0 is always the maximizer.
pub type AgentIndex = usize;

/// The agent whose action the searchers choose.
pub const MAXIMIZER: AgentIndex = 0;

/// A multi-agent game position as seen by the searchers.
///
/// The searchers only read positions: generating a successor returns a new
/// value and leaves `self` untouched. Agents move in a fixed round-robin
/// order `0, 1, .., N-1, 0, ..`.
pub trait Position: Clone {
    /// A move one agent can make (e.g. a direction on a grid).
    type Action: Clone + Debug + PartialEq;

    /// Total number of agents, at least 1.
    fn num_agents(&self) -> usize;

    /// Legal actions for `agent` in this position.
    ///
    /// The order matters: the searchers break root ties in favour of the
    /// action that appears last.
    fn legal_actions(&self, agent: AgentIndex) -> Vec<Self::Action>;

    /// Returns the position after `agent` plays `action`.
    fn successor(&self, agent: AgentIndex, action: &Self::Action) -> Self;

    /// True if the maximizer has won.
    fn is_win(&self) -> bool;

    /// True if the maximizer has lost.
    fn is_lose(&self) -> bool;

    /// Intrinsic game score.
    fn score(&self) -> f64;

    /// Win or lose; the searchers stop descending here.
    fn is_terminal(&self) -> bool {
        self.is_win() || self.is_lose()
    }
}

/// Accessors used by the grid heuristics, on top of [`Position`].
///
/// The search skeleton never calls these.
pub trait PacmanView: Position {
    /// Current cell of the maximizer.
    fn pacman_position(&self) -> GridPos;

    /// Cells that still hold food.
    fn food(&self) -> Vec<GridPos>;

    /// Cells that still hold a power capsule.
    fn capsules(&self) -> Vec<GridPos>;

    /// One entry per ghost agent, in agent order.
    fn ghost_states(&self) -> Vec<GhostState>;

    /// True for the "stay in place" action.
    fn is_stop(&self, action: &Self::Action) -> bool;

    fn ghost_positions(&self) -> Vec<GridPos> {
        self.ghost_states().iter().map(|g| g.position).collect()
    }
}
