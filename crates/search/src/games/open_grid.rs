//! A wall-free pacman board.
//!
//! Agent 0 is pacman, agents `1..=ghosts` are ghosts. Scoring follows the
//! classic rules: every pacman move costs a point, food is worth 10, clearing
//! the board is worth 500, and walking into a dangerous ghost costs 500 and
//! ends the game. Eating a capsule scares every ghost for 40 moves; a scared
//! ghost that meets pacman is eaten for 200 and respawns.
//!
//! ```text
//! y
//! 2  . . G
//! 1  . o .
//! 0  P . .
//!    0 1 2  x
//! ```

use super::Outcome;
use pacsearch_core::{AgentIndex, GhostState, GridPos, PacmanView, Position, MAXIMIZER};
use std::collections::BTreeSet;
use std::fmt;

const FOOD_REWARD: f64 = 10.0;
const TIME_PENALTY: f64 = 1.0;
const WIN_REWARD: f64 = 500.0;
const LOSE_PENALTY: f64 = 500.0;
const GHOST_EATEN_REWARD: f64 = 200.0;
const SCARED_TIME: u32 = 40;

/// A grid move. North increases `y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
    Stop,
}

impl Direction {
    /// Every direction in the order `legal_actions` reports them.
    pub const ALL: [Direction; 5] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::Stop,
    ];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::South => (0, -1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::Stop => (0, 0),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct Ghost {
    state: GhostState,
    spawn: GridPos,
}

/// Board state. Cells are `(0, 0)..(width, height)`.
#[derive(Clone, Debug, PartialEq)]
pub struct OpenGrid {
    width: i32,
    height: i32,
    pacman: GridPos,
    food: BTreeSet<GridPos>,
    capsules: BTreeSet<GridPos>,
    ghosts: Vec<Ghost>,
    score: f64,
    outcome: Option<Outcome>,
}

impl OpenGrid {
    /// An empty board with pacman at `pacman` and a score of 0.
    pub fn new(width: i32, height: i32, pacman: GridPos) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            pacman,
            food: BTreeSet::new(),
            capsules: BTreeSet::new(),
            ghosts: Vec::new(),
            score: 0.0,
            outcome: None,
        }
    }

    /// Replace the food cells.
    pub fn with_food<I: IntoIterator<Item = GridPos>>(mut self, food: I) -> Self {
        self.food = food.into_iter().collect();
        self
    }

    /// Replace the capsule cells.
    pub fn with_capsules<I: IntoIterator<Item = GridPos>>(mut self, capsules: I) -> Self {
        self.capsules = capsules.into_iter().collect();
        self
    }

    /// Add a ghost; it respawns where it starts.
    pub fn with_ghost(mut self, ghost: GhostState) -> Self {
        self.ghosts.push(Ghost {
            state: ghost,
            spawn: ghost.position,
        });
        self
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = score;
        self
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    fn in_bounds(&self, pos: GridPos) -> bool {
        (0..self.width).contains(&pos.x) && (0..self.height).contains(&pos.y)
    }

    fn step(&self, from: GridPos, direction: Direction) -> GridPos {
        let (dx, dy) = direction.delta();
        let to = from.offset(dx, dy);
        if self.in_bounds(to) {
            to
        } else {
            from
        }
    }

    fn move_pacman(&mut self, direction: Direction) {
        self.pacman = self.step(self.pacman, direction);
        self.score -= TIME_PENALTY;

        if self.food.remove(&self.pacman) {
            self.score += FOOD_REWARD;
        }
        if self.capsules.remove(&self.pacman) {
            for ghost in &mut self.ghosts {
                ghost.state.scared_timer = SCARED_TIME;
            }
        }

        for index in 0..self.ghosts.len() {
            self.resolve_collision(index);
        }
        if self.outcome.is_none() && self.food.is_empty() {
            self.score += WIN_REWARD;
            self.outcome = Some(Outcome::Win);
        }
    }

    fn move_ghost(&mut self, index: usize, direction: Direction) {
        let from = self.ghosts[index].state.position;
        let to = self.step(from, direction);
        let ghost = &mut self.ghosts[index];
        ghost.state.position = to;
        ghost.state.scared_timer = ghost.state.scared_timer.saturating_sub(1);
        self.resolve_collision(index);
    }

    fn resolve_collision(&mut self, index: usize) {
        if self.outcome.is_some() || self.ghosts[index].state.position != self.pacman {
            return;
        }
        let ghost = &mut self.ghosts[index];
        if ghost.state.is_scared() {
            self.score += GHOST_EATEN_REWARD;
            ghost.state = GhostState::dangerous(ghost.spawn);
        } else {
            self.score -= LOSE_PENALTY;
            self.outcome = Some(Outcome::Lose);
        }
    }
}

impl Position for OpenGrid {
    type Action = Direction;

    fn num_agents(&self) -> usize {
        1 + self.ghosts.len()
    }

    fn legal_actions(&self, agent: AgentIndex) -> Vec<Direction> {
        if self.outcome.is_some() {
            return Vec::new();
        }
        if agent == MAXIMIZER {
            return Direction::ALL
                .into_iter()
                .filter(|&d| d == Direction::Stop || self.step(self.pacman, d) != self.pacman)
                .collect();
        }
        let Some(ghost) = self.ghosts.get(agent - 1) else {
            return Vec::new();
        };
        let from = ghost.state.position;
        let moves: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|&d| d != Direction::Stop && self.step(from, d) != from)
            .collect();
        if moves.is_empty() {
            vec![Direction::Stop]
        } else {
            moves
        }
    }

    fn successor(&self, agent: AgentIndex, action: &Direction) -> Self {
        let mut next = self.clone();
        if next.outcome.is_some() {
            return next;
        }
        if agent == MAXIMIZER {
            next.move_pacman(*action);
        } else if agent <= next.ghosts.len() {
            next.move_ghost(agent - 1, *action);
        }
        next
    }

    fn is_win(&self) -> bool {
        self.outcome == Some(Outcome::Win)
    }

    fn is_lose(&self) -> bool {
        self.outcome == Some(Outcome::Lose)
    }

    fn score(&self) -> f64 {
        self.score
    }
}

impl PacmanView for OpenGrid {
    fn pacman_position(&self) -> GridPos {
        self.pacman
    }

    fn food(&self) -> Vec<GridPos> {
        self.food.iter().copied().collect()
    }

    fn capsules(&self) -> Vec<GridPos> {
        self.capsules.iter().copied().collect()
    }

    fn ghost_states(&self) -> Vec<GhostState> {
        self.ghosts.iter().map(|g| g.state).collect()
    }

    fn is_stop(&self, action: &Direction) -> bool {
        *action == Direction::Stop
    }
}

impl fmt::Display for OpenGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                let cell = GridPos::new(x, y);
                let c = if cell == self.pacman {
                    'P'
                } else if self.ghosts.iter().any(|g| g.state.position == cell) {
                    'G'
                } else if self.capsules.contains(&cell) {
                    'o'
                } else if self.food.contains(&cell) {
                    '.'
                } else {
                    ' '
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        write!(f, "score: {}", self.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corridor() -> OpenGrid {
        OpenGrid::new(4, 1, GridPos::new(0, 0)).with_food([GridPos::new(1, 0), GridPos::new(3, 0)])
    }

    #[test]
    fn test_pacman_legal_actions_respect_bounds() {
        let position = corridor();
        assert_eq!(
            position.legal_actions(0),
            vec![Direction::East, Direction::Stop]
        );
    }

    #[test]
    fn test_eating_food_and_time_penalty() {
        let position = corridor();
        let next = position.successor(0, &Direction::East);
        assert_eq!(next.pacman_position(), GridPos::new(1, 0));
        assert_eq!(next.score(), 9.0);
        assert_eq!(next.food(), vec![GridPos::new(3, 0)]);

        let stay = next.successor(0, &Direction::Stop);
        assert_eq!(stay.score(), 8.0);
    }

    #[test]
    fn test_clearing_food_wins() {
        let position = OpenGrid::new(2, 1, GridPos::new(0, 0)).with_food([GridPos::new(1, 0)]);
        let next = position.successor(0, &Direction::East);
        assert!(next.is_win());
        assert_eq!(next.score(), 509.0);
        assert!(next.legal_actions(0).is_empty());
    }

    #[test]
    fn test_dangerous_ghost_collision_loses() {
        let position = corridor().with_ghost(GhostState::dangerous(GridPos::new(2, 0)));
        assert_eq!(position.num_agents(), 2);

        let next = position.successor(1, &Direction::West);
        assert_eq!(next.ghost_positions(), vec![GridPos::new(1, 0)]);
        assert!(!next.is_lose());

        let lost = next.successor(0, &Direction::East);
        assert!(lost.is_lose());
        assert!(lost.is_terminal());
    }

    #[test]
    fn test_capsule_scares_ghosts() {
        let position = OpenGrid::new(4, 1, GridPos::new(0, 0))
            .with_food([GridPos::new(3, 0)])
            .with_capsules([GridPos::new(1, 0)])
            .with_ghost(GhostState::dangerous(GridPos::new(2, 0)));

        let powered = position.successor(0, &Direction::East);
        assert!(powered.capsules().is_empty());
        assert_eq!(powered.ghost_states()[0].scared_timer, SCARED_TIME);

        let ghost_moved = powered.successor(1, &Direction::West);
        assert!(!ghost_moved.is_lose());
        // Eaten on contact and sent back to its spawn.
        assert_eq!(ghost_moved.ghost_states()[0], GhostState::dangerous(GridPos::new(2, 0)));
        assert_eq!(ghost_moved.score(), -1.0 + GHOST_EATEN_REWARD);
    }

    #[test]
    fn test_ghost_never_stops_unless_boxed_in() {
        let position = corridor().with_ghost(GhostState::dangerous(GridPos::new(3, 0)));
        assert_eq!(position.legal_actions(1), vec![Direction::West]);

        let tiny = OpenGrid::new(1, 1, GridPos::new(0, 0))
            .with_food([GridPos::new(0, 0)])
            .with_ghost(GhostState::dangerous(GridPos::new(0, 0)));
        assert_eq!(tiny.legal_actions(1), vec![Direction::Stop]);
    }

    #[test]
    fn test_display() {
        let position = corridor().with_ghost(GhostState::dangerous(GridPos::new(2, 0)));
        assert_eq!(position.to_string(), "P.G.\nscore: 0");
    }
}
