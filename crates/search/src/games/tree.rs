//! Explicit game trees.
//!
//! Every node carries the score the evaluator sees and, optionally, a
//! win/lose outcome. Actions are child indices, so `legal_actions` is
//! `0..children.len()` for whichever agent is to move.

use super::Outcome;
use pacsearch_core::{AgentIndex, Position};
use rand::Rng;
use std::sync::Arc;

/// A node of an explicit game tree.
#[derive(Clone, Debug, PartialEq)]
pub struct GameTree {
    score: f64,
    outcome: Option<Outcome>,
    children: Vec<Arc<GameTree>>,
}

impl GameTree {
    /// A non-terminal node without moves.
    pub fn leaf(score: f64) -> Self {
        Self {
            score,
            outcome: None,
            children: Vec::new(),
        }
    }

    /// A terminal node won by the maximizer.
    pub fn win(score: f64) -> Self {
        Self {
            outcome: Some(Outcome::Win),
            ..Self::leaf(score)
        }
    }

    /// A terminal node lost by the maximizer.
    pub fn lose(score: f64) -> Self {
        Self {
            outcome: Some(Outcome::Lose),
            ..Self::leaf(score)
        }
    }

    /// An inner node with score 0.
    pub fn node(children: Vec<GameTree>) -> Self {
        Self {
            score: 0.0,
            outcome: None,
            children: children.into_iter().map(Arc::new).collect(),
        }
    }

    /// An inner node whose children are plain leaves.
    pub fn leaves(scores: &[f64]) -> Self {
        Self::node(scores.iter().map(|&s| Self::leaf(s)).collect())
    }

    /// Replace this node's score.
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = score;
        self
    }

    /// Replace this node's outcome. Terminal nodes may still have children.
    pub fn with_outcome(mut self, outcome: Outcome) -> Self {
        self.outcome = Some(outcome);
        self
    }

    /// A random tree of exactly `height` moves along every non-terminal line.
    ///
    /// Inner nodes get 1..=`max_branching` children and about one node in
    /// five ends the game early. Scores are small integers so ties are common.
    pub fn random<R: Rng>(rng: &mut R, height: usize, max_branching: usize) -> Self {
        let score = rng.gen_range(-20..=20) as f64;
        if height == 0 {
            return Self::leaf(score);
        }
        match rng.gen_range(0..10) {
            0 => Self::win(score),
            1 => Self::lose(score),
            _ => {
                let branching = rng.gen_range(1..=max_branching.max(1));
                let children = (0..branching)
                    .map(|_| Self::random(rng, height - 1, max_branching))
                    .collect();
                Self::node(children).with_score(score)
            }
        }
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn children(&self) -> &[Arc<GameTree>] {
        &self.children
    }
}

/// A cursor into a [`GameTree`] for a fixed number of agents.
#[derive(Clone, Debug)]
pub struct TreePosition {
    node: Arc<GameTree>,
    num_agents: usize,
}

impl TreePosition {
    pub fn new(tree: GameTree, num_agents: usize) -> Self {
        Self {
            node: Arc::new(tree),
            num_agents,
        }
    }

    pub fn node(&self) -> &GameTree {
        &self.node
    }
}

impl Position for TreePosition {
    type Action = usize;

    fn num_agents(&self) -> usize {
        self.num_agents
    }

    fn legal_actions(&self, _agent: AgentIndex) -> Vec<usize> {
        (0..self.node.children.len()).collect()
    }

    fn successor(&self, _agent: AgentIndex, action: &usize) -> Self {
        Self {
            node: Arc::clone(&self.node.children[*action]),
            num_agents: self.num_agents,
        }
    }

    fn is_win(&self) -> bool {
        self.node.outcome == Some(Outcome::Win)
    }

    fn is_lose(&self) -> bool {
        self.node.outcome == Some(Outcome::Lose)
    }

    fn score(&self) -> f64 {
        self.node.score
    }
}
