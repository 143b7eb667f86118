//! Depth-limited adversarial search.
//!
//! Minimax, alpha-beta and expectimax share one recursive skeleton. Agent 0
//! maximizes; every other agent either minimizes or, for expectimax, picks a
//! legal action uniformly at random. The depth counter advances once per ply,
//! when control returns to agent 0.

use crate::{
    config::{Algorithm, SearchConfig},
    evaluator::{Evaluator, NamedEvaluator},
};
use log::{debug, trace};
use pacsearch_core::{AgentIndex, Position, Result, SearchError, MAXIMIZER};
use rayon::prelude::*;
use serde::Serialize;

/// Work counters for one search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Successor positions generated.
    pub nodes_expanded: u64,

    /// Evaluator calls.
    pub evaluations: u64,

    /// Sibling cutoffs taken by alpha-beta.
    pub prunes: u64,
}

impl SearchStats {
    fn merge(&mut self, other: &SearchStats) {
        self.nodes_expanded += other.nodes_expanded;
        self.evaluations += other.evaluations;
        self.prunes += other.prunes;
    }
}

/// Result of a search from one root position.
#[derive(Clone, Debug)]
pub struct SearchResult<A> {
    /// Value of the root for the maximizer.
    pub value: f64,

    /// Chosen root action. `None` only when the root is already terminal.
    ///
    /// Among root actions tied at the best value, the one that comes last
    /// in `legal_actions` order wins.
    pub action: Option<A>,

    /// How much work the search did.
    pub stats: SearchStats,
}

/// Pruning window threaded through alpha-beta.
#[derive(Clone, Copy, Debug)]
struct Bounds {
    alpha: f64,
    beta: f64,
}

impl Bounds {
    const OPEN: Self = Self {
        alpha: f64::NEG_INFINITY,
        beta: f64::INFINITY,
    };
}

/// Chooses agent 0's action by searching the game tree to a fixed ply depth.
///
/// Generic over the evaluator `E`; the same searcher works for any
/// [`Position`] the evaluator understands.
#[derive(Clone, Debug)]
pub struct GameTreeSearcher<E> {
    algorithm: Algorithm,
    depth: usize,
    evaluator: E,
    parallel_root: bool,
}

impl GameTreeSearcher<NamedEvaluator> {
    /// Build a searcher from a validated config.
    pub fn from_config(config: &SearchConfig) -> Result<Self> {
        config.validate()?;
        let searcher = Self::new(
            config.algorithm,
            NamedEvaluator::from(config.evaluator),
            config.depth,
        )?;
        Ok(searcher.with_parallel_root(config.parallel_root))
    }
}

impl<E> GameTreeSearcher<E> {
    /// Create a searcher.
    ///
    /// # Errors
    /// Returns `SearchError::InvalidDepth` if `depth` is zero.
    pub fn new(algorithm: Algorithm, evaluator: E, depth: usize) -> Result<Self> {
        if depth == 0 {
            return Err(SearchError::InvalidDepth(depth));
        }
        Ok(Self {
            algorithm,
            depth,
            evaluator,
            parallel_root: false,
        })
    }

    /// Fan the root's children out over rayon (minimax and expectimax only).
    pub fn with_parallel_root(mut self, parallel_root: bool) -> Self {
        self.parallel_root = parallel_root;
        self
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Choose an action for `agent`, which must be the maximizer.
    ///
    /// Returns `Ok(None)` when the position is already won or lost.
    pub fn choose_action<P>(&self, position: &P, agent: AgentIndex) -> Result<Option<P::Action>>
    where
        P: Position + Sync,
        P::Action: Send + Sync,
        E: Evaluator<P>,
    {
        if agent != MAXIMIZER {
            return Err(SearchError::NotMaximizer(agent));
        }
        Ok(self.search(position)?.action)
    }

    /// Search from `position` with agent 0 to move.
    ///
    /// # Errors
    /// Returns `SearchError::NoLegalActions` if the search reaches a
    /// non-terminal position where the agent to move has no legal action.
    pub fn search<P>(&self, position: &P) -> Result<SearchResult<P::Action>>
    where
        P: Position + Sync,
        P::Action: Send + Sync,
        E: Evaluator<P>,
    {
        let mut stats = SearchStats::default();
        let (value, action) = if position.is_terminal() {
            (self.evaluate(position, &mut stats), None)
        } else {
            self.max_value(position, 1, Bounds::OPEN, &mut stats)?
        };

        debug!(
            "{} depth {}: value {} action {:?} ({} nodes, {} evaluations, {} prunes)",
            self.algorithm,
            self.depth,
            value,
            action,
            stats.nodes_expanded,
            stats.evaluations,
            stats.prunes
        );

        Ok(SearchResult {
            value,
            action,
            stats,
        })
    }

    /// Value of `position` with `agent` to move, `depth` ply already begun.
    fn value<P>(
        &self,
        position: &P,
        agent: AgentIndex,
        depth: usize,
        bounds: Bounds,
        stats: &mut SearchStats,
    ) -> Result<f64>
    where
        P: Position + Sync,
        P::Action: Send + Sync,
        E: Evaluator<P>,
    {
        // Terminal positions are scored before the depth budget is checked.
        if position.is_terminal() {
            return Ok(self.evaluate(position, stats));
        }
        if agent == MAXIMIZER {
            if depth == self.depth {
                return Ok(self.evaluate(position, stats));
            }
            return self
                .max_value(position, depth + 1, bounds, stats)
                .map(|(value, _)| value);
        }
        match self.algorithm {
            Algorithm::Minimax | Algorithm::AlphaBeta => {
                self.min_value(position, agent, depth, bounds, stats)
            }
            Algorithm::Expectimax => self.chance_value(position, agent, depth, stats),
        }
    }

    /// Max rule. At depth 1 (the root) it also reports the chosen action.
    fn max_value<P>(
        &self,
        position: &P,
        depth: usize,
        mut bounds: Bounds,
        stats: &mut SearchStats,
    ) -> Result<(f64, Option<P::Action>)>
    where
        P: Position + Sync,
        P::Action: Send + Sync,
        E: Evaluator<P>,
    {
        let actions = legal_actions(position, MAXIMIZER, depth)?;
        let next = next_agent(position, MAXIMIZER);
        let is_root = depth == 1;

        if is_root && self.parallel_root && !self.algorithm.prunes() {
            return self.root_max_parallel(position, &actions, next, stats);
        }

        let mut best = f64::NEG_INFINITY;
        let mut chosen = None;
        for action in &actions {
            stats.nodes_expanded += 1;
            let child = position.successor(MAXIMIZER, action);
            let value = self.value(&child, next, depth, bounds, stats)?;
            best = best.max(value);
            if is_root && value == best {
                chosen = Some(action.clone());
            }
            if self.algorithm.prunes() {
                if best > bounds.beta {
                    stats.prunes += 1;
                    trace!("beta cutoff at depth {}: {} > {}", depth, best, bounds.beta);
                    return Ok((best, chosen));
                }
                bounds.alpha = bounds.alpha.max(best);
            }
        }
        Ok((best, chosen))
    }

    /// Root max rule with the children evaluated in parallel.
    ///
    /// Values are reduced in `legal_actions` order so ties resolve exactly as
    /// in the sequential loop.
    fn root_max_parallel<P>(
        &self,
        position: &P,
        actions: &[P::Action],
        next: AgentIndex,
        stats: &mut SearchStats,
    ) -> Result<(f64, Option<P::Action>)>
    where
        P: Position + Sync,
        P::Action: Send + Sync,
        E: Evaluator<P>,
    {
        let branches = actions
            .par_iter()
            .map(|action| {
                let mut branch = SearchStats {
                    nodes_expanded: 1,
                    ..SearchStats::default()
                };
                let child = position.successor(MAXIMIZER, action);
                self.value(&child, next, 1, Bounds::OPEN, &mut branch)
                    .map(|value| (value, branch))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut best = f64::NEG_INFINITY;
        let mut chosen = None;
        for (action, (value, branch)) in actions.iter().zip(branches) {
            stats.merge(&branch);
            best = best.max(value);
            if value == best {
                chosen = Some(action.clone());
            }
        }
        Ok((best, chosen))
    }

    /// Min rule for an adversarial agent.
    fn min_value<P>(
        &self,
        position: &P,
        agent: AgentIndex,
        depth: usize,
        mut bounds: Bounds,
        stats: &mut SearchStats,
    ) -> Result<f64>
    where
        P: Position + Sync,
        P::Action: Send + Sync,
        E: Evaluator<P>,
    {
        let actions = legal_actions(position, agent, depth)?;
        let next = next_agent(position, agent);

        let mut best = f64::INFINITY;
        for action in &actions {
            stats.nodes_expanded += 1;
            let child = position.successor(agent, action);
            let value = self.value(&child, next, depth, bounds, stats)?;
            best = best.min(value);
            if self.algorithm.prunes() {
                if best < bounds.alpha {
                    stats.prunes += 1;
                    trace!("alpha cutoff at depth {}: {} < {}", depth, best, bounds.alpha);
                    return Ok(best);
                }
                bounds.beta = bounds.beta.min(best);
            }
        }
        Ok(best)
    }

    /// Chance rule: each legal action weighted `1 / k`.
    fn chance_value<P>(
        &self,
        position: &P,
        agent: AgentIndex,
        depth: usize,
        stats: &mut SearchStats,
    ) -> Result<f64>
    where
        P: Position + Sync,
        P::Action: Send + Sync,
        E: Evaluator<P>,
    {
        let actions = legal_actions(position, agent, depth)?;
        let next = next_agent(position, agent);
        let weight = 1.0 / actions.len() as f64;

        let mut total = 0.0;
        for action in &actions {
            stats.nodes_expanded += 1;
            let child = position.successor(agent, action);
            total += weight * self.value(&child, next, depth, Bounds::OPEN, stats)?;
        }
        Ok(total)
    }

    fn evaluate<P>(&self, position: &P, stats: &mut SearchStats) -> f64
    where
        P: Position,
        E: Evaluator<P>,
    {
        stats.evaluations += 1;
        self.evaluator.evaluate(position)
    }
}

fn legal_actions<P: Position>(position: &P, agent: AgentIndex, depth: usize) -> Result<Vec<P::Action>> {
    let actions = position.legal_actions(agent);
    if actions.is_empty() {
        return Err(SearchError::NoLegalActions { agent, depth });
    }
    Ok(actions)
}

fn next_agent<P: Position>(position: &P, agent: AgentIndex) -> AgentIndex {
    (agent + 1) % position.num_agents().max(1)
}
