//! One-ply reflex agent.
//!
//! Looks at each legal pacman move in isolation, scores the resulting
//! position with [`reflex_score`] and picks randomly among the best moves.

use crate::evaluator::reflex_score;
use log::warn;
use pacsearch_core::{PacmanView, Position, Result, SearchError, MAXIMIZER};
use rand::seq::SliceRandom;
use rand::Rng;

/// A non-adversarial agent that never searches past its own move.
pub struct ReflexAgent<R: Rng> {
    rng: R,
}

impl<R: Rng> ReflexAgent<R> {
    /// Create a reflex agent that breaks ties with `rng`.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Choose pacman's next move.
    ///
    /// Stop is dropped whenever another move exists.
    ///
    /// # Errors
    /// Returns `SearchError::NoLegalActions` if pacman cannot move at all.
    pub fn choose_action<P: PacmanView>(&mut self, position: &P) -> Result<P::Action> {
        let mut actions = position.legal_actions(MAXIMIZER);
        if actions.is_empty() {
            warn!("reflex agent has no legal actions");
            return Err(SearchError::NoLegalActions {
                agent: MAXIMIZER,
                depth: 0,
            });
        }
        if actions.len() > 1 {
            if let Some(stop) = actions.iter().position(|a| position.is_stop(a)) {
                actions.remove(stop);
            }
        }

        let scores: Vec<f64> = actions
            .iter()
            .map(|action| reflex_score(position, &position.successor(MAXIMIZER, action)))
            .collect();
        let best = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let best_indices: Vec<usize> = (0..scores.len()).filter(|&i| scores[i] == best).collect();

        let chosen = best_indices.choose(&mut self.rng).copied().unwrap_or(0);
        Ok(actions.swap_remove(chosen))
    }
}
