//! Position evaluators.
//!
//! The `Evaluator` trait turns a position into a scalar from the maximizer's
//! point of view. The searchers call it at terminal positions and when the
//! depth budget runs out:
//! - `ScoreEvaluator` returns the intrinsic game score
//! - `BetterEvaluator` mixes food, capsule and ghost distances into the score
//!
//! `reflex_score` is the one-ply heuristic used by the reflex agent.

use pacsearch_core::{manhattan_distance, GridPos, PacmanView, Position, Result, SearchError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Weight of the ghost-threat term in [`BetterEvaluator`].
const GHOST_WEIGHT: f64 = 2.0;

/// Weight of the capsule-eaten term in [`BetterEvaluator`].
const CAPSULE_EATEN_WEIGHT: f64 = 100.0;

/// Capsule-eaten term once every capsule is gone.
const ALL_CAPSULES_EATEN: f64 = 1e5;

/// Trait for scoring positions.
///
/// Implementations must be pure: the same position always gets the same
/// value, and evaluation never depends on search state.
pub trait Evaluator<P: Position>: Send + Sync {
    /// Value of `position` for the maximizer; larger is better.
    fn evaluate(&self, position: &P) -> f64;
}

impl<P, F> Evaluator<P> for F
where
    P: Position,
    F: Fn(&P) -> f64 + Send + Sync,
{
    fn evaluate(&self, position: &P) -> f64 {
        self(position)
    }
}

/// Returns the game score unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScoreEvaluator;

impl<P: Position> Evaluator<P> for ScoreEvaluator {
    fn evaluate(&self, position: &P) -> f64 {
        position.score()
    }
}

/// The individual terms of [`BetterEvaluator`], before weighting.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeuristicTerms {
    /// Inverse distance to the nearest food.
    pub food: f64,
    /// Inverse distance to the nearest capsule.
    pub capsule: f64,
    /// `-inf` when a dangerous ghost shares pacman's cell, a small bonus for
    /// several reachable scared ghosts, otherwise zero.
    pub ghost: f64,
    /// Grows as capsules get eaten.
    pub capsule_eaten: f64,
    /// Intrinsic game score.
    pub score: f64,
}

impl HeuristicTerms {
    /// Weighted sum of the terms. A lethal ghost overrides everything else.
    pub fn total(&self) -> f64 {
        if self.ghost == f64::NEG_INFINITY {
            return f64::NEG_INFINITY;
        }
        self.food
            + self.capsule
            + GHOST_WEIGHT * self.ghost
            + CAPSULE_EATEN_WEIGHT * self.capsule_eaten
            + self.score
    }
}

/// Composite heuristic for grid positions.
///
/// `food + capsule + 2 * ghost + 100 * capsule_eaten + score`, see
/// [`HeuristicTerms`]. A ghost is friendly when it is scared for longer than
/// it would take to reach pacman.
#[derive(Clone, Copy, Debug, Default)]
pub struct BetterEvaluator;

impl BetterEvaluator {
    pub fn terms<P: PacmanView>(&self, position: &P) -> HeuristicTerms {
        let pacman = position.pacman_position();
        let capsules = position.capsules();

        let mut friendly = Vec::new();
        let mut nearest_dangerous: Option<u32> = None;
        for ghost in position.ghost_states() {
            let distance = manhattan_distance(pacman, ghost.position);
            if ghost.is_scared() {
                if ghost.scared_timer > distance {
                    friendly.push(distance);
                }
            } else {
                nearest_dangerous = Some(nearest_dangerous.map_or(distance, |d| d.min(distance)));
            }
        }

        let ghost = if nearest_dangerous == Some(0) {
            f64::NEG_INFINITY
        } else if friendly.len() > 1 {
            inverse_distance(friendly.iter().copied().min())
        } else {
            0.0
        };

        let capsule_eaten = if capsules.is_empty() {
            ALL_CAPSULES_EATEN
        } else {
            1.0 / capsules.len() as f64
        };

        HeuristicTerms {
            food: inverse_distance(nearest(pacman, &position.food())),
            capsule: inverse_distance(nearest(pacman, &capsules)),
            ghost,
            capsule_eaten,
            score: position.score(),
        }
    }
}

impl<P: PacmanView> Evaluator<P> for BetterEvaluator {
    fn evaluate(&self, position: &P) -> f64 {
        self.terms(position).total()
    }
}

/// Scores one candidate successor for the reflex agent.
///
/// Sums the inverse distance to the nearest food (standing on food is
/// `+inf`), `+inf` if the move raised the score, and `-inf` if a ghost now
/// occupies pacman's cell. The ghost check wins over everything else.
pub fn reflex_score<P: PacmanView>(current: &P, successor: &P) -> f64 {
    let pacman = successor.pacman_position();
    if successor.ghost_positions().contains(&pacman) {
        return f64::NEG_INFINITY;
    }

    let food = inverse_distance(nearest(pacman, &successor.food()));
    let score_increase = if current.score() < successor.score() {
        f64::INFINITY
    } else {
        0.0
    };
    food + score_increase
}

fn nearest(from: GridPos, items: &[GridPos]) -> Option<u32> {
    items.iter().map(|&item| manhattan_distance(from, item)).min()
}

/// `1 / distance`; no item counts as infinitely far, distance 0 as `+inf`.
fn inverse_distance(distance: Option<u32>) -> f64 {
    match distance {
        None => 0.0,
        Some(0) => f64::INFINITY,
        Some(d) => 1.0 / d as f64,
    }
}

/// Evaluators that can be selected by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum EvaluatorKind {
    Score,
    Better,
}

impl FromStr for EvaluatorKind {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "score" | "scoreEvaluationFunction" => Ok(EvaluatorKind::Score),
            "better" | "betterEvaluationFunction" => Ok(EvaluatorKind::Better),
            _ => Err(SearchError::UnknownEvaluator(s.to_string())),
        }
    }
}

impl TryFrom<String> for EvaluatorKind {
    type Error = SearchError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl fmt::Display for EvaluatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvaluatorKind::Score => f.write_str("score"),
            EvaluatorKind::Better => f.write_str("better"),
        }
    }
}

/// A named evaluator, as built from a [`crate::SearchConfig`].
#[derive(Clone, Copy, Debug)]
pub enum NamedEvaluator {
    Score(ScoreEvaluator),
    Better(BetterEvaluator),
}

impl NamedEvaluator {
    pub fn kind(&self) -> EvaluatorKind {
        match self {
            NamedEvaluator::Score(_) => EvaluatorKind::Score,
            NamedEvaluator::Better(_) => EvaluatorKind::Better,
        }
    }
}

impl From<EvaluatorKind> for NamedEvaluator {
    fn from(kind: EvaluatorKind) -> Self {
        match kind {
            EvaluatorKind::Score => NamedEvaluator::Score(ScoreEvaluator),
            EvaluatorKind::Better => NamedEvaluator::Better(BetterEvaluator),
        }
    }
}

impl<P: PacmanView> Evaluator<P> for NamedEvaluator {
    fn evaluate(&self, position: &P) -> f64 {
        match self {
            NamedEvaluator::Score(e) => e.evaluate(position),
            NamedEvaluator::Better(e) => e.evaluate(position),
        }
    }
}
