//! Adversarial game-tree search for one maximizer against other agents.
//!
//! This crate provides depth-limited minimax, alpha-beta and expectimax
//! search over any position implementing `pacsearch_core::Position`.
//!
//! # Features
//!
//! - **Generic**: Works with any `Position` implementation
//! - **Three strategies**: Minimax, alpha-beta pruning, expectimax chance nodes
//! - **Evaluator Abstraction**: Score-only and composite grid heuristics,
//!   or any `Fn(&P) -> f64`
//! - **Reflex Agent**: One-ply heuristic play with seeded tie-breaking
//! - **Parallel Root**: Optional rayon fan-out for minimax and expectimax
//!
//! # Example
//!
//! ```
//! use pacsearch::{games::{GameTree, TreePosition}, Algorithm, GameTreeSearcher, ScoreEvaluator};
//!
//! let tree = GameTree::node(vec![
//!     GameTree::leaves(&[3.0, 12.0, 8.0]),
//!     GameTree::leaves(&[2.0, 4.0, 6.0]),
//! ]);
//! let position = TreePosition::new(tree, 2);
//!
//! let searcher = GameTreeSearcher::new(Algorithm::AlphaBeta, ScoreEvaluator, 1).unwrap();
//! let result = searcher.search(&position).unwrap();
//! assert_eq!(result.value, 3.0);
//! assert_eq!(result.action, Some(0));
//! ```

pub mod config;
pub mod evaluator;
pub mod games;
pub mod reflex;
pub mod search;

pub use config::{Algorithm, SearchConfig};
pub use evaluator::{
    reflex_score, BetterEvaluator, Evaluator, EvaluatorKind, HeuristicTerms, NamedEvaluator,
    ScoreEvaluator,
};
pub use reflex::ReflexAgent;
pub use search::{GameTreeSearcher, SearchResult, SearchStats};
