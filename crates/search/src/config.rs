//! Search configuration parameters.
//!
//! Defaults match the classic assignment agents: score evaluator, depth 2.

use crate::evaluator::EvaluatorKind;
use pacsearch_core::{Result, SearchError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which aggregation rule the searcher uses for non-maximizing agents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Algorithm {
    /// Worst-case search over every agent.
    Minimax,
    /// Minimax with alpha-beta pruning.
    AlphaBeta,
    /// Other agents pick uniformly at random.
    Expectimax,
}

impl Algorithm {
    /// Whether alpha/beta bounds are tracked and used to cut siblings.
    pub fn prunes(self) -> bool {
        matches!(self, Algorithm::AlphaBeta)
    }

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Minimax => "minimax",
            Algorithm::AlphaBeta => "alphabeta",
            Algorithm::Expectimax => "expectimax",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "minimax" => Ok(Algorithm::Minimax),
            "alphabeta" | "alpha-beta" | "alpha_beta" => Ok(Algorithm::AlphaBeta),
            "expectimax" => Ok(Algorithm::Expectimax),
            _ => Err(SearchError::UnknownAlgorithm(s.to_string())),
        }
    }
}

impl TryFrom<String> for Algorithm {
    type Error = SearchError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// Searcher configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Depth limit in full ply (every agent moves once per ply).
    pub depth: usize,

    /// Leaf and terminal evaluator.
    pub evaluator: EvaluatorKind,

    /// Aggregation rule.
    pub algorithm: Algorithm,

    /// Evaluate the root's children on the rayon pool.
    /// Ignored by alpha-beta, which needs sequential bounds.
    pub parallel_root: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 2,
            evaluator: EvaluatorKind::Score,
            algorithm: Algorithm::Minimax,
            parallel_root: false,
        }
    }
}

impl SearchConfig {
    /// Default config with the given depth limit.
    pub fn with_depth(depth: usize) -> Self {
        Self {
            depth,
            ..Default::default()
        }
    }

    /// Default config for the given algorithm.
    pub fn for_algorithm(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            ..Default::default()
        }
    }

    /// Build a config from textual arguments, as an agent harness passes them.
    ///
    /// # Errors
    /// Returns an error for an unknown algorithm or evaluator name, a depth
    /// that is not an integer, or a depth of zero.
    pub fn from_args(algorithm: &str, evaluator: &str, depth: &str) -> Result<Self> {
        let depth = depth
            .trim()
            .parse::<usize>()
            .map_err(|e| SearchError::InvalidConfig(format!("depth {:?}: {}", depth, e)))?;
        let config = Self {
            depth,
            evaluator: evaluator.parse()?,
            algorithm: algorithm.parse()?,
            parallel_root: false,
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON config; missing fields take their default values.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| SearchError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the searcher cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.depth == 0 {
            return Err(SearchError::InvalidDepth(self.depth));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SearchConfig::default();
        assert_eq!(config.depth, 2);
        assert_eq!(config.evaluator, EvaluatorKind::Score);
        assert_eq!(config.algorithm, Algorithm::Minimax);
        assert!(!config.parallel_root);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_with_depth() {
        let config = SearchConfig::with_depth(4);
        assert_eq!(config.depth, 4);
        assert_eq!(config.algorithm, Algorithm::Minimax);
    }

    #[test]
    fn test_zero_depth_rejected() {
        let config = SearchConfig::with_depth(0);
        assert_eq!(config.validate(), Err(SearchError::InvalidDepth(0)));
    }

    #[test]
    fn test_algorithm_names() {
        assert_eq!("minimax".parse::<Algorithm>(), Ok(Algorithm::Minimax));
        assert_eq!("AlphaBeta".parse::<Algorithm>(), Ok(Algorithm::AlphaBeta));
        assert_eq!("alpha-beta".parse::<Algorithm>(), Ok(Algorithm::AlphaBeta));
        assert_eq!("expectimax".parse::<Algorithm>(), Ok(Algorithm::Expectimax));
        assert!(matches!(
            "negamax".parse::<Algorithm>(),
            Err(SearchError::UnknownAlgorithm(_))
        ));
    }

    #[test]
    fn test_from_args() {
        let config = SearchConfig::from_args("expectimax", "better", "3").unwrap();
        assert_eq!(config.algorithm, Algorithm::Expectimax);
        assert_eq!(config.evaluator, EvaluatorKind::Better);
        assert_eq!(config.depth, 3);

        let config =
            SearchConfig::from_args("minimax", "scoreEvaluationFunction", "2").unwrap();
        assert_eq!(config.evaluator, EvaluatorKind::Score);
    }

    #[test]
    fn test_from_args_errors() {
        assert!(matches!(
            SearchConfig::from_args("minimax", "clever", "2"),
            Err(SearchError::UnknownEvaluator(_))
        ));
        assert!(matches!(
            SearchConfig::from_args("minimax", "score", "two"),
            Err(SearchError::InvalidConfig(_))
        ));
        assert_eq!(
            SearchConfig::from_args("minimax", "score", "0"),
            Err(SearchError::InvalidDepth(0))
        );
    }

    #[test]
    fn test_from_json() {
        let config = SearchConfig::from_json(
            r#"{"depth": 3, "evaluator": "better", "algorithm": "alphabeta"}"#,
        )
        .unwrap();
        assert_eq!(config.depth, 3);
        assert_eq!(config.evaluator, EvaluatorKind::Better);
        assert_eq!(config.algorithm, Algorithm::AlphaBeta);
        assert!(!config.parallel_root);
    }

    #[test]
    fn test_from_json_defaults_and_errors() {
        assert_eq!(SearchConfig::from_json("{}").unwrap(), SearchConfig::default());
        assert!(matches!(
            SearchConfig::from_json(r#"{"evaluator": "clever"}"#),
            Err(SearchError::InvalidConfig(_))
        ));
        assert_eq!(
            SearchConfig::from_json(r#"{"depth": 0}"#),
            Err(SearchError::InvalidDepth(0))
        );
    }

    #[test]
    fn test_json_roundtrip_names() {
        let config = SearchConfig::for_algorithm(Algorithm::AlphaBeta);
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"alphabeta\""));
        assert_eq!(SearchConfig::from_json(&json).unwrap(), config);
    }
}
