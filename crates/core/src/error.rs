use thiserror::Error;

/// Errors that can occur while configuring or running a search
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    #[error("agent {agent} has no legal actions at depth {depth}")]
    NoLegalActions { agent: usize, depth: usize },

    #[error("depth limit must be at least 1, got {0}")]
    InvalidDepth(usize),

    #[error("Unknown evaluator: {0}")]
    UnknownEvaluator(String),

    #[error("Unknown search algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("agent {0} is not the maximizer; only agent 0 can choose an action")]
    NotMaximizer(usize),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Convenience Result type for search operations
pub type Result<T> = std::result::Result<T, SearchError>;
