//! End-to-end tests of the searchers and heuristics on grid positions.

use pacsearch::games::{Direction, OpenGrid};
use pacsearch::{
    Algorithm, BetterEvaluator, EvaluatorKind, GameTreeSearcher, ReflexAgent, SearchConfig,
};
use pacsearch_core::{GhostState, GridPos, PacmanView, Position, SearchError};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Pacman in a 5x1 corridor: food at both ends, a ghost two cells east.
fn corridor() -> OpenGrid {
    OpenGrid::new(5, 1, GridPos::new(2, 0))
        .with_food([GridPos::new(0, 0), GridPos::new(4, 0)])
        .with_ghost(GhostState::dangerous(GridPos::new(4, 0)))
}

fn searcher(config: SearchConfig) -> GameTreeSearcher<pacsearch::NamedEvaluator> {
    GameTreeSearcher::from_config(&config).unwrap()
}

#[test]
fn test_every_algorithm_steps_away_from_ghost() {
    for algorithm in [Algorithm::Minimax, Algorithm::AlphaBeta, Algorithm::Expectimax] {
        let config = SearchConfig {
            depth: 2,
            algorithm,
            ..SearchConfig::default()
        };
        let action = searcher(config).choose_action(&corridor(), 0).unwrap();
        assert_eq!(action, Some(Direction::West), "{}", algorithm);
    }
}

#[test]
fn test_alphabeta_matches_minimax_on_grid() {
    let position = OpenGrid::new(4, 3, GridPos::new(0, 0))
        .with_food([GridPos::new(3, 2), GridPos::new(2, 0)])
        .with_capsules([GridPos::new(0, 2)])
        .with_ghost(GhostState::dangerous(GridPos::new(3, 0)))
        .with_ghost(GhostState::dangerous(GridPos::new(2, 2)));

    for evaluator in [EvaluatorKind::Score, EvaluatorKind::Better] {
        for depth in 1..=2 {
            let base = SearchConfig {
                depth,
                evaluator,
                ..SearchConfig::default()
            };
            let minimax = searcher(base.clone()).search(&position).unwrap();
            let alphabeta = searcher(SearchConfig {
                algorithm: Algorithm::AlphaBeta,
                ..base
            })
            .search(&position)
            .unwrap();

            assert_eq!(alphabeta.value, minimax.value);
            assert_eq!(alphabeta.action, minimax.action);
            assert!(alphabeta.stats.nodes_expanded <= minimax.stats.nodes_expanded);
        }
    }
}

#[test]
fn test_expectimax_values_grid_at_least_minimax() {
    let position = OpenGrid::new(3, 2, GridPos::new(0, 0))
        .with_food([GridPos::new(1, 0), GridPos::new(2, 1)])
        .with_ghost(GhostState::dangerous(GridPos::new(2, 0)));

    for depth in 1..=3 {
        let minimax = searcher(SearchConfig::with_depth(depth)).search(&position).unwrap();
        let expectimax = searcher(SearchConfig {
            depth,
            algorithm: Algorithm::Expectimax,
            ..SearchConfig::default()
        })
        .search(&position)
        .unwrap();

        assert!(expectimax.value >= minimax.value - 1e-9);
    }
}

#[test]
fn test_json_config_drives_search() {
    let config = SearchConfig::from_json(r#"{"depth": 2, "algorithm": "expectimax"}"#).unwrap();
    assert_eq!(config.evaluator, EvaluatorKind::Score);

    let result = searcher(config).search(&corridor()).unwrap();
    assert_eq!(result.action, Some(Direction::West));
    assert_eq!(result.stats.prunes, 0);
}

#[test]
fn test_better_evaluator_runs_through_config() {
    let config = SearchConfig::from_args("alphabeta", "better", "2").unwrap();
    let searcher = searcher(config);
    assert_eq!(searcher.evaluator().kind(), EvaluatorKind::Better);

    let result = searcher.search(&corridor()).unwrap();
    assert_eq!(result.action, Some(Direction::West));
    assert!(result.value.is_finite());
}

#[test]
fn test_searcher_plays_out_a_game() {
    let mut position = OpenGrid::new(4, 2, GridPos::new(0, 0))
        .with_food([GridPos::new(1, 0), GridPos::new(3, 1)])
        .with_ghost(GhostState::dangerous(GridPos::new(3, 0)));
    let pacman = searcher(SearchConfig {
        depth: 2,
        algorithm: Algorithm::AlphaBeta,
        evaluator: EvaluatorKind::Better,
        parallel_root: false,
    });
    let mut ghost_rng = ChaCha8Rng::seed_from_u64(5);

    for _ in 0..30 {
        if position.is_terminal() {
            break;
        }
        let result = pacman.search(&position).unwrap();
        assert!(!result.value.is_nan());
        let action = result.action.expect("non-terminal position has an action");
        assert!(position.legal_actions(0).contains(&action));
        position = position.successor(0, &action);

        for ghost in 1..position.num_agents() {
            if position.is_terminal() {
                break;
            }
            let moves = position.legal_actions(ghost);
            let pick = ghost_rng.gen_range(0..moves.len());
            position = position.successor(ghost, &moves[pick]);
        }
    }

    if position.is_lose() {
        assert!(position.ghost_positions().contains(&position.pacman_position()));
    }
}

#[test]
fn test_better_evaluator_prefers_capsule_eaten() {
    let before = OpenGrid::new(3, 1, GridPos::new(0, 0))
        .with_food([GridPos::new(2, 0)])
        .with_capsules([GridPos::new(1, 0)]);
    let after = before.successor(0, &Direction::East);

    let terms_before = BetterEvaluator.terms(&before);
    let terms_after = BetterEvaluator.terms(&after);
    assert!(terms_after.capsule_eaten > terms_before.capsule_eaten);
    assert!(terms_after.food > terms_before.food);
}

#[test]
fn test_reflex_agent_on_grid() {
    let mut agent = ReflexAgent::new(ChaCha8Rng::seed_from_u64(1));
    let position = corridor();
    // Neither step lands on the ghost and both leave food one cell away.
    let action = agent.choose_action(&position).unwrap();
    assert!(action == Direction::East || action == Direction::West);
}

#[test]
fn test_search_reports_missing_moves() {
    // Grid ghosts always have at least Stop; this wrapper takes even that away.
    #[derive(Clone, Debug)]
    struct Stuck(OpenGrid);

    impl Position for Stuck {
        type Action = Direction;

        fn num_agents(&self) -> usize {
            2
        }

        fn legal_actions(&self, agent: usize) -> Vec<Direction> {
            if agent == 0 {
                self.0.legal_actions(0)
            } else {
                Vec::new()
            }
        }

        fn successor(&self, agent: usize, action: &Direction) -> Self {
            Stuck(self.0.successor(agent, action))
        }

        fn is_win(&self) -> bool {
            self.0.is_win()
        }

        fn is_lose(&self) -> bool {
            self.0.is_lose()
        }

        fn score(&self) -> f64 {
            self.0.score()
        }
    }

    let position = Stuck(corridor());
    let searcher =
        GameTreeSearcher::new(Algorithm::Expectimax, pacsearch::ScoreEvaluator, 2).unwrap();
    assert_eq!(
        searcher.search(&position).unwrap_err(),
        SearchError::NoLegalActions { agent: 1, depth: 1 }
    );
}
