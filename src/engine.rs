//! Move selection policy
//!
//! The engine picks a move in three steps:
//!
//! 1. **Enumerate**: legal moves in row-major order; none means the side must pass
//! 2. **Corner filter**: drop every move after which the opponent could take a corner
//! 3. **Search**: score each survivor with alpha-beta from the opponent's side
//!    and keep the first move with the strictly highest score
//!
//! The corner filter may reject every candidate. The engine then returns no
//! move even though legal moves exist, and the game driver scores that as a
//! forfeit.
//!
//! # Example
//!
//! ```
//! use reversi::{AIEngine, Board, EngineConfig, Side};
//!
//! let mut engine = AIEngine::with_config(EngineConfig { depth: 3, ..EngineConfig::default() });
//! let result = engine.get_move_with_stats(&Board::new(), Side::Black);
//! println!("Best move: {:?}", result.best_move);
//! println!("Nodes: {}", result.nodes);
//! ```

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::board::{Board, Pos, Side};
use crate::error::ConfigError;
use crate::eval::EvaluatorKind;
use crate::rules::{apply_move, gives_opponent_corner, legal_moves};
use crate::search::Searcher;

/// Plies searched below each candidate move
pub const DEFAULT_DEPTH: u8 = 5;

/// Deepest search accepted from configuration
pub const MAX_DEPTH: u8 = 12;

/// A player that can pick moves: the AI engine, or anything else the driver
/// should be able to run.
pub trait Strategy {
    /// Display name, used in logs
    fn name(&self) -> &str;

    /// Short icon, used in logs and the GUI
    fn face(&self) -> &str {
        ""
    }

    /// Pick a move for `side`, or `None` to pass.
    ///
    /// Returning `None` while legal moves exist is a rule violation.
    fn choose_move(&mut self, board: &Board, side: Side) -> Option<Pos>;
}

/// Engine settings. Each combination of evaluator and corner filter is a
/// distinct playing strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub name: String,
    pub face: String,
    /// Search depth below each candidate
    pub depth: u8,
    /// Reject moves that let the opponent take a corner
    pub avoid_corners: bool,
    pub evaluator: EvaluatorKind,
    /// Optional per-move time budget
    pub time_limit_ms: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            name: "AlphaBeta".to_string(),
            face: "◆".to_string(),
            depth: DEFAULT_DEPTH,
            avoid_corners: true,
            evaluator: EvaluatorKind::Stability,
            time_limit_ms: None,
        }
    }
}

impl EngineConfig {
    /// Validate values. `label` prefixes error messages, e.g. `black`.
    pub fn validate(&self, label: &str) -> Result<(), ConfigError> {
        if self.depth == 0 || self.depth > MAX_DEPTH {
            return Err(ConfigError::Validation(format!(
                "{label}.depth must be in 1..={MAX_DEPTH}"
            )));
        }
        if self.name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "{label}.name must not be empty"
            )));
        }
        if self.time_limit_ms == Some(0) {
            return Err(ConfigError::Validation(format!(
                "{label}.time_limit_ms must be > 0"
            )));
        }
        Ok(())
    }
}

/// Result of a move search with statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult {
    /// Best move found, if any
    pub best_move: Option<Pos>,
    /// Search score of the best move
    pub score: Option<i32>,
    /// Legal moves available to the side
    pub legal_moves: usize,
    /// Candidates dropped by the corner filter
    pub filtered: usize,
    /// Candidates whose score took part in the choice
    pub searched: usize,
    /// Total nodes searched
    pub nodes: u64,
    /// Nodes scored by the static evaluator
    pub leaves: u64,
    /// Alpha-beta cutoffs
    pub cutoffs: u64,
    /// Time taken in milliseconds
    pub time_ms: u64,
    /// The time budget cut the search short
    pub timed_out: bool,
}

impl MoveResult {
    #[inline]
    fn no_legal_moves(time_ms: u64) -> Self {
        Self {
            best_move: None,
            score: None,
            legal_moves: 0,
            filtered: 0,
            searched: 0,
            nodes: 0,
            leaves: 0,
            cutoffs: 0,
            time_ms,
            timed_out: false,
        }
    }

    /// No move was chosen although legal moves existed
    #[inline]
    pub fn is_forfeit(&self) -> bool {
        self.best_move.is_none() && self.legal_moves > 0
    }
}

/// Alpha-beta engine with corner-avoidance filter.
pub struct AIEngine {
    config: EngineConfig,
    searcher: Searcher<EvaluatorKind>,
}

impl AIEngine {
    /// Create an engine with default settings (depth 5, stability
    /// evaluator, corner filter on, no time limit).
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        let searcher = Searcher::new(config.evaluator);
        Self { config, searcher }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn depth(&self) -> u8 {
        self.config.depth
    }

    /// Get the best move for `side`, or `None`.
    #[must_use]
    pub fn get_move(&mut self, board: &Board, side: Side) -> Option<Pos> {
        self.get_move_with_stats(board, side).best_move
    }

    /// Get the best move together with search statistics.
    #[must_use]
    pub fn get_move_with_stats(&mut self, board: &Board, side: Side) -> MoveResult {
        let start = Instant::now();

        let moves = legal_moves(board, side);
        if moves.is_empty() {
            debug!(%side, "no legal moves");
            return MoveResult::no_legal_moves(start.elapsed().as_millis() as u64);
        }

        self.searcher.reset_stats();
        self.searcher.set_deadline(
            self.config
                .time_limit_ms
                .map(|ms| start + Duration::from_millis(ms)),
        );

        let opponent = side.opponent();
        let mut best: Option<(Pos, i32)> = None;
        let mut filtered = 0;
        let mut searched = 0;

        for &pos in &moves {
            let temp = apply_move(board, side, pos);

            if self.config.avoid_corners && gives_opponent_corner(&temp, side) {
                debug!(%side, %pos, "skipping move that opens a corner");
                filtered += 1;
                continue;
            }

            let score = self.searcher.search(&temp, opponent, self.config.depth, false);

            // A cut-short score only stands in when nothing else was scored
            if self.searcher.timed_out() {
                if best.is_none() {
                    best = Some((pos, score));
                    searched += 1;
                }
                debug!(%side, %pos, searched, "time limit reached");
                break;
            }

            searched += 1;
            debug!(%side, %pos, score, "candidate scored");

            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((pos, score));
            }
        }

        if best.is_none() {
            warn!(
                %side,
                legal = moves.len(),
                "every legal move opens a corner; choosing none"
            );
        }

        MoveResult {
            best_move: best.map(|(pos, _)| pos),
            score: best.map(|(_, score)| score),
            legal_moves: moves.len(),
            filtered,
            searched,
            nodes: self.searcher.stats().nodes,
            leaves: self.searcher.stats().leaves,
            cutoffs: self.searcher.stats().cutoffs,
            time_ms: start.elapsed().as_millis() as u64,
            timed_out: self.searcher.timed_out(),
        }
    }
}

impl Default for AIEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for AIEngine {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn face(&self) -> &str {
        &self.config.face
    }

    fn choose_move(&mut self, board: &Board, side: Side) -> Option<Pos> {
        self.get_move(board, side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::is_legal;

    fn shallow() -> AIEngine {
        AIEngine::with_config(EngineConfig {
            depth: 3,
            ..EngineConfig::default()
        })
    }

    /// Black's only move is f4, after which White can still take a1.
    fn corner_trap() -> Board {
        "......
         X.....
         O.....
         O..XO.
         O.....
         O....."
            .parse()
            .unwrap()
    }

    #[test]
    fn test_engine_defaults() {
        let engine = AIEngine::new();
        assert_eq!(engine.depth(), 5);
        assert!(engine.config().avoid_corners);
        assert_eq!(engine.config().evaluator, EvaluatorKind::Stability);
        assert_eq!(engine.name(), "AlphaBeta");
    }

    #[test]
    fn test_engine_start_position() {
        let mut engine = AIEngine::new();
        let result = engine.get_move_with_stats(&Board::new(), Side::Black);
        let pos = result.best_move.unwrap();
        assert!(is_legal(&Board::new(), Side::Black, pos));
        assert_eq!(result.legal_moves, 4);
        assert_eq!(result.filtered, 0);
        assert!(result.nodes > 0);
        assert!(!result.timed_out);
    }

    #[test]
    fn test_engine_breaks_ties_by_enumeration_order() {
        // The four opening moves are symmetric, so they score the same
        // and the first one in row-major order wins.
        let mut engine = shallow();
        assert_eq!(engine.get_move(&Board::new(), Side::Black), Some(Pos::new(1, 3)));
        assert_eq!(engine.get_move(&Board::new(), Side::White), Some(Pos::new(1, 2)));
    }

    #[test]
    fn test_no_legal_moves_returns_none() {
        let board: Board = "X.....
                            ......
                            ......
                            ......
                            ......
                            ......"
            .parse()
            .unwrap();
        let mut engine = AIEngine::new();
        let result = engine.get_move_with_stats(&board, Side::Black);
        assert_eq!(result.best_move, None);
        assert_eq!(result.legal_moves, 0);
        assert_eq!(result.filtered, 0);
        assert_eq!(result.nodes, 0);
        assert!(!result.is_forfeit());
    }

    #[test]
    fn test_corner_filter_can_reject_every_move() {
        let board = corner_trap();
        assert_eq!(legal_moves(&board, Side::Black), vec![Pos::new(3, 5)]);

        let mut engine = AIEngine::new();
        let result = engine.get_move_with_stats(&board, Side::Black);
        assert_eq!(result.best_move, None);
        assert_eq!(result.legal_moves, 1);
        assert_eq!(result.filtered, 1);
        assert!(result.is_forfeit());
    }

    #[test]
    fn test_without_corner_filter_plays_the_move() {
        let mut engine = AIEngine::with_config(EngineConfig {
            avoid_corners: false,
            ..EngineConfig::default()
        });
        let result = engine.get_move_with_stats(&corner_trap(), Side::Black);
        assert_eq!(result.best_move, Some(Pos::new(3, 5)));
        assert_eq!(result.filtered, 0);
    }

    #[test]
    fn test_positional_variant_plays() {
        let mut engine = AIEngine::with_config(EngineConfig {
            evaluator: EvaluatorKind::Positional,
            depth: 2,
            ..EngineConfig::default()
        });
        let pos = engine.get_move(&Board::new(), Side::Black).unwrap();
        assert!(is_legal(&Board::new(), Side::Black, pos));
    }

    /// Start position plus a White disc on e5. Black can take the f6 corner.
    fn corner_on_offer() -> Board {
        "......
         ......
         ..XO..
         ..OX..
         ....O.
         ......"
            .parse()
            .unwrap()
    }

    #[test]
    fn test_takes_corner_without_time_limit() {
        let board = corner_on_offer();
        assert_eq!(
            legal_moves(&board, Side::Black),
            vec![Pos::new(1, 3), Pos::new(2, 4), Pos::new(3, 1), Pos::new(4, 2), Pos::new(5, 5)]
        );

        let mut engine = AIEngine::with_config(EngineConfig { depth: 1, ..EngineConfig::default() });
        let result = engine.get_move_with_stats(&board, Side::Black);
        assert_eq!(result.best_move, Some(Pos::new(5, 5)));
        assert_eq!(result.searched, 5);
        assert!(!result.timed_out);
    }

    #[test]
    fn test_expired_time_limit_stops_after_first_candidate() {
        // The deadline is the start instant, so the first search is cut short
        // at its root and no later candidate is compared against it.
        let mut engine = AIEngine::with_config(EngineConfig {
            depth: MAX_DEPTH,
            time_limit_ms: Some(0),
            ..EngineConfig::default()
        });
        let result = engine.get_move_with_stats(&corner_on_offer(), Side::Black);
        assert!(result.timed_out);
        assert_eq!(result.searched, 1);
        assert_eq!(result.best_move, Some(Pos::new(1, 3)));
        assert_eq!(result.nodes, 1);
    }

    #[test]
    fn test_generous_time_limit_matches_unlimited_search() {
        let board = corner_on_offer();
        let mut unlimited = AIEngine::with_config(EngineConfig { depth: 2, ..EngineConfig::default() });
        let mut limited = AIEngine::with_config(EngineConfig {
            depth: 2,
            time_limit_ms: Some(60_000),
            ..EngineConfig::default()
        });
        let a = unlimited.get_move_with_stats(&board, Side::Black);
        let b = limited.get_move_with_stats(&board, Side::Black);
        assert!(!b.timed_out);
        assert_eq!(a.best_move, b.best_move);
        assert_eq!(a.score, b.score);
        assert_eq!(a.searched, b.searched);
        assert!(a.leaves > 0);
    }

    #[test]
    fn test_tiny_time_limit_still_returns_legal_move() {
        let mut engine = AIEngine::with_config(EngineConfig {
            depth: MAX_DEPTH,
            time_limit_ms: Some(1),
            ..EngineConfig::default()
        });
        let board = Board::new();
        let result = engine.get_move_with_stats(&board, Side::Black);
        let pos = result.best_move.unwrap();
        assert!(is_legal(&board, Side::Black, pos));
    }

    #[test]
    fn test_strategy_trait_object() {
        let mut engine = shallow();
        let strategy: &mut dyn Strategy = &mut engine;
        assert_eq!(strategy.face(), "◆");
        assert!(strategy.choose_move(&Board::new(), Side::Black).is_some());
    }

    #[test]
    fn test_config_validation() {
        assert!(EngineConfig::default().validate("black").is_ok());

        let bad_depth = EngineConfig { depth: 0, ..EngineConfig::default() };
        assert!(bad_depth.validate("black").is_err());

        let too_deep = EngineConfig { depth: MAX_DEPTH + 1, ..EngineConfig::default() };
        assert!(too_deep.validate("white").is_err());

        let no_name = EngineConfig { name: " ".to_string(), ..EngineConfig::default() };
        assert!(no_name.validate("black").is_err());

        let zero_time = EngineConfig { time_limit_ms: Some(0), ..EngineConfig::default() };
        assert!(zero_time.validate("black").is_err());
    }
}
