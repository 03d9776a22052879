//! Depth-bounded minimax search with alpha-beta pruning
//!
//! The searcher explores legal moves in enumeration order with no move
//! ordering, transposition table or iterative deepening. Pruning efficiency
//! therefore depends only on the order produced by
//! [`legal_moves`](crate::rules::legal_moves) and on the depth.
//!
//! # Leaf perspective
//!
//! Leaves (remaining depth 0, or no legal move for the side to move) are
//! scored from the point of view of the side to move at that leaf, not from
//! the root side. Callers rely on this exact behaviour.
//!
//! # Example
//!
//! ```
//! use reversi::board::{Board, Side};
//! use reversi::eval::StabilityEvaluator;
//! use reversi::search::Searcher;
//!
//! let mut searcher = Searcher::new(StabilityEvaluator);
//! let score = searcher.search(&Board::new(), Side::Black, 3, true);
//! println!("score {score}, {} nodes", searcher.stats().nodes);
//! ```

use std::time::Instant;

use tracing::trace;

use crate::board::{Board, Side};
use crate::eval::{Evaluator, StabilityEvaluator};
use crate::rules::{apply_move, legal_moves};

/// Infinity score for alpha-beta bounds
pub const INF: i32 = i32::MAX;

/// Search statistics for diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes visited, leaves included
    pub nodes: u64,
    /// Nodes scored by the static evaluator
    pub leaves: u64,
    /// Loops broken early because beta <= alpha
    pub cutoffs: u64,
}

/// Alpha-beta searcher over a pluggable evaluator.
///
/// An optional deadline bounds the running time: once it has passed, every
/// node reached is scored statically and [`timed_out`](Self::timed_out)
/// reports `true`. Without a deadline the result is exact.
pub struct Searcher<E = StabilityEvaluator> {
    evaluator: E,
    deadline: Option<Instant>,
    timed_out: bool,
    stats: SearchStats,
}

impl<E: Evaluator> Searcher<E> {
    #[must_use]
    pub fn new(evaluator: E) -> Self {
        Self {
            evaluator,
            deadline: None,
            timed_out: false,
            stats: SearchStats::default(),
        }
    }

    /// Set or clear the deadline. Clears the time-out flag.
    pub fn set_deadline(&mut self, deadline: Option<Instant>) {
        self.deadline = deadline;
        self.timed_out = false;
    }

    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = SearchStats::default();
    }

    /// Whether the deadline cut any search short since it was last set
    #[must_use]
    pub fn timed_out(&self) -> bool {
        self.timed_out
    }

    /// Search with a full window.
    pub fn search(&mut self, board: &Board, side: Side, depth: u8, maximizing: bool) -> i32 {
        self.alpha_beta(board, side, depth, maximizing, -INF, INF)
    }

    /// Minimax value of `board` with `side` to move, pruned to the window
    /// `(alpha, beta)`.
    pub fn alpha_beta(
        &mut self,
        board: &Board,
        side: Side,
        depth: u8,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.stats.nodes += 1;

        let moves = legal_moves(board, side);
        if depth == 0 || moves.is_empty() || self.deadline_passed() {
            self.stats.leaves += 1;
            return self.evaluator.evaluate(board, side);
        }

        if maximizing {
            let mut best = -INF;
            for pos in moves {
                let child = apply_move(board, side, pos);
                let score = self.alpha_beta(&child, side.opponent(), depth - 1, false, alpha, beta);
                best = best.max(score);
                alpha = alpha.max(score);
                if beta <= alpha {
                    self.stats.cutoffs += 1;
                    break;
                }
            }
            best
        } else {
            let mut best = INF;
            for pos in moves {
                let child = apply_move(board, side, pos);
                let score = self.alpha_beta(&child, side.opponent(), depth - 1, true, alpha, beta);
                best = best.min(score);
                beta = beta.min(score);
                if beta <= alpha {
                    self.stats.cutoffs += 1;
                    break;
                }
            }
            best
        }
    }

    #[inline]
    fn deadline_passed(&mut self) -> bool {
        if self.timed_out {
            return true;
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => {
                trace!(nodes = self.stats.nodes, "search deadline reached");
                self.timed_out = true;
                true
            }
            _ => false,
        }
    }
}

impl Default for Searcher<StabilityEvaluator> {
    fn default() -> Self {
        Self::new(StabilityEvaluator)
    }
}

/// One-shot full-window search with the canonical evaluator.
#[must_use]
pub fn search(board: &Board, side: Side, depth: u8, maximizing: bool) -> i32 {
    Searcher::default().search(board, side, depth, maximizing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::{evaluate, PositionalEvaluator};
    use proptest::prelude::*;
    use std::time::Duration;

    /// Plain minimax without pruning, same leaf rule as the searcher
    fn minimax(board: &Board, side: Side, depth: u8, maximizing: bool, nodes: &mut u64) -> i32 {
        *nodes += 1;
        let moves = legal_moves(board, side);
        if depth == 0 || moves.is_empty() {
            return evaluate(board, side);
        }
        let scores = moves.into_iter().map(|pos| {
            let child = apply_move(board, side, pos);
            minimax(&child, side.opponent(), depth - 1, !maximizing, nodes)
        });
        if maximizing {
            scores.fold(-INF, i32::max)
        } else {
            scores.fold(INF, i32::min)
        }
    }

    fn playout(choices: &[usize]) -> (Board, Side) {
        let mut b = Board::new();
        let mut side = Side::Black;
        for &choice in choices {
            let moves = legal_moves(&b, side);
            if moves.is_empty() {
                break;
            }
            b = apply_move(&b, side, moves[choice % moves.len()]);
            side = side.opponent();
        }
        (b, side)
    }

    #[test]
    fn test_depth_zero_is_static_eval() {
        let b = Board::new();
        assert_eq!(search(&b, Side::Black, 0, true), evaluate(&b, Side::Black));
    }

    #[test]
    fn test_no_moves_is_terminal() {
        // Black has no move while White does; the search does not pass
        let b: Board = "OX....
                        ......
                        ......
                        ......
                        ......
                        ......"
            .parse()
            .unwrap();
        assert!(legal_moves(&b, Side::Black).is_empty());
        let mut searcher = Searcher::default();
        let score = searcher.search(&b, Side::Black, 5, true);
        assert_eq!(score, evaluate(&b, Side::Black));
        assert_eq!(searcher.stats().nodes, 1);
    }

    #[test]
    fn test_leaf_uses_side_to_move() {
        // Depth 1 from the start: the leaves are scored for White
        let b = Board::new();
        let expected = legal_moves(&b, Side::Black)
            .into_iter()
            .map(|pos| evaluate(&apply_move(&b, Side::Black, pos), Side::White))
            .max()
            .unwrap();
        assert_eq!(search(&b, Side::Black, 1, true), expected);
    }

    #[test]
    fn test_matches_minimax_from_start() {
        let b = Board::new();
        for depth in 1..=4 {
            for maximizing in [true, false] {
                let mut nodes = 0;
                let expected = minimax(&b, Side::Black, depth, maximizing, &mut nodes);
                assert_eq!(search(&b, Side::Black, depth, maximizing), expected, "depth {depth}");
            }
        }
    }

    #[test]
    fn test_pruning_visits_fewer_nodes() {
        let b = Board::new();
        let mut full = 0;
        let _ = minimax(&b, Side::Black, 5, true, &mut full);

        let mut searcher = Searcher::default();
        let _ = searcher.search(&b, Side::Black, 5, true);
        assert!(searcher.stats().nodes < full);
        assert!(searcher.stats().cutoffs > 0);
    }

    #[test]
    fn test_expired_deadline_scores_root_statically() {
        let b = Board::new();
        let mut searcher = Searcher::default();
        searcher.set_deadline(Some(Instant::now()));
        let score = searcher.search(&b, Side::Black, 6, true);
        assert!(searcher.timed_out());
        assert_eq!(score, evaluate(&b, Side::Black));

        searcher.set_deadline(None);
        assert!(!searcher.timed_out());
    }

    #[test]
    fn test_generous_deadline_is_exact() {
        let b = Board::new();
        let mut searcher = Searcher::default();
        searcher.set_deadline(Some(Instant::now() + Duration::from_secs(60)));
        let score = searcher.search(&b, Side::Black, 3, true);
        assert!(!searcher.timed_out());
        assert_eq!(score, search(&b, Side::Black, 3, true));
    }

    #[test]
    fn test_custom_evaluator() {
        let b = Board::new();
        let mut searcher = Searcher::new(PositionalEvaluator);
        let score = searcher.search(&b, Side::Black, 0, true);
        assert_eq!(score, 0);
    }

    #[test]
    fn test_stats_count_leaves_and_reset() {
        let mut searcher = Searcher::default();
        searcher.search(&Board::new(), Side::Black, 1, true);
        // Root plus one leaf per opening move
        assert_eq!(searcher.stats(), &SearchStats { nodes: 5, leaves: 4, cutoffs: 0 });

        searcher.reset_stats();
        assert_eq!(searcher.stats(), &SearchStats::default());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn prop_alpha_beta_equals_minimax(
            choices in prop::collection::vec(0usize..64, 0..24),
            depth in 1u8..=3,
            maximizing in any::<bool>(),
        ) {
            let (b, side) = playout(&choices);
            let mut nodes = 0;
            let expected = minimax(&b, side, depth, maximizing, &mut nodes);
            prop_assert_eq!(search(&b, side, depth, maximizing), expected);
        }
    }
}
