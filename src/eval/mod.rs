//! Evaluation module for Reversi positions
//!
//! The canonical evaluation combines:
//! - Positional weights (corners high, corner-adjacent squares negative)
//! - A stability bonus for discs whose full row and column are owned
//!
//! [`Evaluator`] lets the search run on a different scoring function; the
//! weight-only [`PositionalEvaluator`] is the lighter variant.

pub mod heuristic;
pub mod weights;

use serde::{Deserialize, Serialize};

use crate::board::{Board, Side};

pub use heuristic::{evaluate, is_stable, positional_score, stable_disc_count};
pub use weights::{STABLE_DISC_BONUS, WEIGHTS};

/// Static scoring of a position from one side's point of view.
pub trait Evaluator {
    fn evaluate(&self, board: &Board, side: Side) -> i32;
}

/// Weights plus stability bonus
#[derive(Debug, Clone, Copy, Default)]
pub struct StabilityEvaluator;

impl Evaluator for StabilityEvaluator {
    #[inline]
    fn evaluate(&self, board: &Board, side: Side) -> i32 {
        evaluate(board, side)
    }
}

/// Weights only
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionalEvaluator;

impl Evaluator for PositionalEvaluator {
    #[inline]
    fn evaluate(&self, board: &Board, side: Side) -> i32 {
        positional_score(board, side)
    }
}

/// Evaluator selection as it appears in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluatorKind {
    #[default]
    Stability,
    Positional,
}

impl Evaluator for EvaluatorKind {
    #[inline]
    fn evaluate(&self, board: &Board, side: Side) -> i32 {
        match self {
            EvaluatorKind::Stability => StabilityEvaluator.evaluate(board, side),
            EvaluatorKind::Positional => PositionalEvaluator.evaluate(board, side),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_dispatch() {
        let b: Board = "XXXXXX
                        X.....
                        X.....
                        X.....
                        X.....
                        X....."
            .parse()
            .unwrap();
        assert_eq!(EvaluatorKind::Stability.evaluate(&b, Side::Black), 102);
        assert_eq!(EvaluatorKind::Positional.evaluate(&b, Side::Black), 92);
        assert_eq!(EvaluatorKind::default(), EvaluatorKind::Stability);
    }
}
