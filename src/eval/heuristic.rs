//! Heuristic evaluation function for Reversi board positions
//!
//! The score is seen from one side: its weighted squares count positively,
//! the opponent's negatively, and each of its stable discs adds a bonus.

use crate::board::{Board, Direction, Pos, Side};

use super::weights::{weight, STABLE_DISC_BONUS};

/// Evaluate the board from the perspective of `side`.
///
/// Weighted square balance plus [`STABLE_DISC_BONUS`] per stable disc of
/// `side`. The stability term only looks at `side`, so
/// `evaluate(b, Black) + evaluate(b, White)` is generally not zero.
#[must_use]
pub fn evaluate(board: &Board, side: Side) -> i32 {
    positional_score(board, side) + stable_disc_count(board, side) as i32 * STABLE_DISC_BONUS
}

/// Weighted square balance: own squares minus opponent squares.
#[must_use]
pub fn positional_score(board: &Board, side: Side) -> i32 {
    let opponent = side.opponent();
    Pos::all()
        .map(|pos| match board.get(pos).side() {
            Some(s) if s == side => weight(pos),
            Some(s) if s == opponent => -weight(pos),
            _ => 0,
        })
        .sum()
}

/// Count the stable discs of `side`.
pub fn stable_disc_count(board: &Board, side: Side) -> u32 {
    Pos::all()
        .filter(|&pos| board.is_side(pos, side) && is_stable(board, side, pos))
        .count() as u32
}

/// A disc is stable when every cell from it to the edge, in each of the four
/// orthogonal directions, belongs to `side`. In other words its whole row and
/// column are filled by `side`. Diagonals are ignored.
pub fn is_stable(board: &Board, side: Side, pos: Pos) -> bool {
    Direction::ORTHOGONAL.iter().all(|&dir| {
        let mut cur = Some(pos);
        while let Some(p) = cur {
            if !board.is_side(p, side) {
                return false;
            }
            cur = p.step(dir);
        }
        true
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(text: &str) -> Board {
        text.parse().unwrap()
    }

    #[test]
    fn test_evaluate_start_position() {
        let b = Board::new();
        assert_eq!(evaluate(&b, Side::Black), 0);
        assert_eq!(evaluate(&b, Side::White), 0);
    }

    #[test]
    fn test_evaluate_empty_board() {
        assert_eq!(evaluate(&Board::empty(), Side::Black), 0);
    }

    #[test]
    fn test_lone_corner_is_not_stable() {
        let b = board(
            "X.....
             ......
             ......
             ......
             ......
             ......",
        );
        assert!(!is_stable(&b, Side::Black, Pos::new(0, 0)));
        assert_eq!(evaluate(&b, Side::Black), 20);
        assert_eq!(evaluate(&b, Side::White), -20);
    }

    #[test]
    fn test_full_row_and_column_anchor() {
        let b = board(
            "XXXXXX
             X.....
             X.....
             X.....
             X.....
             X.....",
        );
        assert_eq!(stable_disc_count(&b, Side::Black), 1);
        assert!(is_stable(&b, Side::Black, Pos::new(0, 0)));
        assert!(!is_stable(&b, Side::Black, Pos::new(0, 1)));
        // 56 (top row) + 36 (rest of left column) + 10
        assert_eq!(evaluate(&b, Side::Black), 102);
    }

    #[test]
    fn test_evaluation_is_not_antisymmetric() {
        let b = board(
            "XXXXXX
             X.....
             X.....
             X.....
             X.....
             X.....",
        );
        let black = evaluate(&b, Side::Black);
        let white = evaluate(&b, Side::White);
        assert_eq!(white, -92);
        assert_ne!(black + white, 0);
    }

    #[test]
    fn test_full_board_all_stable() {
        let b = board(
            "XXXXXX
             XXXXXX
             XXXXXX
             XXXXXX
             XXXXXX
             XXXXXX",
        );
        assert_eq!(stable_disc_count(&b, Side::Black), 36);
        assert_eq!(evaluate(&b, Side::Black), 92 + 360);
        assert_eq!(evaluate(&b, Side::White), -92);
    }

    #[test]
    fn test_diagonal_neighbours_do_not_stabilise() {
        // Centre disc surrounded diagonally only
        let b = board(
            "......
             .X.X..
             ..X...
             .X.X..
             ......
             ......",
        );
        assert_eq!(stable_disc_count(&b, Side::Black), 0);
    }

    #[test]
    fn test_opponent_disc_breaks_line() {
        let b = board(
            "XXXXXO
             X.....
             X.....
             X.....
             X.....
             X.....",
        );
        assert!(!is_stable(&b, Side::Black, Pos::new(0, 0)));
        assert_eq!(positional_score(&b, Side::Black), 56 - 20 - 20 + 36);
    }
}
