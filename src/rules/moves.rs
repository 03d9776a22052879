//! Move legality and enumeration
//!
//! A placement is legal when the cell is empty and at least one of the eight
//! rays from it crosses one or more opponent discs and then lands on a disc of
//! the mover before leaving the board.

use crate::board::{Board, Direction, Pos, Side};

/// Number of opponent discs bracketed along `dir` when `side` plays at `pos`.
///
/// Returns 0 if the run of opponent discs is empty, hits an empty cell, or
/// runs off the board before reaching a disc of `side`.
#[inline]
pub(crate) fn bracket_len(board: &Board, side: Side, pos: Pos, dir: Direction) -> usize {
    let opponent = side.opponent();
    let mut count = 0;
    let mut cur = pos.step(dir);

    while let Some(p) = cur {
        if board.is_side(p, opponent) {
            count += 1;
            cur = p.step(dir);
        } else if board.is_side(p, side) {
            return count;
        } else {
            return 0;
        }
    }

    0
}

/// Check whether `side` may place a disc at `pos`.
pub fn is_legal(board: &Board, side: Side, pos: Pos) -> bool {
    if !board.is_empty(pos) {
        return false;
    }
    Direction::ALL
        .iter()
        .any(|&dir| bracket_len(board, side, pos, dir) > 0)
}

/// All legal placements for `side`, in row-major order.
///
/// The order is significant: the move selector keeps the first of several
/// equally scored moves.
pub fn legal_moves(board: &Board, side: Side) -> Vec<Pos> {
    Pos::all().filter(|&pos| is_legal(board, side, pos)).collect()
}

/// Check whether `side` has at least one legal placement.
#[inline]
pub fn has_legal_move(board: &Board, side: Side) -> bool {
    Pos::all().any(|pos| is_legal(board, side, pos))
}

/// True if the opponent of `side` could take a corner on `board`.
///
/// Used to reject moves that open a corner for the other player.
pub fn gives_opponent_corner(board: &Board, side: Side) -> bool {
    let opponent = side.opponent();
    Pos::corners()
        .iter()
        .any(|&corner| is_legal(board, opponent, corner))
}
