//! Positional weights for 6x6 Reversi evaluation
//!
//! Corners are the only squares that can never be flipped, so they carry the
//! largest weight. Squares next to a corner are negative because taking them
//! tends to hand the corner to the opponent.

use crate::board::{Pos, BOARD_SIZE};

/// Weight of each square, row-major. Symmetric under all board rotations
/// and reflections.
pub const WEIGHTS: [[i32; BOARD_SIZE]; BOARD_SIZE] = [
    [20, -3, 11, 11, -3, 20],
    [-3, -7, -4, -4, -7, -3],
    [11, -4, 2, 2, -4, 11],
    [11, -4, 2, 2, -4, 11],
    [-3, -7, -4, -4, -7, -3],
    [20, -3, 11, 11, -3, 20],
];

/// Bonus per stable disc
pub const STABLE_DISC_BONUS: i32 = 10;

/// Weight of a single square
#[inline]
pub fn weight(pos: Pos) -> i32 {
    WEIGHTS[pos.row as usize][pos.col as usize]
}
