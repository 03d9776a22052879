//! End-of-game detection and final tally
//!
//! The game ends when neither side has a legal placement. The side with more
//! discs wins; equal counts are a draw.

use crate::board::{Board, Side};

use super::moves::has_legal_move;

/// Check if neither side can move.
#[inline]
pub fn is_game_over(board: &Board) -> bool {
    !has_legal_move(board, Side::Black) && !has_legal_move(board, Side::White)
}

/// Disc count for a side.
#[inline]
pub fn disc_count(board: &Board, side: Side) -> u32 {
    board.count(side)
}

/// Side with the majority of discs, `None` on a draw.
///
/// Only meaningful once [`is_game_over`] holds, but computed for any board.
pub fn winner(board: &Board) -> Option<Side> {
    let black = disc_count(board, Side::Black);
    let white = disc_count(board, Side::White);
    match black.cmp(&white) {
        std::cmp::Ordering::Greater => Some(Side::Black),
        std::cmp::Ordering::Less => Some(Side::White),
        std::cmp::Ordering::Equal => None,
    }
}
