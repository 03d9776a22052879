//! Move application: placement plus flipping of bracketed discs

use crate::board::{Board, Direction, Pos, Side};

use super::moves::bracket_len;

/// Positions that would flip to `side` if it placed a disc at `pos`.
///
/// Runs are listed direction by direction, nearest disc first.
pub fn flipped_positions(board: &Board, side: Side, pos: Pos) -> Vec<Pos> {
    let mut flipped = Vec::new();

    for &dir in &Direction::ALL {
        let len = bracket_len(board, side, pos, dir);
        let mut cur = pos;
        for _ in 0..len {
            // bracket_len only counts on-board cells
            let Some(next) = cur.step(dir) else { break };
            flipped.push(next);
            cur = next;
        }
    }

    flipped
}

/// Return a new board with `side` placed at `pos` and every bracketed run flipped.
///
/// Legality is not re-checked: an illegal `pos` still receives the disc and
/// whatever flips the directional scan finds. Callers validate with
/// [`is_legal`](super::is_legal) first. The input board is left untouched.
#[must_use]
pub fn apply_move(board: &Board, side: Side, pos: Pos) -> Board {
    let flips = flipped_positions(board, side, pos);
    let mut next = *board;
    next.set(pos, side.into());
    for p in flips {
        next.set(p, side.into());
    }
    next
}
