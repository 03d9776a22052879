//! Board structure

use std::fmt;
use std::str::FromStr;

use super::{Cell, Pos, Side, BOARD_SIZE};
use crate::error::BoardParseError;

/// Game board. A plain `Copy` value: search and move application
/// always work on their own copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Starting position: alternating 2x2 block in the centre
    pub fn new() -> Self {
        let mut board = Self::empty();
        let lo = (BOARD_SIZE / 2 - 1) as u8;
        let hi = lo + 1;
        board.set(Pos::new(lo, lo), Cell::Black);
        board.set(Pos::new(lo, hi), Cell::White);
        board.set(Pos::new(hi, lo), Cell::White);
        board.set(Pos::new(hi, hi), Cell::Black);
        board
    }

    /// Board with no discs at all
    pub const fn empty() -> Self {
        Self {
            cells: [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        BOARD_SIZE
    }

    /// Get cell at position. Panics when `pos` is off the board.
    #[inline]
    pub fn get(&self, pos: Pos) -> Cell {
        self.cells[pos.row as usize][pos.col as usize]
    }

    /// Overwrite a cell. Panics when `pos` is off the board.
    #[inline]
    pub fn set(&mut self, pos: Pos, cell: Cell) {
        self.cells[pos.row as usize][pos.col as usize] = cell;
    }

    /// Check if position is empty
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.get(pos).is_empty()
    }

    /// Check whether `pos` holds a disc of `side`
    #[inline]
    pub fn is_side(&self, pos: Pos, side: Side) -> bool {
        self.get(pos) == Cell::from(side)
    }

    /// Number of discs owned by `side`
    pub fn count(&self, side: Side) -> u32 {
        let target = Cell::from(side);
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell == target)
            .count() as u32
    }

    /// Number of empty cells
    pub fn empty_count(&self) -> u32 {
        self.cells.iter().flatten().filter(|c| c.is_empty()).count() as u32
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.empty_count() == 0
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// One row per line, `X` for Black, `O` for White, `.` for empty.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            let line: String = row.iter().map(|c| c.symbol()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Parses the `Display` format. Blank lines and spaces inside a row are ignored.
impl FromStr for Board {
    type Err = BoardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<Vec<char>> = s
            .lines()
            .map(|line| line.chars().filter(|c| !c.is_whitespace()).collect::<Vec<_>>())
            .filter(|row| !row.is_empty())
            .collect();

        if rows.len() != BOARD_SIZE {
            return Err(BoardParseError::RowCount { found: rows.len() });
        }

        let mut board = Board::empty();
        for (r, row) in rows.iter().enumerate() {
            if row.len() != BOARD_SIZE {
                return Err(BoardParseError::RowLength { row: r, found: row.len() });
            }
            for (c, &ch) in row.iter().enumerate() {
                let cell = match ch {
                    '.' => Cell::Empty,
                    'X' | 'x' => Cell::Black,
                    'O' | 'o' => Cell::White,
                    other => return Err(BoardParseError::InvalidCell { row: r, col: c, found: other }),
                };
                board.set(Pos::new(r as u8, c as u8), cell);
            }
        }
        Ok(board)
    }
}
