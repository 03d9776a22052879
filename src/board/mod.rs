//! Board representation for 6x6 Reversi

pub mod board;


// Re-exports
pub use board::Board;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Board size (6x6)
pub const BOARD_SIZE: usize = 6;
pub const TOTAL_CELLS: usize = BOARD_SIZE * BOARD_SIZE; // 36

/// The two players. Black moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Black,
    White,
}

impl Side {
    /// Get the other side
    #[inline]
    pub fn opponent(self) -> Side {
        match self {
            Side::Black => Side::White,
            Side::White => Side::Black,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Black => f.write_str("Black"),
            Side::White => f.write_str("White"),
        }
    }
}

/// Content of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Black,
    White,
}

impl Cell {
    /// Owner of the disc in this cell, if any
    #[inline]
    pub fn side(self) -> Option<Side> {
        match self {
            Cell::Empty => None,
            Cell::Black => Some(Side::Black),
            Cell::White => Some(Side::White),
        }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    pub(crate) fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Black => 'X',
            Cell::White => 'O',
        }
    }
}

impl From<Side> for Cell {
    #[inline]
    fn from(side: Side) -> Cell {
        match side {
            Side::Black => Cell::Black,
            Side::White => Cell::White,
        }
    }
}

/// Position on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    #[inline]
    pub fn new(row: u8, col: u8) -> Self {
        debug_assert!(row < BOARD_SIZE as u8 && col < BOARD_SIZE as u8);
        Self { row, col }
    }

    #[inline]
    pub fn to_index(self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    #[inline]
    pub fn from_index(idx: usize) -> Self {
        Self {
            row: (idx / BOARD_SIZE) as u8,
            col: (idx % BOARD_SIZE) as u8,
        }
    }

    #[inline]
    pub fn is_valid(row: i32, col: i32) -> bool {
        row >= 0 && row < BOARD_SIZE as i32 && col >= 0 && col < BOARD_SIZE as i32
    }

    /// Neighbouring position one step along `dir`, or `None` off the board
    #[inline]
    pub fn step(self, dir: Direction) -> Option<Pos> {
        let row = self.row as i32 + dir.dr;
        let col = self.col as i32 + dir.dc;
        if Pos::is_valid(row, col) {
            Some(Pos::new(row as u8, col as u8))
        } else {
            None
        }
    }

    /// The four corner cells
    pub fn corners() -> [Pos; 4] {
        let last = (BOARD_SIZE - 1) as u8;
        [
            Pos::new(0, 0),
            Pos::new(0, last),
            Pos::new(last, 0),
            Pos::new(last, last),
        ]
    }

    #[inline]
    pub fn is_corner(self) -> bool {
        Pos::corners().contains(&self)
    }

    /// All cells in row-major order
    pub fn all() -> impl Iterator<Item = Pos> {
        (0..TOTAL_CELLS).map(Pos::from_index)
    }
}

/// Column letter followed by 1-based row, e.g. `d2` for row 1, col 3
impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.col) as char, self.row + 1)
    }
}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pos {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.to_index().cmp(&other.to_index())
    }
}

/// Unit step on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Direction {
    pub dr: i32,
    pub dc: i32,
}

impl Direction {
    const fn new(dr: i32, dc: i32) -> Self {
        Self { dr, dc }
    }

    /// All 8 compass directions, used for legality and flipping
    pub const ALL: [Direction; 8] = [
        Direction::new(-1, -1),
        Direction::new(-1, 0),
        Direction::new(-1, 1),
        Direction::new(0, -1),
        Direction::new(0, 1),
        Direction::new(1, -1),
        Direction::new(1, 0),
        Direction::new(1, 1),
    ];

    /// Up, down, left, right; used by the stability check
    pub const ORTHOGONAL: [Direction; 4] = [
        Direction::new(-1, 0),
        Direction::new(1, 0),
        Direction::new(0, -1),
        Direction::new(0, 1),
    ];
}
