//! Ultimate tic-tac-toe domain types with enforced invariants.
//!
//! - Cell: one of four 2-bit codes, shared by physical cells and board results
//! - Side: the player to move, never empty or drawn
//! - Coord: a (row, col) pair guaranteed to be on the 9x9 board

use std::fmt;

use crate::{Result, UtttError};

/// Width and height of the full board.
pub const BOARD_SIZE: usize = 9;

/// Number of cells in a 3x3 board (and number of sub-boards).
pub const NUM_CELLS: usize = 9;

/// State of a cell, or the result of a 3x3 board.
///
/// The discriminants are the 2-bit codes used by the packed sub-board
/// encoding. `Draw` never occupies a physical cell; it only appears as the
/// result of a decided sub-board or of the whole game.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default)]
#[repr(u8)]
pub enum Cell {
    #[default]
    Empty = 0,
    Player1 = 1,
    Player2 = 2,
    Draw = 3,
}

impl Cell {
    /// All cell states in code order.
    pub const ALL: [Cell; 4] = [Cell::Empty, Cell::Player1, Cell::Player2, Cell::Draw];

    /// Decode a 2-bit code. Only the low two bits are looked at.
    #[inline]
    pub const fn from_code(code: u32) -> Self {
        match code & 3 {
            0 => Cell::Empty,
            1 => Cell::Player1,
            2 => Cell::Player2,
            _ => Cell::Draw,
        }
    }

    /// The 2-bit code of this state.
    #[inline]
    pub const fn code(self) -> u32 {
        self as u32
    }

    /// The side owning this cell, if any.
    #[inline]
    pub const fn side(self) -> Option<Side> {
        match self {
            Cell::Player1 => Some(Side::Player1),
            Cell::Player2 => Some(Side::Player2),
            Cell::Empty | Cell::Draw => None,
        }
    }

    /// Character used in board dumps: `.`, `X`, `O` or `?` for a draw.
    pub const fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Player1 => 'X',
            Cell::Player2 => 'O',
            Cell::Draw => '?',
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => write!(f, "undecided"),
            Cell::Player1 => write!(f, "X"),
            Cell::Player2 => write!(f, "O"),
            Cell::Draw => write!(f, "draw"),
        }
    }
}

/// One of the two players.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Side {
    Player1,
    Player2,
}

impl Side {
    /// Get the opposing side.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Side::Player1 => Side::Player2,
            Side::Player2 => Side::Player1,
        }
    }

    /// The mark this side writes into a cell.
    #[inline]
    pub const fn cell(self) -> Cell {
        match self {
            Side::Player1 => Cell::Player1,
            Side::Player2 => Cell::Player2,
        }
    }

    pub const fn symbol(self) -> char {
        self.cell().symbol()
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A cell on the 9x9 board.
///
/// Sub-boards are numbered row-major: `(row / 3) * 3 + col / 3`. Inside a
/// sub-board, cells are numbered the same way: `(row % 3) * 3 + col % 3`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Coord {
    row: u8,
    col: u8,
}

impl Coord {
    /// Create a coordinate, failing with `OutOfRange` off the board.
    pub fn new(row: usize, col: usize) -> Result<Self> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Ok(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            Err(UtttError::OutOfRange { row, col })
        }
    }

    /// Create a coordinate from a sub-board index and a cell index within it.
    ///
    /// Both indices must be below 9.
    #[inline]
    pub const fn from_parts(sub_board: usize, local: usize) -> Self {
        debug_assert!(sub_board < NUM_CELLS && local < NUM_CELLS);
        Self {
            row: ((sub_board / 3) * 3 + local / 3) as u8,
            col: ((sub_board % 3) * 3 + local % 3) as u8,
        }
    }

    #[inline]
    pub const fn row(self) -> usize {
        self.row as usize
    }

    #[inline]
    pub const fn col(self) -> usize {
        self.col as usize
    }

    /// Index (0-8) of the sub-board containing this cell.
    #[inline]
    pub const fn sub_board(self) -> usize {
        (self.row as usize / 3) * 3 + self.col as usize / 3
    }

    /// Index (0-8) of this cell inside its sub-board.
    ///
    /// This is also the sub-board the opponent is sent to after a move here.
    #[inline]
    pub const fn local(self) -> usize {
        (self.row as usize % 3) * 3 + self.col as usize % 3
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
