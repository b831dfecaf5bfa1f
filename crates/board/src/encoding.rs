//! Packed 3x3 board encoding.
//!
//! A sub-board stores nine 2-bit cell codes in the low 18 bits of a `u32`,
//! cell 0 in bits 0-1. The same packing is used for the meta-board built from
//! the nine sub-board results, so one lookup table answers "who won" at both
//! levels.

use std::fmt;
use std::sync::OnceLock;

use uttt_core::{Cell, NUM_CELLS};

/// Bits used by a packed 3x3 board.
pub const CODE_BITS: u32 = 18;

/// Number of distinct packed codes (size of the result table).
pub const NUM_CODES: usize = 1 << CODE_BITS;

const CODE_MASK: u32 = (1 << CODE_BITS) - 1;

/// Mask of the low bit of every 2-bit cell code.
const LOW_BITS: u32 = 0b01_0101_0101_0101_0101;

/// The eight winning lines of a 3x3 board.
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2], // top row
    [3, 4, 5], // middle row
    [6, 7, 8], // bottom row
    [0, 3, 6], // left column
    [1, 4, 7], // center column
    [2, 5, 8], // right column
    [0, 4, 8], // main diagonal
    [2, 4, 6], // anti-diagonal
];

/// A 3x3 board packed into 18 bits.
///
/// Invariant: bits above bit 17 are always zero.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct SubBoard(u32);

impl SubBoard {
    /// Board with every cell empty.
    pub const EMPTY: SubBoard = SubBoard(0);

    /// Concatenate nine cell codes into one board.
    pub fn pack(cells: [Cell; NUM_CELLS]) -> Self {
        let code = cells
            .iter()
            .enumerate()
            .fold(0u32, |acc, (i, cell)| acc | cell.code() << (2 * i));
        SubBoard(code)
    }

    /// Split the board back into its nine cells.
    pub fn unpack(self) -> [Cell; NUM_CELLS] {
        std::array::from_fn(|i| self.get(i))
    }

    /// Wrap a raw code, returning None if it uses more than 18 bits.
    #[inline]
    pub const fn from_code(code: u32) -> Option<Self> {
        if code <= CODE_MASK {
            Some(SubBoard(code))
        } else {
            None
        }
    }

    /// The raw packed code.
    #[inline]
    pub const fn code(self) -> u32 {
        self.0
    }

    /// Cell at index 0-8.
    #[inline]
    pub const fn get(self, index: usize) -> Cell {
        Cell::from_code(self.0 >> (2 * index))
    }

    /// Copy of this board with the cell at `index` replaced.
    #[inline]
    pub const fn with(self, index: usize, cell: Cell) -> Self {
        let shift = 2 * index;
        SubBoard((self.0 & !(3 << shift)) | (cell.code() << shift))
    }

    /// 9-bit set of empty cells (bit i set when cell i is empty).
    #[inline]
    pub fn empty_mask(self) -> u16 {
        // A cell is occupied when either of its two bits is set.
        let occupied = (self.0 | (self.0 >> 1)) & LOW_BITS;
        let free = !occupied & LOW_BITS;
        (0..NUM_CELLS).fold(0u16, |mask, i| mask | (((free >> (2 * i)) & 1) as u16) << i)
    }

    /// Number of occupied cells.
    #[inline]
    pub fn occupied(self) -> u32 {
        NUM_CELLS as u32 - self.empty_mask().count_ones()
    }

    /// Outcome of this board (see [`result_of`]).
    #[inline]
    pub fn result(self) -> Cell {
        result_of(self.0)
    }

    /// True once the board is won or drawn.
    #[inline]
    pub fn is_decided(self) -> bool {
        self.result() != Cell::Empty
    }
}

impl fmt::Debug for SubBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SubBoard(")?;
        for (i, cell) in self.unpack().iter().enumerate() {
            if i > 0 && i % 3 == 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", cell.symbol())?;
        }
        write!(f, ")")
    }
}

/// Classify one 3x3 board.
///
/// A player wins with any full line of their mark (lines are checked in
/// [`LINES`] order). Otherwise the board is drawn when no line can still be
/// completed: every line holds marks of both players or a `Draw` cell.
fn classify(cells: [Cell; NUM_CELLS]) -> Cell {
    let mut open = false;

    for line in LINES {
        let (mut p1, mut p2, mut blocked) = (0, 0, 0);
        for &i in &line {
            match cells[i] {
                Cell::Player1 => p1 += 1,
                Cell::Player2 => p2 += 1,
                Cell::Draw => blocked += 1,
                Cell::Empty => {}
            }
        }

        if p1 == 3 {
            return Cell::Player1;
        }
        if p2 == 3 {
            return Cell::Player2;
        }
        if blocked == 0 && (p1 == 0 || p2 == 0) {
            open = true;
        }
    }

    if open {
        Cell::Empty
    } else {
        Cell::Draw
    }
}

fn build_results() -> Box<[Cell]> {
    (0..NUM_CODES as u32)
        .map(|code| classify(SubBoard(code).unpack()))
        .collect()
}

// Global result table, initialized once
static RESULTS: OnceLock<Box<[Cell]>> = OnceLock::new();

/// Get a reference to the global result table, indexed by packed code.
///
/// The table is built on first use. Concurrent first calls block until the
/// single initialization finishes.
pub fn results() -> &'static [Cell] {
    RESULTS.get_or_init(build_results)
}

/// Outcome of a packed 3x3 board: `Player1`/`Player2` for a win, `Draw`
/// when no line can be completed any more, `Empty` while undecided.
///
/// `Draw` cells block lines exactly like a mix of both marks does, which is
/// what makes the table reusable for the meta-board.
#[inline]
pub fn result_of(code: u32) -> Cell {
    results()[(code & CODE_MASK) as usize]
}
