//! Ultimate tic-tac-toe position: nine packed sub-boards plus turn state.

use std::fmt;

use uttt_core::{Cell, Coord, IllegalReason, Result, Side, UtttError, BOARD_SIZE, NUM_CELLS};

use crate::encoding::SubBoard;

/// Full game state.
///
/// Invariants:
/// - a cell only changes from `Empty` to the mover's mark
/// - no move is placed in a sub-board whose result is decided
/// - a forced sub-board, when set, is still undecided
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Position {
    boards: [SubBoard; NUM_CELLS],
    next_player: Side,
    /// Sub-board the next move must go to, or None for any undecided one.
    forced: Option<u8>,
}

impl Position {
    /// Empty board, X to move, any sub-board allowed.
    pub fn initial() -> Self {
        Self {
            boards: [SubBoard::EMPTY; NUM_CELLS],
            next_player: Side::Player1,
            forced: None,
        }
    }

    /// Build a position from raw parts, returning None if it breaks an invariant.
    ///
    /// Rejected: `Draw` codes in physical cells, a forced index above 8, or a
    /// forced sub-board that is already decided.
    pub fn from_sub_boards(
        boards: [SubBoard; NUM_CELLS],
        next_player: Side,
        forced: Option<usize>,
    ) -> Option<Self> {
        if boards
            .iter()
            .any(|board| board.unpack().contains(&Cell::Draw))
        {
            return None;
        }
        if let Some(index) = forced {
            if index >= NUM_CELLS || boards[index].is_decided() {
                return None;
            }
        }
        Some(Self {
            boards,
            next_player,
            forced: forced.map(|index| index as u8),
        })
    }

    /// Get the side to move
    #[inline]
    pub fn next_player(&self) -> Side {
        self.next_player
    }

    /// Get the forced sub-board index, or None when any undecided sub-board is legal
    #[inline]
    pub fn forced_subboard(&self) -> Option<usize> {
        self.forced.map(usize::from)
    }

    /// Get the packed sub-board at index 0-8
    #[inline]
    pub fn sub_board(&self, index: usize) -> SubBoard {
        self.boards[index]
    }

    /// Get the cell at a coordinate
    #[inline]
    pub fn cell(&self, coord: Coord) -> Cell {
        self.boards[coord.sub_board()].get(coord.local())
    }

    /// Get the cell at (row, col), failing with `OutOfRange` off the board
    pub fn cell_at(&self, row: usize, col: usize) -> Result<Cell> {
        Ok(self.cell(Coord::new(row, col)?))
    }

    /// Result of each sub-board, in sub-board order.
    pub fn sub_board_results(&self) -> [Cell; NUM_CELLS] {
        self.boards.map(SubBoard::result)
    }

    /// Result of the whole game.
    ///
    /// The sub-board results are packed into a meta-board and classified with
    /// the same table, so a drawn sub-board blocks every meta line through it.
    /// Always recomputed from the cells.
    pub fn overall_result(&self) -> Cell {
        SubBoard::pack(self.sub_board_results()).result()
    }

    /// Check if the game has ended (a player won or the meta-board is drawn)
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.overall_result() != Cell::Empty
    }

    /// Number of physically empty cells on the board.
    pub fn empty_cells(&self) -> u32 {
        self.boards
            .iter()
            .map(|board| board.empty_mask().count_ones())
            .sum()
    }

    /// All legal moves, ordered by sub-board index and then row-major inside
    /// the sub-board. Empty once the game is decided.
    pub fn legal_moves(&self) -> Vec<Coord> {
        let mut moves = Vec::new();
        if self.is_terminal() {
            return moves;
        }

        match self.forced {
            Some(index) => {
                let index = usize::from(index);
                push_empty(&mut moves, index, self.boards[index]);
            }
            None => {
                for (index, board) in self.boards.iter().enumerate() {
                    if !board.is_decided() {
                        push_empty(&mut moves, index, *board);
                    }
                }
            }
        }
        moves
    }

    /// Check if a move is legal without applying it
    pub fn is_legal(&self, coord: Coord) -> bool {
        self.check(coord).is_ok()
    }

    fn check(&self, coord: Coord) -> std::result::Result<(), IllegalReason> {
        if self.is_terminal() {
            return Err(IllegalReason::GameOver);
        }

        let target = coord.sub_board();
        if let Some(forced) = self.forced_subboard() {
            if forced != target {
                return Err(IllegalReason::WrongSubBoard { forced });
            }
        }

        let board = self.boards[target];
        if board.is_decided() {
            return Err(IllegalReason::SubBoardDecided);
        }
        if board.get(coord.local()) != Cell::Empty {
            return Err(IllegalReason::Occupied);
        }
        Ok(())
    }

    /// Play a move for the side to move.
    ///
    /// The opponent is sent to the sub-board matching the local cell just
    /// played (local (r, c) forces sub-board r * 3 + c), or anywhere if that
    /// sub-board is already decided.
    ///
    /// # Errors
    /// Returns `UtttError::IllegalMove` if the game is over, the move ignores
    /// the forced sub-board, targets a decided sub-board, or an occupied cell.
    /// The position is unchanged on error.
    pub fn play(&mut self, coord: Coord) -> Result<()> {
        self.check(coord)
            .map_err(|reason| UtttError::IllegalMove { coord, reason })?;

        let target = coord.sub_board();
        let local = coord.local();
        self.boards[target] = self.boards[target].with(local, self.next_player.cell());

        self.forced = if self.boards[local].is_decided() {
            None
        } else {
            Some(local as u8)
        };
        self.next_player = self.next_player.opposite();
        Ok(())
    }

    /// Play a move given as raw (row, col).
    ///
    /// # Errors
    /// `OutOfRange` off the board, otherwise as [`Position::play`].
    pub fn play_at(&mut self, row: usize, col: usize) -> Result<()> {
        self.play(Coord::new(row, col)?)
    }

    /// Apply a move and return the new position
    pub fn with_move(&self, coord: Coord) -> Result<Position> {
        let mut next = *self;
        next.play(coord)?;
        Ok(next)
    }
}

/// Append the empty cells of one sub-board as board coordinates.
#[inline]
fn push_empty(moves: &mut Vec<Coord>, index: usize, board: SubBoard) {
    let mut mask = board.empty_mask();
    while mask != 0 {
        let local = mask.trailing_zeros() as usize;
        mask &= mask - 1;
        moves.push(Coord::from_parts(index, local));
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::initial()
    }
}

/// Board dump: the 9x9 grid row by row (`.` empty, `X`, `O`), a space every
/// three columns, a blank line every three rows, then a status line.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let cell = self.boards[(row / 3) * 3 + col / 3].get((row % 3) * 3 + col % 3);
                write!(f, "{}", cell.symbol())?;
                if col == 2 || col == 5 {
                    write!(f, " ")?;
                }
            }
            writeln!(f)?;
            if row == 2 || row == 5 {
                writeln!(f)?;
            }
        }

        write!(f, "to move: {}, forced: ", self.next_player)?;
        match self.forced_subboard() {
            Some(index) => write!(f, "({},{})", index / 3, index % 3),
            None => write!(f, "ANY"),
        }
    }
}
