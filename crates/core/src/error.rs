use std::fmt;

use thiserror::Error;

use crate::Coord;

/// Errors surfaced by the position engine.
///
/// Both variants are caller errors to be checked, never silently ignored.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UtttError {
    #[error("coordinate ({row}, {col}) is outside the 9x9 board")]
    OutOfRange { row: usize, col: usize },

    #[error("illegal move {coord}: {reason}")]
    IllegalMove { coord: Coord, reason: IllegalReason },
}

/// Why a move was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IllegalReason {
    /// The game already has a result.
    GameOver,
    /// The move is outside the sub-board the player is forced into.
    WrongSubBoard { forced: usize },
    /// The target sub-board is already won or drawn.
    SubBoardDecided,
    /// The target cell is not empty.
    Occupied,
}

impl fmt::Display for IllegalReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IllegalReason::GameOver => write!(f, "game is already decided"),
            IllegalReason::WrongSubBoard { forced } => {
                write!(f, "must play in sub-board ({}, {})", forced / 3, forced % 3)
            }
            IllegalReason::SubBoardDecided => write!(f, "sub-board is already decided"),
            IllegalReason::Occupied => write!(f, "cell is occupied"),
        }
    }
}

/// Convenience Result type for engine operations
pub type Result<T> = std::result::Result<T, UtttError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = UtttError::OutOfRange { row: 9, col: 0 };
        assert_eq!(err.to_string(), "coordinate (9, 0) is outside the 9x9 board");

        let coord = Coord::new(1, 3).unwrap();
        let err = UtttError::IllegalMove {
            coord,
            reason: IllegalReason::WrongSubBoard { forced: 3 },
        };
        assert_eq!(
            err.to_string(),
            "illegal move (1, 3): must play in sub-board (1, 0)"
        );
    }
}
