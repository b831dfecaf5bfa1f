//! Ultimate tic-tac-toe core - shared types and errors
//!
//! This crate holds the vocabulary every other crate speaks: cell states,
//! the two sides, board coordinates and the error type returned by the
//! position engine.
//!
//! # Types
//!
//! - [`Cell`] - State of a cell or result of a (sub-)board
//! - [`Side`] - One of the two players
//! - [`Coord`] - A validated (row, col) pair on the 9x9 board

mod error;
mod types;

pub use error::{IllegalReason, Result, UtttError};
pub use types::{Cell, Coord, Side, BOARD_SIZE, NUM_CELLS};
