//! Ultimate tic-tac-toe board - packed sub-boards and the position engine
//!
//! Each 3x3 sub-board is packed into 18 bits so that results come from a
//! single table lookup and positions copy in a few words. This is what the
//! search leans on millions of times per decision.

mod encoding;
mod player;
mod position;

pub use encoding::{result_of, results, SubBoard, CODE_BITS, LINES, NUM_CODES};
pub use player::{play_game, GameRecord, Player, RandomPlayer};
pub use position::Position;
pub use uttt_core::{Cell, Coord, IllegalReason, Result, Side, UtttError};
