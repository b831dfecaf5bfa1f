//! Random playouts used to score newly expanded nodes.

use rand::Rng;
use uttt_board::{Cell, Position};

/// Play uniformly random legal moves from `position` until the game ends.
///
/// The position is copied first, so the caller's tree is left untouched.
/// Returns the final result: `Player1`, `Player2` or `Draw`. A position that
/// is already decided returns its result without drawing from `rng`.
pub fn random_playout<R: Rng + ?Sized>(rng: &mut R, position: &Position) -> Cell {
    let mut current = *position;
    let mut result = current.overall_result();

    while result == Cell::Empty {
        let moves = current.legal_moves();
        let mv = moves[rng.gen_range(0..moves.len())];
        current
            .play(mv)
            .expect("BUG: generated move is illegal");
        result = current.overall_result();
    }

    result
}
