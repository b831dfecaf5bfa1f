//! Player abstraction and the uniform-random baseline.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::trace;
use uttt_core::{Cell, Coord, Result, Side};

use crate::Position;

/// Anything that can pick a move.
///
/// Implementations must only return moves from `position.legal_moves()` and
/// must not be asked to move in a decided position.
pub trait Player {
    /// Choose the next move for the side to move in `position`.
    fn next_move(&mut self, position: &Position) -> Coord;
}

impl<P: Player + ?Sized> Player for Box<P> {
    fn next_move(&mut self, position: &Position) -> Coord {
        (**self).next_move(position)
    }
}

impl<P: Player + ?Sized> Player for &mut P {
    fn next_move(&mut self, position: &Position) -> Coord {
        (**self).next_move(position)
    }
}

/// Plays a uniformly random legal move.
#[derive(Clone, Debug)]
pub struct RandomPlayer<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomPlayer<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomPlayer<ChaCha8Rng> {
    /// Create a reproducible random player.
    pub fn with_seed(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> Player for RandomPlayer<R> {
    /// # Panics
    /// Panics if the position has no legal moves.
    fn next_move(&mut self, position: &Position) -> Coord {
        let moves = position.legal_moves();
        assert!(
            !moves.is_empty(),
            "BUG: next_move called on a decided position"
        );
        moves[self.rng.gen_range(0..moves.len())]
    }
}

/// A finished game.
#[derive(Clone, Debug)]
pub struct GameRecord {
    /// Moves in the order they were played.
    pub moves: Vec<Coord>,

    /// Position after the last move.
    pub final_position: Position,

    /// `Player1`, `Player2` or `Draw`.
    pub result: Cell,
}

/// Play `start` to the end, `x` moving for Player1 and `o` for Player2.
///
/// # Errors
/// Returns `UtttError::IllegalMove` if a player returns an illegal move.
pub fn play_game<X, O>(x: &mut X, o: &mut O, start: Position) -> Result<GameRecord>
where
    X: Player + ?Sized,
    O: Player + ?Sized,
{
    let mut position = start;
    let mut moves = Vec::new();

    while !position.is_terminal() {
        let side = position.next_player();
        let mv = match side {
            Side::Player1 => x.next_move(&position),
            Side::Player2 => o.next_move(&position),
        };
        position.play(mv)?;
        moves.push(mv);
        trace!(ply = moves.len(), %side, %mv, "move played");
    }

    Ok(GameRecord {
        moves,
        final_position: position,
        result: position.overall_result(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use uttt_core::{IllegalReason, UtttError};

    /// Always answers with the same cell.
    struct Stubborn(Coord);

    impl Player for Stubborn {
        fn next_move(&mut self, _position: &Position) -> Coord {
            self.0
        }
    }

    #[test]
    fn test_random_player_moves_are_legal() {
        let mut player = RandomPlayer::with_seed(7);
        let mut pos = Position::initial();
        for _ in 0..20 {
            if pos.is_terminal() {
                break;
            }
            let mv = player.next_move(&pos);
            assert!(pos.legal_moves().contains(&mv));
            pos.play(mv).unwrap();
        }
    }

    #[test]
    fn test_random_player_deterministic() {
        let pos = Position::initial();
        let a = RandomPlayer::with_seed(99).next_move(&pos);
        let b = RandomPlayer::with_seed(99).next_move(&pos);
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_game() {
        let mut x = RandomPlayer::with_seed(123);
        let mut o = RandomPlayer::with_seed(456);
        let record = play_game(&mut x, &mut o, Position::initial()).unwrap();

        assert!(record.final_position.is_terminal());
        assert_ne!(record.result, Cell::Empty);
        assert_eq!(record.result, record.final_position.overall_result());
        assert!(record.moves.len() <= 81);
        assert_eq!(
            record.final_position.empty_cells() as usize,
            81 - record.moves.len()
        );
    }

    #[test]
    fn test_illegal_player_is_reported() {
        let center = Coord::new(4, 4).unwrap();
        let mut x = Stubborn(center);
        let mut o = Stubborn(center);
        let err = play_game(&mut x, &mut o, Position::initial()).unwrap_err();
        assert_eq!(
            err,
            UtttError::IllegalMove {
                coord: center,
                reason: IllegalReason::Occupied
            }
        );
    }

    #[test]
    fn test_boxed_players() {
        let mut x: Box<dyn Player> = Box::new(RandomPlayer::with_seed(1));
        let mut o: Box<dyn Player> = Box::new(RandomPlayer::with_seed(2));
        let record = play_game(&mut x, &mut o, Position::initial()).unwrap();
        assert!(record.final_position.is_terminal());
    }
}
