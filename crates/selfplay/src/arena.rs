//! Game setup and result bookkeeping for the command-line driver.

use std::fmt;

use anyhow::{Context, Result};
use clap::ValueEnum;
use rand_chacha::ChaCha8Rng;
use uttt_board::{play_game, Cell, GameRecord, Player, Position, RandomPlayer, Side};
use uttt_mcts::MctsPlayer;

/// Who plays against the MCTS player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Opponent {
    /// Uniformly random legal moves.
    Random,
    /// A second MCTS player with its own seed.
    Mcts,
}

impl Opponent {
    /// Build the opponent player.
    pub fn player(self, seed: u64, iterations: usize) -> Box<dyn Player + Send> {
        match self {
            Opponent::Random => Box::new(RandomPlayer::with_seed(seed)),
            Opponent::Mcts => Box::new(MctsPlayer::with_seed(seed, iterations)),
        }
    }
}

/// Human-readable outcome of a finished game.
pub fn describe_result(result: Cell) -> &'static str {
    match result {
        Cell::Player1 => "X wins",
        Cell::Player2 => "O wins",
        Cell::Draw => "draw",
        Cell::Empty => "unfinished",
    }
}

/// Side played by the MCTS player in game `index` of a match.
///
/// Colours alternate so neither player keeps the first move.
pub fn mcts_side(index: usize) -> Side {
    if index % 2 == 0 {
        Side::Player1
    } else {
        Side::Player2
    }
}

/// Seed for game `index` of a match.
pub fn game_seed(base: u64, index: usize) -> u64 {
    base.wrapping_add(index as u64 * 1000)
}

/// One finished match game.
#[derive(Clone, Debug)]
pub struct MatchGame {
    pub index: usize,
    pub mcts_side: Side,
    pub record: GameRecord,
}

/// Play game `index` of an MCTS-vs-random match.
pub fn play_match_game(index: usize, iterations: usize, base_seed: u64) -> Result<MatchGame> {
    let seed = game_seed(base_seed, index);
    let side = mcts_side(index);

    let mut mcts = MctsPlayer::with_seed(seed, iterations);
    let mut random = RandomPlayer::<ChaCha8Rng>::with_seed(seed.wrapping_add(1));

    let record = match side {
        Side::Player1 => play_game(&mut mcts, &mut random, Position::initial()),
        Side::Player2 => play_game(&mut random, &mut mcts, Position::initial()),
    }
    .with_context(|| format!("match game {} failed", index))?;

    Ok(MatchGame {
        index,
        mcts_side: side,
        record,
    })
}

/// Win/draw/loss counts from the MCTS player's viewpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
}

impl Tally {
    /// Count one game that ended in `result` with MCTS playing `side`.
    pub fn record(&mut self, result: Cell, side: Side) {
        if result == Cell::Draw {
            self.draws += 1;
        } else if result == side.cell() {
            self.wins += 1;
        } else {
            self.losses += 1;
        }
    }

    pub fn total(&self) -> usize {
        self.wins + self.draws + self.losses
    }

    /// Share of games won, 0.0 when nothing has been played.
    pub fn win_rate(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            self.wins as f64 / self.total() as f64
        }
    }
}

impl FromIterator<MatchGame> for Tally {
    fn from_iter<I: IntoIterator<Item = MatchGame>>(games: I) -> Self {
        let mut tally = Tally::default();
        for game in games {
            tally.record(game.record.result, game.mcts_side);
        }
        tally
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} wins, {} draws, {} losses ({:.1}% won)",
            self.wins,
            self.draws,
            self.losses,
            self.win_rate() * 100.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sides_alternate() {
        assert_eq!(mcts_side(0), Side::Player1);
        assert_eq!(mcts_side(1), Side::Player2);
        assert_eq!(mcts_side(2), Side::Player1);
    }

    #[test]
    fn test_game_seeds_differ() {
        assert_ne!(game_seed(42, 0), game_seed(42, 1));
        assert_eq!(game_seed(u64::MAX, 1), 999);
    }

    #[test]
    fn test_tally_record() {
        let mut tally = Tally::default();
        tally.record(Cell::Player1, Side::Player1);
        tally.record(Cell::Player1, Side::Player2);
        tally.record(Cell::Draw, Side::Player2);
        tally.record(Cell::Player2, Side::Player2);

        assert_eq!(
            tally,
            Tally {
                wins: 2,
                draws: 1,
                losses: 1
            }
        );
        assert_eq!(tally.total(), 4);
        assert!((tally.win_rate() - 0.5).abs() < 1e-12);
        assert_eq!(tally.to_string(), "2 wins, 1 draws, 1 losses (50.0% won)");
    }

    #[test]
    fn test_empty_tally() {
        assert_eq!(Tally::default().win_rate(), 0.0);
    }

    #[test]
    fn test_match_game() {
        let game = play_match_game(1, 50, 7).unwrap();
        assert_eq!(game.mcts_side, Side::Player2);
        assert_ne!(game.record.result, Cell::Empty);

        let tally: Tally = std::iter::once(game).collect();
        assert_eq!(tally.total(), 1);
    }

    #[test]
    fn test_opponent_players_move_legally() {
        let pos = Position::initial();
        for opponent in [Opponent::Random, Opponent::Mcts] {
            let mv = opponent.player(3, 20).next_move(&pos);
            assert!(pos.is_legal(mv));
        }
    }

    #[test]
    fn test_describe_result() {
        assert_eq!(describe_result(Cell::Player1), "X wins");
        assert_eq!(describe_result(Cell::Draw), "draw");
    }
}
