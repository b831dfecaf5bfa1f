//! MCTS-backed player.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use uttt_board::{Coord, Player, Position};

use crate::{
    config::{MctsConfig, DEFAULT_ITERATIONS},
    search::{Mcts, SearchResult},
};

/// Seed used by `MctsPlayer::default`.
pub const DEFAULT_SEED: u64 = 42;

/// Picks moves by running a full search on every turn.
pub struct MctsPlayer<R: Rng> {
    mcts: Mcts<R>,
    last_search: Option<SearchResult>,
}

impl<R: Rng> MctsPlayer<R> {
    pub fn new(config: MctsConfig, rng: R) -> Self {
        Self {
            mcts: Mcts::new(config, rng),
            last_search: None,
        }
    }

    /// Statistics of the most recent decision, if any.
    pub fn last_search(&self) -> Option<&SearchResult> {
        self.last_search.as_ref()
    }

    pub fn config(&self) -> &MctsConfig {
        self.mcts.config()
    }
}

impl MctsPlayer<ChaCha8Rng> {
    /// Create a reproducible player running `iterations` per move.
    pub fn with_seed(seed: u64, iterations: usize) -> Self {
        Self::new(
            MctsConfig::with_iterations(iterations),
            ChaCha8Rng::seed_from_u64(seed),
        )
    }
}

impl Default for MctsPlayer<ChaCha8Rng> {
    fn default() -> Self {
        Self::with_seed(DEFAULT_SEED, DEFAULT_ITERATIONS)
    }
}

impl<R: Rng> Player for MctsPlayer<R> {
    /// # Panics
    /// Panics if the position has no legal moves.
    fn next_move(&mut self, position: &Position) -> Coord {
        let result = self.mcts.search(position);
        let best = result.best_move;
        self.last_search = Some(result);
        best
    }
}
