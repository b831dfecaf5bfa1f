//! Monte Carlo Tree Search for ultimate tic-tac-toe.
//!
//! Plain UCT over `uttt_board::Position`: UCB1 selection, one random
//! expansion per iteration, a uniformly random playout to score it, and the
//! most visited root child as the decision. Each search builds a fresh tree.
//!
//! # Example
//!
//! ```
//! use uttt_board::Position;
//! use uttt_mcts::{Mcts, MctsConfig};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let config = MctsConfig::with_iterations(200);
//! let mut mcts = Mcts::new(config, ChaCha8Rng::seed_from_u64(42));
//!
//! let position = Position::initial();
//! let result = mcts.search(&position);
//! assert!(position.is_legal(result.best_move));
//! println!("Best move: {}", result.best_move);
//! ```

pub mod config;
mod node;
mod player;
mod rollout;
pub mod search;
mod tree;

pub use config::{MctsConfig, DEFAULT_ITERATIONS};
pub use player::{MctsPlayer, DEFAULT_SEED};
pub use rollout::random_playout;
pub use search::{ChildStats, Mcts, SearchResult};
