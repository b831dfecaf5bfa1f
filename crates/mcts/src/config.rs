//! MCTS configuration parameters.
//!
//! These parameters control the behavior of the Monte Carlo Tree Search algorithm.

/// Iterations per decision when nothing else is configured.
pub const DEFAULT_ITERATIONS: usize = 10_000;

/// MCTS configuration parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct MctsConfig {
    /// Number of select/expand/simulate/backpropagate iterations per search.
    /// This is the only termination control; there is no time budget.
    pub iterations: usize,

    /// Exploration constant `c` in the UCB1 score
    /// `wins / visits + sqrt(c * ln(parent_visits) / visits)`.
    /// The classic UCB1 value is 2.0.
    pub exploration: f64,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            exploration: 2.0,
        }
    }
}

impl MctsConfig {
    /// Create a new config with the specified number of iterations.
    pub fn with_iterations(iterations: usize) -> Self {
        Self {
            iterations,
            ..Default::default()
        }
    }
}
