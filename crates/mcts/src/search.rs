//! Monte Carlo Tree Search implementation.
//!
//! Plain UCT: UCB1 selection over fully expanded nodes, one random child
//! expanded per iteration, scored by a uniformly random playout, and the
//! most visited root child ("robust child") chosen at the end.

use rand::Rng;
use tracing::{debug, trace};
use uttt_board::{Coord, Position};

use crate::{config::MctsConfig, rollout::random_playout, tree::Tree};

/// Statistics of one root child after a search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChildStats {
    /// Move from the root to this child.
    pub mv: Coord,

    /// Iterations that went through this child.
    pub visits: u32,

    /// Win credit from the root mover's viewpoint.
    pub wins: f64,
}

/// Result of an MCTS search.
#[derive(Clone, Debug)]
pub struct SearchResult {
    /// Most visited root child; earliest expanded wins ties.
    pub best_move: Coord,

    /// Root children in expansion order.
    pub children: Vec<ChildStats>,

    /// Visits recorded at the root (equals the iteration count).
    pub root_visits: u32,

    /// Iterations whose selection ended on an already decided node and were
    /// scored without a playout.
    pub terminal_selections: usize,

    /// Number of nodes in the tree when the search finished.
    pub tree_size: usize,
}

impl SearchResult {
    /// Visit count of the root child reached by `mv`, if it was expanded.
    pub fn visits_of(&self, mv: Coord) -> Option<u32> {
        self.children
            .iter()
            .find(|child| child.mv == mv)
            .map(|child| child.visits)
    }

    /// Sum of visits over all root children.
    pub fn total_child_visits(&self) -> u32 {
        self.children.iter().map(|child| child.visits).sum()
    }
}

/// Monte Carlo Tree Search with UCB1 selection and random rollouts.
///
/// Generic over the random number generator, which drives both expansion
/// choices and playouts. A fixed seed gives a fixed move.
pub struct Mcts<R: Rng> {
    config: MctsConfig,
    rng: R,
}

impl<R: Rng> Mcts<R> {
    /// Create a new MCTS instance.
    ///
    /// # Panics
    /// Panics if `config.iterations` is zero.
    pub fn new(config: MctsConfig, rng: R) -> Self {
        assert!(config.iterations > 0, "MCTS needs at least one iteration");
        Self { config, rng }
    }

    /// Get the search configuration.
    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// Run a full search from `position` and pick a move.
    ///
    /// A fresh tree is built and dropped on every call.
    ///
    /// # Panics
    /// Panics if `position` has no legal moves: searching a decided game is
    /// a caller bug.
    pub fn search(&mut self, position: &Position) -> SearchResult {
        assert!(
            !position.is_terminal(),
            "BUG: search called on a decided position"
        );

        let mut tree = Tree::new(*position);
        let mut terminal_selections = 0;

        for _ in 0..self.config.iterations {
            if self.iterate(&mut tree) {
                terminal_selections += 1;
            }
        }

        extract_results(&tree, terminal_selections)
    }

    /// Run one select -> expand -> simulate -> backpropagate pass.
    ///
    /// Returns true if selection stopped on an already decided node.
    fn iterate(&mut self, tree: &mut Tree) -> bool {
        // SELECT
        let mut leaf = tree.select_leaf(self.config.exploration);
        let node = tree.get(leaf);

        let terminal = node.is_terminal();
        let outcome = if terminal {
            node.result
        } else {
            // EXPAND: one untried move, uniformly at random
            let untried = &node.untried;
            let mv = untried[self.rng.gen_range(0..untried.len())];
            leaf = tree.add_child(leaf, mv);

            // SIMULATE
            random_playout(&mut self.rng, &tree.get(leaf).position)
        };

        // BACKPROPAGATE
        tree.backpropagate(leaf, outcome);
        terminal
    }
}

/// Extract search results from the root node.
fn extract_results(tree: &Tree, terminal_selections: usize) -> SearchResult {
    let mut children = Vec::with_capacity(tree.root().children.len());
    let mut best: Option<ChildStats> = None;
    for child in tree.root_children() {
        let stats = ChildStats {
            mv: child
                .last_move
                .expect("BUG: non-root node without a move"),
            visits: child.stats.visits,
            wins: child.stats.wins,
        };
        trace!(
            mv = %stats.mv,
            visits = stats.visits,
            win_rate = child.stats.win_rate(),
            "root child"
        );
        if best.map_or(true, |b| stats.visits > b.visits) {
            best = Some(stats);
        }
        children.push(stats);
    }

    // INVARIANT: the first iteration always expands a root child
    let best = best.expect("BUG: search finished without expanding the root");
    let root = tree.root();

    debug!(
        iterations = root.stats.visits,
        nodes = tree.len(),
        best = %best.mv,
        visits = best.visits,
        win_rate = best.wins / f64::from(best.visits),
        terminal_selections,
        "search complete"
    );

    SearchResult {
        best_move: best.mv,
        children,
        root_visits: root.stats.visits,
        terminal_selections,
        tree_size: tree.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use uttt_board::{Cell, Side, SubBoard};

    fn create_mcts(seed: u64, iterations: usize) -> Mcts<ChaCha8Rng> {
        Mcts::new(
            MctsConfig::with_iterations(iterations),
            ChaCha8Rng::seed_from_u64(seed),
        )
    }

    /// Sub-board 0 holds "OXX XOX OX.": only local 8 is free, and it
    /// completes X's right column.
    fn single_move_position() -> Position {
        let cells = [
            Cell::Player2,
            Cell::Player1,
            Cell::Player1,
            Cell::Player1,
            Cell::Player2,
            Cell::Player1,
            Cell::Player2,
            Cell::Player1,
            Cell::Empty,
        ];
        let mut boards = [SubBoard::EMPTY; 9];
        boards[0] = SubBoard::pack(cells);
        Position::from_sub_boards(boards, Side::Player1, Some(0)).unwrap()
    }

    #[test]
    fn test_mcts_basic() {
        let mut mcts = create_mcts(42, 200);
        let pos = Position::initial();
        let result = mcts.search(&pos);

        assert!(pos.legal_moves().contains(&result.best_move));
        assert_eq!(result.root_visits, 200);
        // Every iteration passes through exactly one root child
        assert_eq!(result.total_child_visits(), 200);
        assert!(result.tree_size > 1);
    }

    #[test]
    fn test_mcts_deterministic() {
        let pos = Position::initial();
        let result1 = create_mcts(12345, 300).search(&pos);
        let result2 = create_mcts(12345, 300).search(&pos);

        // Same seed should produce same results
        assert_eq!(result1.best_move, result2.best_move);
        assert_eq!(result1.children, result2.children);
    }

    #[test]
    fn test_single_legal_move() {
        let pos = single_move_position();
        assert_eq!(pos.legal_moves().len(), 1);
        let only = pos.legal_moves()[0];

        for iterations in [1, 2, 50] {
            let result = create_mcts(3, iterations).search(&pos);
            assert_eq!(result.best_move, only);
            assert_eq!(result.children.len(), 1);
            assert_eq!(result.visits_of(only), Some(iterations as u32));
        }
    }

    #[test]
    fn test_best_move_has_most_visits() {
        let result = create_mcts(5, 500).search(&Position::initial());
        let max = result.children.iter().map(|c| c.visits).max().unwrap();
        assert_eq!(result.visits_of(result.best_move), Some(max));

        // Earliest expanded child wins ties
        let first_max = result.children.iter().find(|c| c.visits == max).unwrap();
        assert_eq!(result.best_move, first_max.mv);
    }

    #[test]
    fn test_all_children_visited_once_expanded() {
        // 9 replies in the forced sub-board, enough iterations to expand all
        let mut pos = Position::initial();
        pos.play_at(1, 3).unwrap();
        let result = create_mcts(11, 300).search(&pos);

        assert_eq!(result.children.len(), 9);
        assert!(result.children.iter().all(|c| c.visits >= 1));
    }

    #[test]
    #[should_panic(expected = "decided position")]
    fn test_search_on_decided_position_panics() {
        let won = SubBoard::EMPTY
            .with(0, Cell::Player1)
            .with(4, Cell::Player1)
            .with(8, Cell::Player1);
        let mut boards = [SubBoard::EMPTY; 9];
        boards[0] = won;
        boards[1] = won;
        boards[2] = won;
        let pos = Position::from_sub_boards(boards, Side::Player2, None).unwrap();
        create_mcts(1, 10).search(&pos);
    }

    #[test]
    #[should_panic(expected = "at least one iteration")]
    fn test_zero_iterations_panics() {
        create_mcts(1, 0);
    }
}
