//! MCTS node types for tree storage.
//!
//! Nodes live in an arena and refer to each other by index: children are
//! owned through the arena, the parent link is a plain handle.

use uttt_board::{Cell, Coord, Position, Side};

/// Index into the node arena.
///
/// This is a lightweight handle that references a node in the tree.
/// Using indices instead of pointers avoids Rc/RefCell overhead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The root node is always at index 0.
    pub const ROOT: NodeId = NodeId(0);
}

/// Statistics for a single MCTS node.
///
/// Both values are seen from the side that made the move into this node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeStats {
    /// Number of iterations that passed through this node.
    pub visits: u32,

    /// Win credit: 1 per win, 0.5 per draw.
    pub wins: f64,
}

impl NodeStats {
    /// Mean win credit, 0.0 for an unvisited node.
    pub fn win_rate(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.wins / self.visits as f64
        }
    }

    /// UCB1 score given `ln(parent_visits)`.
    ///
    /// UCB1 = wins / visits + sqrt(exploration * ln(N_parent) / visits)
    ///
    /// The node must have been visited at least once.
    pub fn ucb1(&self, ln_parent_visits: f64, exploration: f64) -> f64 {
        debug_assert!(self.visits > 0, "UCB1 of an unvisited node");
        let visits = self.visits as f64;
        self.wins / visits + (exploration * ln_parent_visits / visits).sqrt()
    }
}

/// A node in the MCTS tree.
///
/// Each node owns a snapshot of the position it represents.
#[derive(Clone, Debug)]
pub struct Node {
    /// Position after `last_move`.
    pub position: Position,

    /// Move that led to this node (None for root).
    pub last_move: Option<Coord>,

    /// Result of `position`; `Cell::Empty` while the game goes on.
    pub result: Cell,

    /// Visit and win statistics.
    pub stats: NodeStats,

    /// Legal moves not yet expanded into children, in move generation order.
    pub untried: Vec<Coord>,

    /// Parent handle (None for root).
    pub parent: Option<NodeId>,

    /// Children in expansion order.
    pub children: Vec<NodeId>,
}

impl Node {
    /// Create the root node for a search from `position`.
    pub fn root(position: Position) -> Self {
        Self::new(position, None, None)
    }

    /// Create a freshly expanded child.
    pub fn child(position: Position, last_move: Coord, parent: NodeId) -> Self {
        Self::new(position, Some(last_move), Some(parent))
    }

    fn new(position: Position, last_move: Option<Coord>, parent: Option<NodeId>) -> Self {
        Self {
            position,
            last_move,
            result: position.overall_result(),
            stats: NodeStats::default(),
            untried: position.legal_moves(),
            parent,
            children: Vec::new(),
        }
    }

    /// Whether this node represents a decided game.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.result != Cell::Empty
    }

    /// Whether every legal move has a child.
    #[inline]
    pub fn is_fully_expanded(&self) -> bool {
        self.untried.is_empty()
    }

    /// The side that moved into this node, whose viewpoint the stats take.
    #[inline]
    pub fn mover(&self) -> Side {
        self.position.next_player().opposite()
    }

    /// Count one visit ending in `outcome`.
    ///
    /// Credit is 1.0 when the mover into this node won, 0.5 for a draw and
    /// nothing otherwise.
    pub fn record_visit(&mut self, outcome: Cell) {
        self.stats.visits += 1;
        if outcome == Cell::Draw {
            self.stats.wins += 0.5;
        } else if outcome == self.mover().cell() {
            self.stats.wins += 1.0;
        }
    }
}
