//! Arena-allocated MCTS tree.
//!
//! Using a Vec<Node> with indices provides better cache locality
//! and simpler ownership compared to Rc<RefCell<Node>>. The whole arena is
//! dropped when a search ends; trees are never reused between decisions.

use uttt_board::{Cell, Coord, Position};

use crate::node::{Node, NodeId};

/// Arena-allocated MCTS tree.
///
/// Nodes are stored in a contiguous vector and referenced by index.
/// The tree only grows: children are appended, statistics only increase.
#[derive(Debug)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// Create a new tree holding only a root for `position`.
    pub fn new(position: Position) -> Self {
        Self {
            nodes: vec![Node::root(position)],
        }
    }

    /// Get a reference to a node by ID.
    ///
    /// # Panics
    /// Panics if the NodeId is invalid.
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Get a mutable reference to a node by ID.
    ///
    /// # Panics
    /// Panics if the NodeId is invalid.
    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Get the root node.
    pub fn root(&self) -> &Node {
        self.get(NodeId::ROOT)
    }

    /// Get the number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Expand `mv` from `parent` into a new child and return its ID.
    ///
    /// # Panics
    /// Panics if `mv` is not in the parent's untried list. That means the
    /// tree state is corrupt, so the search is aborted.
    pub fn add_child(&mut self, parent: NodeId, mv: Coord) -> NodeId {
        let node = self.get_mut(parent);
        let index = node
            .untried
            .iter()
            .position(|&m| m == mv)
            .expect("BUG: expanded move is not in the untried list");
        node.untried.remove(index);

        let position = node
            .position
            .with_move(mv)
            .expect("BUG: untried move is illegal");

        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::child(position, mv, parent));
        self.get_mut(parent).children.push(id);
        id
    }

    /// Select the child with the highest UCB1 score.
    ///
    /// Ties keep the earliest child in expansion order.
    ///
    /// # Panics
    /// Panics if the node still has untried moves or has no children.
    pub fn select_child(&self, id: NodeId, exploration: f64) -> NodeId {
        let node = self.get(id);
        assert!(
            node.is_fully_expanded(),
            "BUG: select_child called with untried moves left"
        );
        let ln_parent = f64::from(node.stats.visits).ln();

        let mut best = None;
        let mut best_score = f64::NEG_INFINITY;
        for &child_id in &node.children {
            let score = self.get(child_id).stats.ucb1(ln_parent, exploration);
            if score > best_score {
                best_score = score;
                best = Some(child_id);
            }
        }

        // INVARIANT: a non-terminal node with no untried moves has children
        best.expect("BUG: select_child called on node without children")
    }

    /// Descend from the root while nodes are fully expanded and undecided.
    ///
    /// Returns the node where expansion (or terminal scoring) happens.
    pub fn select_leaf(&self, exploration: f64) -> NodeId {
        let mut current = NodeId::ROOT;
        loop {
            let node = self.get(current);
            if !node.is_fully_expanded() || node.is_terminal() {
                return current;
            }
            current = self.select_child(current, exploration);
        }
    }

    /// Record `outcome` on `leaf` and every ancestor up to the root.
    pub fn backpropagate(&mut self, leaf: NodeId, outcome: Cell) {
        let mut current = Some(leaf);
        while let Some(id) = current {
            let node = self.get_mut(id);
            node.record_visit(outcome);
            current = node.parent;
        }
    }

    /// Root children in expansion order.
    pub fn root_children(&self) -> impl Iterator<Item = &Node> {
        self.root().children.iter().map(|&id| self.get(id))
    }
}
