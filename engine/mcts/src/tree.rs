//! MCTS tree structure with arena allocation.
//!
//! The tree uses arena allocation for efficient node storage and
//! cache-friendly traversal. Nodes are stored in a contiguous Vec
//! and referenced by NodeId indices. Children are owned through the
//! parent's index list; the parent index is only read, never followed
//! for ownership, so dropping the tree drops every node at once.

use engine_core::{Outcome, Player};

use crate::node::{MctsNode, NodeId};

/// MCTS tree with arena-based node storage.
#[derive(Debug)]
pub struct MctsTree<A> {
    /// Arena storing all nodes
    nodes: Vec<MctsNode<A>>,

    /// Root node index (always 0 after initialization)
    root: NodeId,
}

impl<A: Copy + PartialEq> MctsTree<A> {
    /// Create a new tree whose root is owned by `root_owner`.
    pub fn new(root_owner: Player) -> Self {
        Self {
            nodes: vec![MctsNode::new_root(root_owner)],
            root: NodeId(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &MctsNode<A> {
        &self.nodes[id.0 as usize]
    }

    /// Get a mutable reference to a node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MctsNode<A> {
        &mut self.nodes[id.0 as usize]
    }

    /// Get the total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty (should never be true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the arena slice for read access.
    #[inline]
    pub fn arena(&self) -> &[MctsNode<A>] {
        &self.nodes
    }

    /// Append a child for `action` under `parent_id` and return its ID.
    pub fn add_child(&mut self, parent_id: NodeId, action: A) -> NodeId {
        let owner = self.get(parent_id).owner;
        let child_id = NodeId(self.nodes.len() as u32);
        self.nodes.push(MctsNode::new_child(parent_id, action, owner));

        // Add to parent's children
        self.get_mut(parent_id).children.push(child_id);

        child_id
    }

    /// Whether `node_id` already has a child for `action`.
    pub fn has_child(&self, node_id: NodeId, action: A) -> bool {
        self.get(node_id)
            .children
            .iter()
            .any(|&id| self.get(id).action == Some(action))
    }

    /// UCB1 score of a node, read against its parent's visits.
    ///
    /// `None` for the root, which has no parent to score against.
    pub fn selection_score(&self, node_id: NodeId) -> Option<f64> {
        let node = self.get(node_id);
        if node.parent.is_none() {
            return None;
        }
        Some(node.ucb1(self.get(node.parent).visits))
    }

    /// Select the child of a node with the highest UCB1 score.
    ///
    /// Ties go to the earliest-inserted child.
    pub fn select_child(&self, node_id: NodeId) -> Option<NodeId> {
        let node = self.get(node_id);

        let mut best: Option<(NodeId, f64)> = None;
        for &child_id in &node.children {
            let score = self.get(child_id).ucb1(node.visits);
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((child_id, score)),
            }
        }
        best.map(|(id, _)| id)
    }

    /// Backpropagate a playout outcome from a leaf to the root.
    pub fn backpropagate(&mut self, leaf_id: NodeId, outcome: Outcome) {
        let mut current_id = leaf_id;

        while current_id.is_some() {
            let node = self.get_mut(current_id);
            node.record(outcome);
            current_id = node.parent;
        }
    }

    /// Get the most visited child of the root.
    /// Returns (action, visits) or None if root has no children.
    ///
    /// Ties go to the earliest-inserted child.
    pub fn best_action(&self) -> Option<(A, u32)> {
        let root = self.get(self.root);

        let mut best: Option<(A, u32)> = None;
        for &child_id in &root.children {
            let child = self.get(child_id);
            let Some(action) = child.action else {
                continue;
            };
            match best {
                Some((_, best_visits)) if child.visits <= best_visits => {}
                _ => best = Some((action, child.visits)),
            }
        }
        best
    }

    /// (action, visits, reward) for each root child in insertion order.
    pub fn root_children(&self) -> Vec<(A, u32, f64)> {
        self.get(self.root)
            .children
            .iter()
            .filter_map(|&id| {
                let child = self.get(id);
                child.action.map(|action| (action, child.visits, child.reward))
            })
            .collect()
    }

    /// Get statistics about the tree for debugging.
    pub fn stats(&self) -> TreeStats {
        let root = self.get(self.root);
        TreeStats {
            total_nodes: self.nodes.len(),
            root_visits: root.visits,
            max_depth: self.compute_max_depth(),
        }
    }

    fn compute_max_depth(&self) -> u32 {
        let mut max_depth = 0;
        let mut stack = vec![(self.root, 0u32)];

        while let Some((node_id, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            for &child_id in &self.get(node_id).children {
                stack.push((child_id, depth + 1));
            }
        }

        max_depth
    }
}

/// Statistics about an MCTS tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_visits: u32,
    pub max_depth: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tree() {
        let tree: MctsTree<u8> = MctsTree::new(Player::Yellow);

        assert_eq!(tree.len(), 1);
        assert!(!tree.is_empty());
        assert_eq!(tree.root(), NodeId(0));

        let root = tree.get(tree.root());
        assert!(root.parent.is_none());
        assert_eq!(root.owner, Player::Yellow);
    }

    #[test]
    fn test_add_child() {
        let mut tree = MctsTree::new(Player::Yellow);

        let child_id = tree.add_child(tree.root(), 1u8);

        assert_eq!(tree.len(), 2);
        assert_eq!(child_id, NodeId(1));

        let root = tree.get(tree.root());
        assert_eq!(root.children, vec![NodeId(1)]);

        let child = tree.get(child_id);
        assert_eq!(child.parent, tree.root());
        assert_eq!(child.action, Some(1));
        assert_eq!(child.owner, Player::Red);
        assert!(tree.has_child(tree.root(), 1));
        assert!(!tree.has_child(tree.root(), 2));
    }

    #[test]
    fn test_owner_alternates_down_the_tree() {
        let mut tree = MctsTree::new(Player::Red);
        let a = tree.add_child(tree.root(), 0u8);
        let b = tree.add_child(a, 1);
        let c = tree.add_child(b, 2);

        for id in [a, b, c] {
            let node = tree.get(id);
            assert_ne!(node.owner, tree.get(node.parent).owner);
        }
    }

    #[test]
    fn test_backpropagate_win() {
        let mut tree = MctsTree::new(Player::Yellow);

        // Create a chain: root (Yellow) -> child (Red) -> grandchild (Yellow)
        let child_id = tree.add_child(tree.root(), 0u8);
        let grandchild_id = tree.add_child(child_id, 1);

        tree.backpropagate(grandchild_id, Outcome::Win(Player::Red));

        // Check visits
        assert_eq!(tree.get(grandchild_id).visits, 1);
        assert_eq!(tree.get(child_id).visits, 1);
        assert_eq!(tree.get(tree.root()).visits, 1);

        // Check rewards (owner-relative)
        assert_eq!(tree.get(grandchild_id).reward, -1.0);
        assert_eq!(tree.get(child_id).reward, 1.0);
        assert_eq!(tree.get(tree.root()).reward, -1.0);
    }

    #[test]
    fn test_backpropagate_draw() {
        let mut tree = MctsTree::new(Player::Yellow);
        let child_id = tree.add_child(tree.root(), 0u8);
        let grandchild_id = tree.add_child(child_id, 1);

        tree.backpropagate(grandchild_id, Outcome::Draw);

        for id in [tree.root(), child_id, grandchild_id] {
            assert_eq!(tree.get(id).visits, 1);
            assert_eq!(tree.get(id).reward, 0.0);
        }
    }

    #[test]
    fn test_select_child_prefers_unvisited() {
        let mut tree = MctsTree::new(Player::Yellow);
        let c1 = tree.add_child(tree.root(), 0u8);
        let c2 = tree.add_child(tree.root(), 1);

        tree.backpropagate(c1, Outcome::Win(Player::Red));

        assert_eq!(tree.select_child(tree.root()), Some(c2));
        assert_eq!(tree.selection_score(c2), Some(f64::INFINITY));
    }

    #[test]
    fn test_root_has_no_selection_score() {
        let mut tree = MctsTree::new(Player::Yellow);
        let child = tree.add_child(tree.root(), 0u8);
        tree.backpropagate(child, Outcome::Win(Player::Red));
        tree.backpropagate(child, Outcome::Draw);

        assert_eq!(tree.get(tree.root()).visits, 2);
        assert_eq!(tree.selection_score(tree.root()), None);

        let score = tree.selection_score(child).unwrap();
        assert!(score.is_finite());
    }

    #[test]
    fn test_select_child_ties_go_to_first() {
        let mut tree = MctsTree::new(Player::Yellow);
        let c1 = tree.add_child(tree.root(), 0u8);
        let c2 = tree.add_child(tree.root(), 1);
        let _c3 = tree.add_child(tree.root(), 2);

        // All unvisited: first child wins the tie
        assert_eq!(tree.select_child(tree.root()), Some(c1));

        // Equal statistics on c1 and c2, c3 still unvisited
        tree.backpropagate(c1, Outcome::Draw);
        tree.backpropagate(c2, Outcome::Draw);
        assert_eq!(tree.select_child(tree.root()), Some(NodeId(3)));
    }

    #[test]
    fn test_select_child_exploits_wins() {
        let mut tree = MctsTree::new(Player::Yellow);
        let c1 = tree.add_child(tree.root(), 0u8);
        let c2 = tree.add_child(tree.root(), 1);

        tree.backpropagate(c1, Outcome::Win(Player::Yellow));
        tree.backpropagate(c2, Outcome::Win(Player::Red));

        assert_eq!(tree.select_child(tree.root()), Some(c2));
    }

    #[test]
    fn test_select_child_of_leaf_is_none() {
        let tree: MctsTree<u8> = MctsTree::new(Player::Red);
        assert_eq!(tree.select_child(tree.root()), None);
    }

    #[test]
    fn test_best_action_by_visits() {
        let mut tree = MctsTree::new(Player::Yellow);
        let c1 = tree.add_child(tree.root(), 0u8);
        let c2 = tree.add_child(tree.root(), 1);

        // c1 has the better mean, c2 the most visits
        tree.backpropagate(c1, Outcome::Win(Player::Red));
        for _ in 0..3 {
            tree.backpropagate(c2, Outcome::Draw);
        }

        assert_eq!(tree.best_action(), Some((1, 3)));
    }

    #[test]
    fn test_best_action_ties_go_to_first() {
        let mut tree = MctsTree::new(Player::Yellow);
        let c1 = tree.add_child(tree.root(), 4u8);
        let c2 = tree.add_child(tree.root(), 5);
        tree.backpropagate(c1, Outcome::Draw);
        tree.backpropagate(c2, Outcome::Draw);

        assert_eq!(tree.best_action(), Some((4, 1)));
    }

    #[test]
    fn test_best_action_without_children() {
        let tree: MctsTree<u8> = MctsTree::new(Player::Red);
        assert_eq!(tree.best_action(), None);
    }

    #[test]
    fn test_root_children() {
        let mut tree = MctsTree::new(Player::Yellow);
        let c1 = tree.add_child(tree.root(), 2u8);
        tree.add_child(tree.root(), 6);
        tree.backpropagate(c1, Outcome::Win(Player::Red));

        assert_eq!(tree.root_children(), vec![(2, 1, 1.0), (6, 0, 0.0)]);
    }

    #[test]
    fn test_tree_stats() {
        let mut tree = MctsTree::new(Player::Yellow);
        let c1 = tree.add_child(tree.root(), 0u8);
        let c2 = tree.add_child(c1, 1);
        tree.add_child(tree.root(), 1);
        tree.backpropagate(c2, Outcome::Draw);

        let stats = tree.stats();
        assert_eq!(stats.total_nodes, 4);
        assert_eq!(stats.root_visits, 1);
        assert_eq!(stats.max_depth, 2);
    }
}
