//! Search-tree nodes and the arena that owns them.
//!
//! Nodes never point at each other directly. Each one stores the [`NodeId`] of the node it
//! was expanded from, and the [`NodeArena`] owns every node created during a run, so parent
//! chains can be walked without reference counting.
use crate::engine::Board;

/// Stable handle to a node inside a [`NodeArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in its arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A point in the search tree.
#[derive(Clone, Debug)]
pub struct Node {
    board: Board,
    parent: Option<NodeId>,
    cost: u32,
    heuristic: u32,
}

impl Node {
    /// Creates a node reached from `parent` at path cost `cost`.
    pub fn new(board: Board, parent: Option<NodeId>, cost: u32, heuristic: u32) -> Self {
        Node {
            board,
            parent,
            cost,
            heuristic,
        }
    }

    /// Creates the root node: no parent, cost 0, heuristic 0.
    pub fn root(board: Board) -> Self {
        Node::new(board, None, 0, 0)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Path cost `g`.
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Heuristic value `h`.
    pub fn heuristic(&self) -> u32 {
        self.heuristic
    }
}

/// Append-only owner of every node created during one search run.
#[derive(Debug, Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    pub fn new() -> Self {
        NodeArena::default()
    }

    /// Stores `node` and returns its handle.
    pub fn alloc(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    /// # Panics
    /// Panics if `id` was not produced by this arena.
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Handles from the root down to `id`, following parent links.
    pub fn path_to(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = vec![id];
        let mut current = self.get(id).parent();
        while let Some(parent) = current {
            path.push(parent);
            current = self.get(parent).parent();
        }
        path.reverse();
        path
    }
}

/// Returns the first node among `ids` whose board equals `board` cell by cell.
///
/// This is a plain linear scan in the order `ids` yields handles.
pub fn find_node_with_state<I>(arena: &NodeArena, ids: I, board: &Board) -> Option<NodeId>
where
    I: IntoIterator<Item = NodeId>,
{
    ids.into_iter().find(|&id| arena.get(id).board() == board)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_node_defaults() {
        let root = Node::root(Board::goal(3, 3));
        assert_eq!(root.parent(), None);
        assert_eq!(root.cost(), 0);
        assert_eq!(root.heuristic(), 0);
    }

    #[test]
    fn test_path_to_follows_parents() {
        let mut arena = NodeArena::new();
        let start = Board::scrambled(3, 3, 3, 1);
        let root = arena.alloc(Node::root(start.clone()));
        let first = start.possible_moves().remove(0);
        let a = arena.alloc(Node::new(first.clone(), Some(root), 1, 0));
        let second = first.possible_moves().remove(0);
        let b = arena.alloc(Node::new(second, Some(a), 2, 0));

        assert_eq!(arena.path_to(b), vec![root, a, b]);
        assert_eq!(arena.path_to(root), vec![root]);
        assert_eq!(arena.len(), 3);
        assert_eq!(b.index(), 2);
    }

    #[test]
    fn test_find_node_with_state() {
        let mut arena = NodeArena::new();
        let goal = Board::goal(2, 3);
        let moves = goal.possible_moves();
        let root = arena.alloc(Node::root(goal.clone()));
        let first = arena.alloc(Node::new(moves[0].clone(), Some(root), 1, 0));
        let second = arena.alloc(Node::new(moves[1].clone(), Some(root), 1, 0));

        let ids = [root, first, second];
        assert_eq!(find_node_with_state(&arena, ids, &moves[1]), Some(second));
        assert_eq!(find_node_with_state(&arena, ids, &goal), Some(root));
        assert_eq!(find_node_with_state(&arena, [first, second], &goal), None);
        assert_eq!(find_node_with_state(&arena, Vec::new(), &goal), None);
    }
}
