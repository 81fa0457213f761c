//! Search-tree nodes for the puzzle solvers.
//!
//! Both search engines wrap board states in `PuzzleNode`s and keep them in a
//! `NodeArena`. Nodes reference their parent by arena index rather than by an
//! owning pointer, which keeps the search tree acyclic from an ownership point
//! of view while still allowing O(depth) path reconstruction from any node
//! back to the root.
use crate::engine::{Move, Puzzle};
use std::hash::{Hash, Hasher};

/// Handle to a node inside a `NodeArena`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

/// A board state plus its search metadata: depth from the root, the move that
/// produced it, and a back-reference to its parent.
///
/// Equality and hashing are defined by the wrapped puzzle alone. Two paths
/// that reach the same configuration at different depths are the *same* node
/// as far as a visited set is concerned, which is what makes dedup correct.
#[derive(Clone, Debug)]
pub struct PuzzleNode {
    puzzle: Puzzle,
    depth: u32,
    parent: Option<NodeId>,
    via: Option<Move>,
}

impl PuzzleNode {
    /// Creates a root node at depth 0 with no parent and no originating move.
    pub fn root(puzzle: Puzzle) -> Self {
        PuzzleNode {
            puzzle,
            depth: 0,
            parent: None,
            via: None,
        }
    }

    /// The board state this node wraps.
    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    /// Depth from the search root; the root itself is 0.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// The move that produced this node from its parent, absent for the root.
    pub fn via(&self) -> Option<Move> {
        self.via
    }

    /// Arena handle of this node's parent, absent for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Whether the wrapped puzzle is in the solved configuration.
    pub fn is_goal(&self) -> bool {
        self.puzzle.is_goal()
    }
}

impl PartialEq for PuzzleNode {
    fn eq(&self, other: &Self) -> bool {
        self.puzzle == other.puzzle
    }
}

impl Eq for PuzzleNode {}

impl Hash for PuzzleNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.puzzle.hash(state);
    }
}

/// Flat storage for one search's nodes.
///
/// Each engine invocation owns its own arena; nothing is shared across
/// `solve` calls. Children are generated lazily by `expand`, one per
/// currently valid move of the parent's board.
pub struct NodeArena {
    nodes: Vec<PuzzleNode>,
}

impl NodeArena {
    /// Creates an arena seeded with a single root node for `puzzle`.
    pub fn with_root(puzzle: Puzzle) -> Self {
        NodeArena {
            nodes: vec![PuzzleNode::root(puzzle)],
        }
    }

    /// Handle of the root node.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes allocated so far (root included).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True iff the arena holds no nodes. Arenas built by `with_root` never
    /// are, but the method keeps the container interface complete.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Borrows the node behind `id`.
    ///
    /// # Panics
    /// Panics if `id` did not come from this arena.
    pub fn get(&self, id: NodeId) -> &PuzzleNode {
        &self.nodes[id.0]
    }

    /// Expands `id`: allocates one child per valid move of its board, at
    /// depth + 1, each recording `id` as parent and the move that produced it.
    ///
    /// Returns the handles of the freshly created children, in the engine's
    /// fixed move order. On a well-formed board this is never empty, since a
    /// 2x2-or-larger puzzle always has at least two legal moves.
    pub fn expand(&mut self, id: NodeId) -> Vec<NodeId> {
        let parent = &self.nodes[id.0];
        let depth = parent.depth + 1;
        let children: Vec<PuzzleNode> = parent
            .puzzle
            .valid_moves()
            .into_iter()
            .map(|mv| PuzzleNode {
                puzzle: parent.puzzle.apply(mv).expect("valid move applies"),
                depth,
                parent: Some(id),
                via: Some(mv),
            })
            .collect();

        let first = self.nodes.len();
        self.nodes.extend(children);
        (first..self.nodes.len()).map(NodeId).collect()
    }

    /// Reconstructs the move path from the root to `id` by walking parent
    /// references backwards and reversing the collected moves.
    ///
    /// Applying the returned moves, in order, to the root board yields the
    /// board wrapped by `id`.
    pub fn path_moves(&self, id: NodeId) -> Vec<Move> {
        let mut moves = Vec::new();
        let mut cursor = &self.nodes[id.0];
        while let (Some(mv), Some(parent)) = (cursor.via, cursor.parent) {
            moves.push(mv);
            cursor = &self.nodes[parent.0];
        }
        moves.reverse();
        moves
    }
}
