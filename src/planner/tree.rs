//! Arena-based search tree.
//!
//! Uses a flat `Vec<MaxNode>` with index-based references. A successor state
//! that recurs under the same arm is recorded as another visit to the
//! existing node, never as a second owner, so the arena stays a tree.

use super::node::{MaxNode, NodeId};

/// Arena of `MaxNode`s; the root is always index 0.
#[derive(Clone, Debug)]
pub struct SearchTree<S, A> {
    /// All nodes in the tree.
    nodes: Vec<MaxNode<S, A>>,

    /// The root node ID.
    root: NodeId,
}

impl<S, A> SearchTree<S, A> {
    /// Create a tree holding only `root`.
    pub fn new(root: MaxNode<S, A>) -> Self {
        let mut nodes = Vec::with_capacity(1024);
        nodes.push(root);
        Self {
            nodes,
            root: NodeId::new(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a node by ID.
    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> &MaxNode<S, A> {
        &self.nodes[id.0 as usize]
    }

    /// Get a mutable node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MaxNode<S, A> {
        &mut self.nodes[id.0 as usize]
    }

    /// Allocate a new node, returning its ID.
    pub fn alloc(&mut self, node: MaxNode<S, A>) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Number of max nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the root is allocated on construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the root node.
    #[must_use]
    pub fn root_node(&self) -> &MaxNode<S, A> {
        self.get(self.root)
    }

    /// Iterate over all nodes.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &MaxNode<S, A>)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId::new(i as u32), n))
    }

    /// Get statistics about the tree.
    #[must_use]
    pub fn stats(&self) -> TreeStats {
        let max_depth = self.nodes.iter().map(|n| n.depth).max().unwrap_or(0);
        let arms = self.nodes.iter().flat_map(|n| n.arms.iter());
        let (mut arm_count, mut samples, mut distinct) = (0, 0, 0);
        for arm in arms {
            arm_count += 1;
            samples += arm.sample_count();
            distinct += arm.successors().len();
        }

        TreeStats {
            node_count: self.nodes.len(),
            arm_count,
            samples,
            distinct_successors: distinct,
            max_depth,
        }
    }
}

/// Statistics about the search tree.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TreeStats {
    /// Max nodes allocated.
    pub node_count: usize,

    /// Avg nodes (arms) across all max nodes.
    pub arm_count: usize,

    /// Generative-model samples cached in the tree.
    pub samples: usize,

    /// Distinct successor records.
    pub distinct_successors: usize,

    /// Deepest max node.
    pub max_depth: u16,
}

impl TreeStats {
    /// Average arms per max node.
    #[must_use]
    pub fn branching_factor(&self) -> f64 {
        if self.node_count == 0 {
            0.0
        } else {
            self.arm_count as f64 / self.node_count as f64
        }
    }

    /// Fraction of samples that hit an already-known successor.
    #[must_use]
    pub fn reuse_ratio(&self) -> f64 {
        if self.samples == 0 {
            0.0
        } else {
            1.0 - self.distinct_successors as f64 / self.samples as f64
        }
    }
}
