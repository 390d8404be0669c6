/// A branch under a split node: one observed feature value and the
/// subtree owning every row that carried it.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    /// The feature value labeling this edge.
    pub value: String,
    /// The subtree reached through this value.
    pub child: Node,
}

/// A node in an induced decision tree.
///
/// Children are owned by value through [`Branch`] entries, so the tree is
/// acyclic by construction and needs no parent back-pointers. The branch
/// layer is structural, not a node: one decision level is a `Split` plus
/// its value edges, and traversal counts levels directly.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// An interior decision node keyed on one feature.
    Split {
        /// Feature the decision is made on.
        feature: String,
        /// Number of dataset rows that reached this node.
        samples: usize,
        /// One branch per distinct observed value, in lexicographic order.
        branches: Vec<Branch>,
    },
    /// A terminal node assigning one class label.
    Leaf {
        /// The class label assigned to every row reaching this leaf.
        label: String,
        /// Number of dataset rows that reached this leaf.
        samples: usize,
    },
}

impl Node {
    /// Return the number of dataset rows that reached this node.
    #[must_use]
    pub fn samples(&self) -> usize {
        match self {
            Node::Split { samples, .. } | Node::Leaf { samples, .. } => *samples,
        }
    }

    /// Return `true` if this node is a leaf.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Return the total number of nodes in this subtree (splits and leaves).
    #[must_use]
    pub fn n_nodes(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Split { branches, .. } => {
                1 + branches.iter().map(|b| b.child.n_nodes()).sum::<usize>()
            }
        }
    }

    /// Return the number of leaf nodes in this subtree.
    #[must_use]
    pub fn n_leaves(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Split { branches, .. } => {
                branches.iter().map(|b| b.child.n_leaves()).sum()
            }
        }
    }

    /// Return the maximum decision depth below this node.
    ///
    /// A lone leaf has depth 0; each split layer adds one level.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Split { branches, .. } => {
                1 + branches.iter().map(|b| b.child.depth()).max().unwrap_or(0)
            }
        }
    }

    /// Visit every node pre-order, passing each node and its decision level.
    ///
    /// The root is visited at level 0; children of a split at level + 1.
    pub fn visit<F>(&self, visitor: &mut F)
    where
        F: FnMut(&Node, usize),
    {
        self.visit_at(visitor, 0);
    }

    fn visit_at<F>(&self, visitor: &mut F, level: usize)
    where
        F: FnMut(&Node, usize),
    {
        visitor(self, level);
        if let Node::Split { branches, .. } = self {
            for branch in branches {
                branch.child.visit_at(visitor, level + 1);
            }
        }
    }
}
