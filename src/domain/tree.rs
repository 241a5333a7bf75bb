//! Decision tree structure produced by the ID3 builder.

use std::collections::BTreeMap;

/// A node of a built decision tree.
///
/// Each node owns its children outright; trees are never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    /// Terminal node holding the predicted label.
    Leaf { label: String },
    /// Split on `feature`, one child per value observed in training.
    Internal {
        feature: String,
        children: BTreeMap<String, TreeNode>,
        /// Majority label of the rows this node was built from
        fallback: String,
    },
}

impl TreeNode {
    pub fn leaf(label: impl Into<String>) -> Self {
        TreeNode::Leaf {
            label: label.into(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, TreeNode::Leaf { .. })
    }

    /// Split feature of an internal node.
    pub fn feature(&self) -> Option<&str> {
        match self {
            TreeNode::Leaf { .. } => None,
            TreeNode::Internal { feature, .. } => Some(feature),
        }
    }

    /// The label a prediction stopping here would return: a leaf's label or an internal fallback.
    pub fn label(&self) -> &str {
        match self {
            TreeNode::Leaf { label } => label,
            TreeNode::Internal { fallback, .. } => fallback,
        }
    }

    /// Number of levels, a single leaf has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 1,
            TreeNode::Internal { children, .. } => {
                1 + children.values().map(TreeNode::depth).max().unwrap_or(0)
            }
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 1,
            TreeNode::Internal { children, .. } => children.values().map(TreeNode::leaf_count).sum(),
        }
    }

    pub fn node_count(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 1,
            TreeNode::Internal { children, .. } => {
                1 + children.values().map(TreeNode::node_count).sum::<usize>()
            }
        }
    }
}
