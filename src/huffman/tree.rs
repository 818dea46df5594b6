//! Construction of an optimal prefix-code tree from a [`FrequencyTable`].

use crate::frequency::FrequencyTable;
use crate::huffman::SymbolLength;
use alloc::boxed::Box;
use alloc::collections::BinaryHeap;
use alloc::vec;
use alloc::vec::Vec;
use core::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    Leaf {
        symbol: u8,
        freq: u64,
    },
    Internal {
        freq: u64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

impl TreeNode {
    pub fn freq(&self) -> u64 {
        match self {
            TreeNode::Leaf { freq, .. } => *freq,
            TreeNode::Internal { freq, .. } => *freq,
        }
    }
}

/// A strict binary tree with one leaf per distinct input symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: TreeNode,
    /// Set when there was only one distinct symbol. The lone leaf is then the
    /// single child of a synthetic root, which gives it a one bit code.
    synthetic_root: bool,
}

/// A node waiting in the merge queue.
///
/// Ordered so that a max-heap pops the lowest frequency first, and among equal
/// frequencies the node that was created first.
struct QueuedNode {
    freq: u64,
    seq: u32,
    node: TreeNode,
}

impl Ord for QueuedNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .freq
            .cmp(&self.freq)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for QueuedNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for QueuedNode {
    fn eq(&self, other: &Self) -> bool {
        self.freq == other.freq && self.seq == other.seq
    }
}

impl Eq for QueuedNode {}

impl HuffmanTree {
    /// Build the tree by repeatedly merging the two least frequent nodes.
    ///
    /// Leaves get sequence numbers in symbol order, merged nodes in merge
    /// order, and ties on frequency go to the lower sequence number. That
    /// makes the result a function of the frequencies alone.
    ///
    /// Returns `None` for an empty table.
    pub fn build(frequencies: &FrequencyTable) -> Option<HuffmanTree> {
        let mut queue = BinaryHeap::with_capacity(frequencies.distinct());
        let mut next_seq = 0;
        for (symbol, freq) in frequencies.iter() {
            queue.push(QueuedNode {
                freq,
                seq: next_seq,
                node: TreeNode::Leaf { symbol, freq },
            });
            next_seq += 1;
        }

        if queue.len() == 1 {
            let lone = queue.pop()?;
            return Some(HuffmanTree {
                root: lone.node,
                synthetic_root: true,
            });
        }

        while queue.len() > 1 {
            let (Some(left), Some(right)) = (queue.pop(), queue.pop()) else {
                unreachable!("queue holds at least two nodes");
            };
            let freq = left.freq + right.freq;
            queue.push(QueuedNode {
                freq,
                seq: next_seq,
                node: TreeNode::Internal {
                    freq,
                    left: Box::new(left.node),
                    right: Box::new(right.node),
                },
            });
            next_seq += 1;
        }

        queue.pop().map(|last| HuffmanTree {
            root: last.node,
            synthetic_root: false,
        })
    }

    /// The topmost real node.
    ///
    /// For a single distinct symbol this is that symbol's leaf. The tree then
    /// has two nodes: a synthetic root, not stored since it has one child, and
    /// this leaf below it. See [`HuffmanTree::has_synthetic_root`].
    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    /// Whether the returned [`HuffmanTree::root`] hangs below a synthetic
    /// root, which puts every depth one level deeper.
    pub fn has_synthetic_root(&self) -> bool {
        self.synthetic_root
    }

    /// Depth of every leaf, in traversal order (left before right).
    ///
    /// Walks the tree with an explicit stack, skewed frequency distributions
    /// produce trees as deep as there are distinct symbols.
    pub fn code_lengths(&self) -> Vec<SymbolLength> {
        let root_depth = if self.synthetic_root { 1 } else { 0 };
        let mut lengths = Vec::new();
        let mut stack = vec![(&self.root, root_depth)];
        while let Some((node, depth)) = stack.pop() {
            match node {
                TreeNode::Leaf { symbol, .. } => lengths.push(SymbolLength {
                    symbol: *symbol,
                    length: depth,
                }),
                TreeNode::Internal { left, right, .. } => {
                    stack.push((&**right, depth + 1));
                    stack.push((&**left, depth + 1));
                }
            }
        }
        lengths
    }

    /// Total number of nodes, counting the synthetic root if there is one.
    pub fn node_count(&self) -> usize {
        let mut count = usize::from(self.synthetic_root);
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            count += 1;
            if let TreeNode::Internal { left, right, .. } = node {
                stack.push(&**right);
                stack.push(&**left);
            }
        }
        count
    }
}
