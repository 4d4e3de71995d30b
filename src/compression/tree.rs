//! Huffman tree construction.
//!
//! Nodes are merged smallest-weight first. Equal weights are ordered by
//! insertion sequence: leaves are pushed in ascending symbol order and every
//! merged node takes the next sequence number. The first node popped becomes
//! the left child. This fixes the exact bit patterns for a given input.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::compression::frequency::FrequencyTable;

/// Represents a node in the Huffman tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode {
    /// A leaf node contains a symbol and its frequency.
    Leaf { symbol: u8, weight: usize },
    /// An internal node with left and right children and combined frequency.
    Internal {
        weight: usize,
        left: Box<HuffmanNode>,
        right: Box<HuffmanNode>,
    },
}

impl HuffmanNode {
    /// Returns the weight of the node.
    pub fn weight(&self) -> usize {
        match self {
            HuffmanNode::Leaf { weight, .. } => *weight,
            HuffmanNode::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffmanNode::Leaf { .. })
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        match self {
            HuffmanNode::Leaf { .. } => 0,
            HuffmanNode::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}

/// A helper wrapper for HuffmanNode for use in a BinaryHeap.
/// The node with the smallest (weight, sequence) pair has highest priority.
#[derive(Debug)]
struct NodeWrapper {
    node: Box<HuffmanNode>,
    sequence: usize,
}

impl NodeWrapper {
    fn key(&self) -> (usize, usize) {
        (self.node.weight(), self.sequence)
    }
}

impl PartialEq for NodeWrapper {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for NodeWrapper {}

impl Ord for NodeWrapper {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse: lower weight, then earlier sequence, comes first.
        other.key().cmp(&self.key())
    }
}

impl PartialOrd for NodeWrapper {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Build the Huffman tree given a frequency table.
/// Returns `None` if the frequency table is empty.
///
/// A table with one symbol yields a single leaf.
///
/// ```
/// use static_huffman::compression::{build_huffman_tree, FrequencyTable, HuffmanNode};
///
/// let freq = FrequencyTable::from_bytes(b"aabbbcc");
/// let tree = build_huffman_tree(&freq).unwrap();
/// assert_eq!(tree.weight(), 7);
/// assert!(matches!(*tree, HuffmanNode::Internal { .. }));
/// ```
pub fn build_huffman_tree(freq_table: &FrequencyTable) -> Option<Box<HuffmanNode>> {
    let mut heap = BinaryHeap::new();
    let mut sequence = 0;
    for (symbol, weight) in freq_table.iter() {
        heap.push(NodeWrapper {
            node: Box::new(HuffmanNode::Leaf { symbol, weight }),
            sequence,
        });
        sequence += 1;
    }

    // Combine nodes until only one tree remains.
    loop {
        let first = heap.pop()?;
        let Some(second) = heap.pop() else {
            return Some(first.node);
        };
        let internal = Box::new(HuffmanNode::Internal {
            weight: first.node.weight() + second.node.weight(),
            left: first.node,
            right: second.node,
        });
        heap.push(NodeWrapper {
            node: internal,
            sequence,
        });
        sequence += 1;
    }
}
