use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::min_heap::MinHeap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: HuffNode,
}

impl HuffmanTree {
    pub fn from_phrase(phrase: &str) -> Result<Self> {
        let frequencies = FrequencyTable::from_phrase(phrase)?;
        HuffmanTree::from_frequencies(&frequencies)
    }

    /// Builds the tree by repeatedly merging the two lightest nodes.
    ///
    /// Ties on weight go to the node that entered the heap first: leaves in
    /// first-seen symbol order, then merged nodes in creation order. The
    /// first node extracted becomes the left child.
    pub fn from_frequencies(frequencies: &FrequencyTable) -> Result<Self> {
        let leaves: Vec<Ranked> = frequencies
            .iter()
            .enumerate()
            .map(|(seq, (symbol, count))| Ranked {
                seq,
                node: HuffNode::new(symbol, count),
            })
            .collect();
        let mut next_seq = leaves.len();
        let mut heap = MinHeap::build(leaves);

        let root = loop {
            let x = heap.extract_min().ok_or(HuffmanError::EmptyInput)?;
            match heap.extract_min() {
                None => break x.node,
                Some(y) => {
                    heap.insert(Ranked {
                        seq: next_seq,
                        node: HuffNode::merge(x.node, y.node),
                    });
                    next_seq += 1;
                }
            }
        };

        // A lone leaf would get an empty code, so give it a sibling slot.
        let root = match root {
            leaf @ HuffNode::Leaf { .. } => HuffNode::merge(leaf, HuffNode::Vacant),
            internal => internal,
        };

        debug!(
            symbols = frequencies.len(),
            weight = root.weight(),
            "built huffman tree"
        );
        Ok(HuffmanTree { root })
    }

    pub fn root(&self) -> &HuffNode {
        &self.root
    }

    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    /// Flattened, read-only copy of the tree for renderers.
    pub fn snapshot(&self) -> TreeSnapshot {
        let mut nodes = Vec::new();
        flatten(&self.root, &mut nodes);
        TreeSnapshot { nodes }
    }

    fn fmt_node(
        &self,
        f: &mut fmt::Formatter<'_>,
        node: &HuffNode,
        depth: usize,
        label: &str,
    ) -> fmt::Result {
        let indent = "  ".repeat(depth);
        match node {
            HuffNode::Leaf { symbol, weight } => {
                writeln!(f, "{}{}-> Leaf: {:?} [weight: {}]", indent, label, symbol, weight)
            }
            HuffNode::Internal { weight, left, right } => {
                writeln!(f, "{}{}-> Internal [weight: {}]", indent, label, weight)?;
                self.fmt_node(f, left, depth + 1, "0")?;
                self.fmt_node(f, right, depth + 1, "1")
            }
            HuffNode::Vacant => writeln!(f, "{}{}-> (empty)", indent, label),
        }
    }
}

impl fmt::Display for HuffmanTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_node(f, &self.root, 0, "root")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffNode {
    Leaf {
        weight: usize,
        symbol: char,
    },
    Internal {
        weight: usize,
        left: Box<HuffNode>,
        right: Box<HuffNode>,
    },
    /// Empty sibling of the only leaf in a one-symbol tree.
    Vacant,
}

impl HuffNode {
    pub fn new(symbol: char, weight: usize) -> Self {
        HuffNode::Leaf { weight, symbol }
    }

    pub fn weight(&self) -> usize {
        match self {
            HuffNode::Leaf { weight, .. } => *weight,
            HuffNode::Internal { weight, .. } => *weight,
            HuffNode::Vacant => 0,
        }
    }

    pub fn symbol(&self) -> Option<char> {
        match self {
            HuffNode::Leaf { symbol, .. } => Some(*symbol),
            _ => None,
        }
    }

    pub fn merge(a: Self, b: Self) -> Self {
        // a is the lighter node
        let weight = a.weight() + b.weight();
        HuffNode::Internal {
            weight,
            left: Box::new(a),
            right: Box::new(b),
        }
    }

    fn leaf_count(&self) -> usize {
        match self {
            HuffNode::Leaf { .. } => 1,
            HuffNode::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
            HuffNode::Vacant => 0,
        }
    }
}

/// Heap entry: a node plus the order in which it entered the heap.
#[derive(Debug)]
struct Ranked {
    seq: usize,
    node: HuffNode,
}

impl Ranked {
    fn key(&self) -> (usize, usize) {
        (self.node.weight(), self.seq)
    }
}

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Ranked {}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// Pre-order node list; `nodes[0]` is the root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeSnapshot {
    pub nodes: Vec<SnapshotNode>,
}

/// One node of a [`TreeSnapshot`]. `left` is the '0' edge and `right` the '1'
/// edge; both hold ids into the same snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotNode {
    pub id: usize,
    pub weight: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<char>,
    pub left: Option<usize>,
    pub right: Option<usize>,
}

fn flatten(node: &HuffNode, nodes: &mut Vec<SnapshotNode>) -> Option<usize> {
    let id = nodes.len();
    match node {
        HuffNode::Vacant => None,
        HuffNode::Leaf { weight, symbol } => {
            nodes.push(SnapshotNode {
                id,
                weight: *weight,
                symbol: Some(*symbol),
                left: None,
                right: None,
            });
            Some(id)
        }
        HuffNode::Internal { weight, left, right } => {
            nodes.push(SnapshotNode {
                id,
                weight: *weight,
                symbol: None,
                left: None,
                right: None,
            });
            let l = flatten(left, nodes);
            let r = flatten(right, nodes);
            nodes[id].left = l;
            nodes[id].right = r;
            Some(id)
        }
    }
}
