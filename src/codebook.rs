use std::collections::BTreeMap;

use serde::Serialize;

use crate::frequency::FrequencyTable;
use crate::hufftree::{HuffNode, HuffmanTree};

/// Symbol to codeword mapping derived from one tree.
///
/// Codes are rendered as '0'/'1' strings; a code's length is the depth of
/// its leaf.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Codebook {
    codes: BTreeMap<char, String>,
}

impl Codebook {
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = BTreeMap::new();
        let mut path = String::new();
        generate_table(tree.root(), &mut codes, &mut path);
        Codebook { codes }
    }

    pub fn get(&self, symbol: char) -> Option<&str> {
        self.codes.get(&symbol).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// (symbol, code) pairs ordered by symbol.
    pub fn iter(&self) -> impl Iterator<Item = (char, &str)> {
        self.codes.iter().map(|(symbol, code)| (*symbol, code.as_str()))
    }

    pub fn is_prefix_free(&self) -> bool {
        // In sorted order a code that prefixes others sorts directly before
        // the first of them.
        let mut sorted: Vec<&str> = self.codes.values().map(String::as_str).collect();
        sorted.sort_unstable();
        sorted.windows(2).all(|pair| !pair[1].starts_with(pair[0]))
    }

    /// Bits needed to encode every symbol occurrence counted in `frequencies`.
    /// Symbols without a code contribute nothing.
    pub fn encoded_len(&self, frequencies: &FrequencyTable) -> usize {
        frequencies
            .iter()
            .filter_map(|(symbol, count)| self.get(symbol).map(|code| code.len() * count))
            .sum()
    }
}

fn generate_table(node: &HuffNode, table: &mut BTreeMap<char, String>, path: &mut String) {
    match node {
        HuffNode::Leaf { symbol, .. } => {
            table.insert(*symbol, path.clone());
        }
        HuffNode::Internal { left, right, .. } => {
            path.push('0');
            generate_table(left, table, path);
            path.pop();
            path.push('1');
            generate_table(right, table, path);
            path.pop();
        }
        HuffNode::Vacant => {}
    }
}
