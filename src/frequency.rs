use std::collections::HashMap;

use tracing::{debug, trace};

use crate::error::{HuffmanError, Result};

/// Symbol counts for a phrase, kept in the order each symbol first appears.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    entries: Vec<(char, usize)>,
    index: HashMap<char, usize>,
}

impl FrequencyTable {
    pub fn from_phrase(phrase: &str) -> Result<Self> {
        if phrase.is_empty() {
            return Err(HuffmanError::EmptyInput);
        }

        let table = phrase.chars().fold(
            FrequencyTable {
                entries: Vec::new(),
                index: HashMap::new(),
            },
            |mut acc, symbol| {
                match acc.index.get(&symbol) {
                    Some(&slot) => acc.entries[slot].1 += 1,
                    None => {
                        acc.index.insert(symbol, acc.entries.len());
                        acc.entries.push((symbol, 1));
                    }
                }
                acc
            },
        );

        debug!(
            distinct = table.len(),
            total = table.total(),
            "computed symbol frequencies"
        );
        for (symbol, count) in table.iter() {
            trace!("  {:?}: {}", symbol, count);
        }

        Ok(table)
    }

    pub fn get(&self, symbol: char) -> Option<usize> {
        self.index.get(&symbol).map(|&slot| self.entries[slot].1)
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of symbol occurrences in the source phrase.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// (symbol, count) pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (char, usize)> + '_ {
        self.entries.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_in_first_seen_order() {
        let table = FrequencyTable::from_phrase("go go gophers").unwrap();
        let entries: Vec<_> = table.iter().collect();
        assert_eq!(
            entries,
            vec![
                ('g', 3),
                ('o', 3),
                (' ', 2),
                ('p', 1),
                ('h', 1),
                ('e', 1),
                ('r', 1),
                ('s', 1),
            ]
        );
        assert_eq!(table.len(), 8);
        assert_eq!(table.total(), 13);
        assert_eq!(table.get('g'), Some(3));
        assert_eq!(table.get('z'), None);
    }

    #[test]
    fn test_empty_phrase_rejected() {
        assert_eq!(
            FrequencyTable::from_phrase(""),
            Err(HuffmanError::EmptyInput)
        );
    }

    #[test]
    fn test_no_normalization() {
        let table = FrequencyTable::from_phrase("aA a\u{e9}e\u{301}").unwrap();
        assert_eq!(table.get('a'), Some(2));
        assert_eq!(table.get('A'), Some(1));
        assert_eq!(table.get(' '), Some(1));
        assert_eq!(table.get('\u{e9}'), Some(1));
        assert_eq!(table.get('e'), Some(1));
        assert_eq!(table.get('\u{301}'), Some(1));
    }

    #[test]
    fn test_deterministic() {
        let a = FrequencyTable::from_phrase("mississippi").unwrap();
        let b = FrequencyTable::from_phrase("mississippi").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.iter().map(|(s, _)| s).collect::<String>(), "misp");
    }
}
