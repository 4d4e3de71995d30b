//! Code assignment: walks a Huffman tree and records each leaf's path.

use std::collections::BTreeMap;
use std::fmt;

use crate::compression::tree::HuffmanNode;
use crate::error::{Error, Result};

/// Longest code the blob header can carry (the width of its `codeValue` field).
pub const MAX_CODE_LENGTH: usize = 32;

/// A variable-length bit pattern.
///
/// `bits` holds the pattern right-aligned: the first bit of the code is bit
/// `length - 1` of the integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code {
    bits: u32,
    length: u8,
}

impl Code {
    /// Builds a code, checking `1 <= length <= MAX_CODE_LENGTH` and that no
    /// bit above `length` is set.
    pub fn new(bits: u32, length: usize) -> Option<Self> {
        if length == 0 || length > MAX_CODE_LENGTH {
            return None;
        }
        if length < 32 && bits >> length != 0 {
            return None;
        }
        Some(Code {
            bits,
            length: length as u8,
        })
    }

    pub fn bits(&self) -> u32 {
        self.bits
    }

    pub fn len(&self) -> usize {
        self.length as usize
    }

    /// Always false; a code has at least one bit.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// The code's bits in transmission order, first bit first.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len()).rev().map(move |i| (self.bits >> i) & 1 == 1)
    }

    /// True if `self` is a prefix of `other` (or equal to it).
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.length <= other.length && other.bits >> (other.length - self.length) == self.bits
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Symbol to code mapping, iterated in ascending symbol order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Codebook {
    codes: BTreeMap<u8, Code>,
}

impl Codebook {
    pub fn get(&self, symbol: u8) -> Option<Code> {
        self.codes.get(&symbol).copied()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Entries in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, Code)> + '_ {
        self.codes.iter().map(|(&s, &c)| (s, c))
    }

    /// Total encoded bit count for `data`, or `None` if a byte has no code.
    pub fn encoded_len(&self, data: &[u8]) -> Option<usize> {
        data.iter()
            .try_fold(0usize, |acc, &b| Some(acc + self.codes.get(&b)?.len()))
    }

    /// True when no code is a prefix of another symbol's code.
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<Code> = self.codes.values().copied().collect();
        codes.iter().enumerate().all(|(i, a)| {
            codes
                .iter()
                .enumerate()
                .all(|(j, b)| i == j || !a.is_prefix_of(b))
        })
    }

    pub(crate) fn insert(&mut self, symbol: u8, code: Code) {
        self.codes.insert(symbol, code);
    }
}

impl FromIterator<(u8, Code)> for Codebook {
    fn from_iter<I: IntoIterator<Item = (u8, Code)>>(iter: I) -> Self {
        Codebook {
            codes: iter.into_iter().collect(),
        }
    }
}

/// Recursively build the codebook mapping symbols to their Huffman codes.
///
/// If the tree consists of a single leaf (i.e. one unique symbol), the code "0" is assigned.
/// Fails with [`Error::CodeTooLong`] if a leaf lies deeper than [`MAX_CODE_LENGTH`].
///
/// ```
/// use static_huffman::compression::{build_codebook, build_huffman_tree, FrequencyTable};
///
/// let tree = build_huffman_tree(&FrequencyTable::from_bytes(b"aabbbcc")).unwrap();
/// let codebook = build_codebook(&tree).unwrap();
/// assert_eq!(codebook.get(b'b').unwrap().to_string(), "0");
/// assert_eq!(codebook.get(b'a').unwrap().to_string(), "10");
/// assert_eq!(codebook.get(b'c').unwrap().to_string(), "11");
/// ```
pub fn build_codebook(node: &HuffmanNode) -> Result<Codebook> {
    let mut codebook = Codebook::default();
    match node {
        HuffmanNode::Leaf { symbol, .. } => {
            codebook.insert(*symbol, Code { bits: 0, length: 1 });
        }
        HuffmanNode::Internal { .. } => build_codebook_helper(node, 0, 0, &mut codebook)?,
    }
    Ok(codebook)
}

fn build_codebook_helper(
    node: &HuffmanNode,
    bits: u32,
    depth: usize,
    codebook: &mut Codebook,
) -> Result<()> {
    match node {
        HuffmanNode::Leaf { symbol, .. } => {
            codebook.insert(
                *symbol,
                Code {
                    bits,
                    length: depth as u8,
                },
            );
            Ok(())
        }
        HuffmanNode::Internal { left, right, .. } => {
            if depth == MAX_CODE_LENGTH {
                return Err(Error::CodeTooLong {
                    length: node.depth() + depth,
                    max_length: MAX_CODE_LENGTH,
                });
            }
            build_codebook_helper(left, bits << 1, depth + 1, codebook)?;
            build_codebook_helper(right, (bits << 1) | 1, depth + 1, codebook)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compression::frequency::FrequencyTable;
    use crate::compression::tree::build_huffman_tree;

    fn codebook_for(input: &[u8]) -> Codebook {
        let tree = build_huffman_tree(&FrequencyTable::from_bytes(input)).unwrap();
        build_codebook(&tree).unwrap()
    }

    #[test]
    fn test_huffman_tree_and_codebook() {
        let input = b"this is an example for huffman encoding";
        let codebook = codebook_for(input);
        // Each symbol in input must have a code.
        for &b in input.iter() {
            assert!(codebook.get(b).is_some(), "Missing code for '{}'", b as char);
        }
        assert_eq!(codebook.len(), FrequencyTable::from_bytes(input).len());
        assert!(codebook.is_prefix_free());
    }

    #[test]
    fn test_single_symbol_gets_one_bit() {
        let codebook = codebook_for(b"aaaa");
        let code = codebook.get(b'a').unwrap();
        assert_eq!(code.len(), 1);
        assert_eq!(code.bits(), 0);
        assert_eq!(code.to_string(), "0");
    }

    #[test]
    fn test_most_frequent_symbol_is_shortest() {
        let codebook = codebook_for(b"aabbbcc");
        let b = codebook.get(b'b').unwrap().len();
        assert!(b < codebook.get(b'a').unwrap().len());
        assert!(b < codebook.get(b'c').unwrap().len());
    }

    #[test]
    fn test_full_alphabet_is_prefix_free() {
        let data: Vec<u8> = (0..=255u8)
            .flat_map(|b| std::iter::repeat(b).take(1 + (b as usize % 7)))
            .collect();
        let codebook = codebook_for(&data);
        assert_eq!(codebook.len(), 256);
        assert!(codebook.is_prefix_free());
        assert_eq!(
            codebook.encoded_len(&data),
            Some(data.iter().map(|&b| codebook.get(b).unwrap().len()).sum())
        );
    }

    #[test]
    fn test_prefix_detection() {
        let zero = Code::new(0b0, 1).unwrap();
        let zero_one = Code::new(0b01, 2).unwrap();
        let one_zero = Code::new(0b10, 2).unwrap();
        assert!(zero.is_prefix_of(&zero_one));
        assert!(!zero.is_prefix_of(&one_zero));
        assert!(!zero_one.is_prefix_of(&zero));

        let bad: Codebook = [(b'x', zero), (b'y', zero_one)].into_iter().collect();
        assert!(!bad.is_prefix_free());
        let good: Codebook = [(b'x', zero), (b'y', one_zero)].into_iter().collect();
        assert!(good.is_prefix_free());
    }

    #[test]
    fn test_code_validation() {
        assert!(Code::new(0, 0).is_none());
        assert!(Code::new(0, MAX_CODE_LENGTH + 1).is_none());
        assert!(Code::new(0b100, 2).is_none());
        assert!(Code::new(u32::MAX, 32).is_some());
        assert_eq!(Code::new(0b0110, 4).unwrap().to_string(), "0110");
    }

    #[test]
    fn test_too_deep_tree_is_rejected() {
        // A left-leaning chain with 34 leaves puts the deepest leaves at depth 33.
        let mut node = Box::new(HuffmanNode::Leaf { symbol: 0, weight: 1 });
        for symbol in 1..34u8 {
            node = Box::new(HuffmanNode::Internal {
                weight: 0,
                left: node,
                right: Box::new(HuffmanNode::Leaf { symbol, weight: 1 }),
            });
        }
        match build_codebook(&node) {
            Err(Error::CodeTooLong { length, max_length }) => {
                assert_eq!(length, 33);
                assert_eq!(max_length, MAX_CODE_LENGTH);
            }
            other => panic!("expected CodeTooLong, got {other:?}"),
        }
    }
}
