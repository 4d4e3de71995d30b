//! Decompression path, first half: parse the blob header and rebuild a
//! decoding tree from the stored codes.
//!
//! The tree is an index arena. Each stored code is inserted as a path from
//! the root, creating branch nodes on demand and ending in a leaf, so the
//! result has the same prefix structure as the encoder's tree.

use crate::compression::codebook::{Code, Codebook, MAX_CODE_LENGTH};
use crate::compression::packer::ENTRY_LEN;
use crate::compression::wire::{read_trailing_u32, ByteReader, U32_LEN};
use crate::error::{Error, Result};

/// Most entries a header can hold: one per byte value.
pub const MAX_SYMBOLS: usize = 256;

/// A blob split into its three sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob<'a> {
    /// Codes read from the header.
    pub codebook: Codebook,
    /// Packed code bits, trailer excluded.
    pub data: &'a [u8],
    /// Value of the trailing padding field, not yet range-checked.
    pub padding: u32,
}

impl<'a> Blob<'a> {
    /// Parse the header and locate the data and trailer.
    ///
    /// Fails with [`Error::Format`] on a truncated header, a count above
    /// [`MAX_SYMBOLS`], a repeated symbol, or a code length/value the header
    /// cannot legally hold.
    pub fn parse(blob: &'a [u8]) -> Result<Self> {
        let mut reader = ByteReader::new(blob);
        let count = reader.read_u32("symbol count")? as usize;
        if count > MAX_SYMBOLS {
            return Err(Error::Format(format!(
                "symbol count {} exceeds {}",
                count, MAX_SYMBOLS
            )));
        }
        if reader.remaining() < count * ENTRY_LEN {
            return Err(Error::Format(format!(
                "header declares {} symbols ({} bytes) but only {} bytes follow",
                count,
                count * ENTRY_LEN,
                reader.remaining()
            )));
        }

        let mut codebook = Codebook::default();
        for _ in 0..count {
            let symbol = reader.read_u8("symbol")?;
            let length = reader.read_u32("code length")? as usize;
            let value = reader.read_u32("code value")?;
            if length == 0 || length > MAX_CODE_LENGTH {
                return Err(Error::Format(format!(
                    "code length {} for byte {:#04x} outside 1..={}",
                    length, symbol, MAX_CODE_LENGTH
                )));
            }
            let code = Code::new(value, length).ok_or_else(|| {
                Error::Format(format!(
                    "code value {:#x} for byte {:#04x} does not fit in {} bits",
                    value, symbol, length
                ))
            })?;
            if codebook.get(symbol).is_some() {
                return Err(Error::Format(format!(
                    "byte {:#04x} listed twice in header",
                    symbol
                )));
            }
            codebook.insert(symbol, code);
        }

        let body = &blob[reader.position()..];
        let padding = read_trailing_u32(body, "padding bit count")?;
        Ok(Blob {
            codebook,
            data: &body[..body.len() - U32_LEN],
            padding,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecodeNode {
    /// Children indexed by bit value; `None` until a code passes through.
    Branch([Option<usize>; 2]),
    Leaf(u8),
}

/// Decoding tree rebuilt from a codebook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeTree {
    nodes: Vec<DecodeNode>,
}

impl DecodeTree {
    const ROOT: usize = 0;

    /// Insert every code of `codebook` as a root-to-leaf path.
    ///
    /// Fails with [`Error::Format`] if one code is a prefix of another or two
    /// symbols share a code.
    pub fn from_codebook(codebook: &Codebook) -> Result<Self> {
        let mut tree = DecodeTree {
            nodes: vec![DecodeNode::Branch([None, None])],
        };
        for (symbol, code) in codebook.iter() {
            tree.insert(symbol, code)?;
        }
        Ok(tree)
    }

    fn insert(&mut self, symbol: u8, code: Code) -> Result<()> {
        let last = code.len() - 1;
        let mut current = Self::ROOT;
        for (i, bit) in code.iter().enumerate() {
            let children = match self.nodes[current] {
                DecodeNode::Branch(children) => children,
                DecodeNode::Leaf(other) => {
                    return Err(Error::Format(format!(
                        "code {} for byte {:#04x} extends the code of byte {:#04x}",
                        code, symbol, other
                    )))
                }
            };
            let slot = bit as usize;
            current = match children[slot] {
                Some(next) if i < last => next,
                Some(_) => {
                    return Err(Error::Format(format!(
                        "code {} for byte {:#04x} collides with another code",
                        code, symbol
                    )))
                }
                None => {
                    let next = self.nodes.len();
                    self.nodes.push(if i == last {
                        DecodeNode::Leaf(symbol)
                    } else {
                        DecodeNode::Branch([None, None])
                    });
                    if let DecodeNode::Branch(children) = &mut self.nodes[current] {
                        children[slot] = Some(next);
                    }
                    next
                }
            };
        }
        Ok(())
    }

    pub fn root(&self) -> usize {
        Self::ROOT
    }

    /// True when no code was inserted.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Follow the edge for `bit` out of `node`, if a code defines it.
    pub fn step(&self, node: usize, bit: bool) -> Option<usize> {
        match self.nodes.get(node)? {
            DecodeNode::Branch(children) => children[bit as usize],
            DecodeNode::Leaf(_) => None,
        }
    }

    /// The symbol at `node` if it is a leaf.
    pub fn symbol(&self, node: usize) -> Option<u8> {
        match self.nodes.get(node)? {
            DecodeNode::Leaf(symbol) => Some(*symbol),
            DecodeNode::Branch(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(bits: u32, length: usize) -> Code {
        Code::new(bits, length).unwrap()
    }

    fn walk(tree: &DecodeTree, bits: &[bool]) -> Option<u8> {
        let mut node = tree.root();
        for &bit in bits {
            node = tree.step(node, bit)?;
        }
        tree.symbol(node)
    }

    #[test]
    fn test_parse_concrete_blob() {
        #[rustfmt::skip]
        let blob = [
            0, 0, 0, 3,
            b'a', 0, 0, 0, 2, 0, 0, 0, 2,
            b'b', 0, 0, 0, 1, 0, 0, 0, 0,
            b'c', 0, 0, 0, 2, 0, 0, 0, 3,
            0xA1, 0xE0,
            0, 0, 0, 5,
        ];
        let parsed = Blob::parse(&blob).unwrap();
        assert_eq!(parsed.codebook.len(), 3);
        assert_eq!(parsed.codebook.get(b'a'), Some(code(0b10, 2)));
        assert_eq!(parsed.codebook.get(b'b'), Some(code(0b0, 1)));
        assert_eq!(parsed.codebook.get(b'c'), Some(code(0b11, 2)));
        assert_eq!(parsed.data, &[0xA1, 0xE0]);
        assert_eq!(parsed.padding, 5);
    }

    #[test]
    fn test_parse_empty_blob() {
        let parsed = Blob::parse(&[0, 0, 0, 0, 0, 0, 0, 0]).unwrap();
        assert!(parsed.codebook.is_empty());
        assert!(parsed.data.is_empty());
        assert_eq!(parsed.padding, 0);
    }

    #[test]
    fn test_declared_count_exceeds_bytes() {
        let blob = [0, 0, 0, 2, b'a', 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0];
        assert!(matches!(Blob::parse(&blob), Err(Error::Format(_))));
    }

    #[test]
    fn test_count_above_alphabet() {
        let mut blob = vec![0, 0, 1, 1];
        blob.resize(4 + 257 * ENTRY_LEN + 4, 0);
        assert!(matches!(Blob::parse(&blob), Err(Error::Format(_))));
    }

    #[test]
    fn test_bad_code_lengths() {
        // length 0
        let zero = [0, 0, 0, 1, b'a', 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        assert!(matches!(Blob::parse(&zero), Err(Error::Format(_))));
        // length 33
        let long = [0, 0, 0, 1, b'a', 0, 0, 0, 33, 0, 0, 0, 0, 0, 0, 0, 0];
        assert!(matches!(Blob::parse(&long), Err(Error::Format(_))));
        // value 0b100 in a 2-bit code
        let wide = [0, 0, 0, 1, b'a', 0, 0, 0, 2, 0, 0, 0, 4, 0, 0, 0, 0];
        assert!(matches!(Blob::parse(&wide), Err(Error::Format(_))));
    }

    #[test]
    fn test_duplicate_symbol() {
        #[rustfmt::skip]
        let blob = [
            0, 0, 0, 2,
            b'a', 0, 0, 0, 1, 0, 0, 0, 0,
            b'a', 0, 0, 0, 1, 0, 0, 0, 1,
            0, 0, 0, 0,
        ];
        assert!(matches!(Blob::parse(&blob), Err(Error::Format(_))));
    }

    #[test]
    fn test_missing_trailer() {
        let blob = [0, 0, 0, 1, b'a', 0, 0, 0, 1, 0, 0, 0, 0, 0, 0];
        assert!(matches!(Blob::parse(&blob), Err(Error::Format(_))));
    }

    #[test]
    fn test_tree_matches_codes() {
        let codebook: Codebook = [
            (b'a', code(0b10, 2)),
            (b'b', code(0b0, 1)),
            (b'c', code(0b11, 2)),
        ]
        .into_iter()
        .collect();
        let tree = DecodeTree::from_codebook(&codebook).unwrap();
        assert_eq!(walk(&tree, &[true, false]), Some(b'a'));
        assert_eq!(walk(&tree, &[false]), Some(b'b'));
        assert_eq!(walk(&tree, &[true, true]), Some(b'c'));
        assert_eq!(walk(&tree, &[true]), None);
        assert!(!tree.is_empty());
    }

    #[test]
    fn test_single_code_tree() {
        let codebook: Codebook = [(b'z', code(0, 1))].into_iter().collect();
        let tree = DecodeTree::from_codebook(&codebook).unwrap();
        assert_eq!(walk(&tree, &[false]), Some(b'z'));
        assert!(tree.step(tree.root(), true).is_none());
    }

    #[test]
    fn test_prefix_conflicts_rejected() {
        // Short code inserted first, longer one runs into its leaf.
        let short_first: Codebook = [(b'a', code(0b0, 1)), (b'b', code(0b01, 2))]
            .into_iter()
            .collect();
        assert!(matches!(
            DecodeTree::from_codebook(&short_first),
            Err(Error::Format(_))
        ));
        // Long code inserted first, shorter one ends on its branch.
        let long_first: Codebook = [(b'a', code(0b01, 2)), (b'b', code(0b0, 1))]
            .into_iter()
            .collect();
        assert!(matches!(
            DecodeTree::from_codebook(&long_first),
            Err(Error::Format(_))
        ));
        // Same code twice.
        let same: Codebook = [(b'a', code(0b1, 1)), (b'b', code(0b1, 1))]
            .into_iter()
            .collect();
        assert!(matches!(
            DecodeTree::from_codebook(&same),
            Err(Error::Format(_))
        ));
    }

    #[test]
    fn test_empty_codebook_tree() {
        let tree = DecodeTree::from_codebook(&Codebook::default()).unwrap();
        assert!(tree.is_empty());
        assert!(tree.step(tree.root(), false).is_none());
    }
}
