//! Static Huffman compression.
//!
//! The codec is split into its stages, leaf-first:
//! - [`frequency`]: byte frequency counting
//! - [`tree`]: minimum-weight-merge Huffman tree construction
//! - [`codebook`]: code assignment from tree paths
//! - [`packer`]: header and bitstream serialization
//! - [`reconstruct`]: header parsing and decoding-tree reconstruction
//! - [`unpacker`]: bitstream decoding
//!
//! [`huffman`] ties them together.
//!
//! # Examples
//!
//! ```rust
//! use static_huffman::compression::{Compression, HuffmanCodec};
//!
//! let codec = HuffmanCodec;
//! let blob = codec.compress(b"abracadabra").unwrap();
//! assert_eq!(codec.decompress(&blob).unwrap(), b"abracadabra");
//! ```

pub use crate::error::{Error, Result};

/// Trait for compression algorithms
pub trait Compression {
    /// Compress the input data
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>>;

    /// Decompress the compressed data
    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>>;
}

pub mod codebook;
pub mod frequency;
pub mod huffman;
pub mod packer;
pub mod reconstruct;
pub mod tree;
pub mod unpacker;
mod wire;

pub use codebook::{build_codebook, Code, Codebook, MAX_CODE_LENGTH};
pub use frequency::{FrequencyTable, PARALLEL_THRESHOLD};
pub use huffman::{
    codebook_for, compress, compress_stream, decompress, decompress_stream, HuffmanCodec,
};
pub use packer::{pack, pack_bits, PackedBits};
pub use reconstruct::{Blob, DecodeTree, MAX_SYMBOLS};
pub use tree::{build_huffman_tree, HuffmanNode};
pub use unpacker::unpack;
