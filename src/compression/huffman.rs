//! Static Huffman codec.
//!
//! One pass per message: count byte frequencies, build the tree, assign
//! codes, then pack the codes and the encoded input into a self-describing
//! blob. Decompression reads the codes back from the blob, rebuilds an
//! equivalent tree and walks the bitstream through it.
//!
//! # Example
//!
//! ```
//! use static_huffman::compression::huffman::{compress, decompress};
//!
//! let blob = compress(b"aabbbcc").unwrap();
//! assert_eq!(decompress(&blob).unwrap(), b"aabbbcc");
//! ```

use std::io::{Read, Write};

use log::{debug, trace};

use crate::compression::codebook::{build_codebook, Codebook};
use crate::compression::frequency::{FrequencyTable, PARALLEL_THRESHOLD};
use crate::compression::packer::pack;
use crate::compression::reconstruct::{Blob, DecodeTree};
use crate::compression::tree::build_huffman_tree;
use crate::compression::unpacker::unpack;
use crate::compression::{Compression, Result};

/// Count the bytes of `input`, on the rayon pool for large inputs.
pub fn frequency_table(input: &[u8]) -> FrequencyTable {
    if input.len() >= PARALLEL_THRESHOLD {
        FrequencyTable::from_bytes_parallel(input)
    } else {
        FrequencyTable::from_bytes(input)
    }
}

/// The codebook [`compress`] uses for `input`. Empty input gives an empty codebook.
///
/// ```
/// use static_huffman::compression::huffman::codebook_for;
///
/// let codebook = codebook_for(b"aabbbcc").unwrap();
/// for (symbol, code) in codebook.iter() {
///     println!("'{}': {}", symbol as char, code);
/// }
/// assert_eq!(codebook.get(b'b').unwrap().len(), 1);
/// ```
pub fn codebook_for(input: &[u8]) -> Result<Codebook> {
    match build_huffman_tree(&frequency_table(input)) {
        Some(tree) => build_codebook(&tree),
        None => Ok(Codebook::default()),
    }
}

/// Compress `input` into a blob.
pub fn compress(input: &[u8]) -> Result<Vec<u8>> {
    let codebook = codebook_for(input)?;
    for (symbol, code) in codebook.iter() {
        trace!("{:#04x} -> {}", symbol, code);
    }
    let blob = pack(&codebook, input)?;
    debug!(
        "compressed {} bytes ({} distinct) into {} bytes",
        input.len(),
        codebook.len(),
        blob.len()
    );
    Ok(blob)
}

/// Decompress a blob produced by [`compress`].
///
/// Fails with [`crate::Error::Format`] if the blob is truncated or malformed.
pub fn decompress(blob: &[u8]) -> Result<Vec<u8>> {
    let parsed = Blob::parse(blob)?;
    let tree = DecodeTree::from_codebook(&parsed.codebook)?;
    let output = unpack(&tree, parsed.data, parsed.padding)?;
    debug!(
        "decompressed {} bytes ({} distinct, {} padding bits) into {} bytes",
        blob.len(),
        parsed.codebook.len(),
        parsed.padding,
        output.len()
    );
    Ok(output)
}

/// Read all of `reader`, compress it, and write the blob to `writer`.
///
/// The writer is flushed before returning. Returns the blob size.
pub fn compress_stream<R: Read, W: Write>(mut reader: R, mut writer: W) -> Result<usize> {
    let mut input = Vec::new();
    reader.read_to_end(&mut input)?;
    let blob = compress(&input)?;
    writer.write_all(&blob)?;
    writer.flush()?;
    Ok(blob.len())
}

/// Read a whole blob from `reader`, decompress it, and write the bytes to `writer`.
///
/// The writer is flushed before returning. Returns the decompressed size.
pub fn decompress_stream<R: Read, W: Write>(mut reader: R, mut writer: W) -> Result<usize> {
    let mut blob = Vec::new();
    reader.read_to_end(&mut blob)?;
    let output = decompress(&blob)?;
    writer.write_all(&output)?;
    writer.flush()?;
    Ok(output.len())
}

/// [`Compression`] implementation backed by [`compress`] and [`decompress`].
#[derive(Debug, Clone, Copy, Default)]
pub struct HuffmanCodec;

impl Compression for HuffmanCodec {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>> {
        compress(data)
    }

    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>> {
        decompress(data)
    }
}
