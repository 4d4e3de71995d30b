//! Compression path: serializes a codebook and the encoded input into a blob.
//!
//! Layout (every integer is a big-endian `u32`):
//!
//! ```text
//! [symbol count]
//! count x ([symbol: u8] [code length] [code value])
//! [packed code bits, MSB first]
//! [padding bit count]
//! ```

use bitvec::prelude::*;

use crate::compression::codebook::Codebook;
use crate::compression::wire::{put_u32, U32_LEN};
use crate::error::{Error, Result};

/// Bytes taken by one header entry: symbol, code length, code value.
pub const ENTRY_LEN: usize = 1 + 2 * U32_LEN;

/// The encoded bitstream, byte-aligned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedBits {
    /// Code bits MSB-first, the last byte zero-padded.
    pub bytes: Vec<u8>,
    /// Number of zero bits appended to the last byte (0..=7).
    pub padding: u8,
}

/// Write the symbol count and one entry per symbol, ascending by symbol.
pub fn write_header(codebook: &Codebook, out: &mut Vec<u8>) {
    put_u32(out, codebook.len() as u32);
    for (symbol, code) in codebook.iter() {
        out.push(symbol);
        put_u32(out, code.len() as u32);
        put_u32(out, code.bits());
    }
}

/// Concatenate the code of every input byte and pack the bits into bytes.
pub fn pack_bits(codebook: &Codebook, input: &[u8]) -> Result<PackedBits> {
    let mut bits: BitVec<u8, Msb0> = BitVec::with_capacity(input.len() * 2);
    for &b in input {
        let code = codebook.get(b).ok_or(Error::MissingCode(b))?;
        bits.extend(code.iter());
    }

    let padding = (8 - bits.len() % 8) % 8;
    bits.resize(bits.len() + padding, false);

    Ok(PackedBits {
        bytes: bits.into_vec(),
        padding: padding as u8,
    })
}

/// Build the complete blob for `input` under `codebook`.
///
/// Fails with [`Error::MissingCode`] if `input` holds a byte the codebook
/// does not cover.
pub fn pack(codebook: &Codebook, input: &[u8]) -> Result<Vec<u8>> {
    let packed = pack_bits(codebook, input)?;
    let mut blob =
        Vec::with_capacity(U32_LEN + codebook.len() * ENTRY_LEN + packed.bytes.len() + U32_LEN);
    write_header(codebook, &mut blob);
    blob.extend_from_slice(&packed.bytes);
    put_u32(&mut blob, packed.padding as u32);
    Ok(blob)
}
