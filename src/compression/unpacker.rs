//! Decompression path, second half: walk the packed bits through the
//! rebuilt tree.

use bitvec::prelude::*;
use log::warn;

use crate::compression::reconstruct::DecodeTree;
use crate::error::{Error, Result};

/// Decode `data` (MSB-first bits, the last `padding` of them filler) with `tree`.
///
/// Fails with [`Error::Format`] if `padding` is above 7 or larger than the
/// bitstream, if a bit leads to a child no code defines, or if the stream
/// ends partway through a code.
pub fn unpack(tree: &DecodeTree, data: &[u8], padding: u32) -> Result<Vec<u8>> {
    if padding > 7 {
        return Err(Error::Format(format!(
            "padding bit count {} outside 0..=7",
            padding
        )));
    }
    let bits = data.view_bits::<Msb0>();
    let len = bits
        .len()
        .checked_sub(padding as usize)
        .ok_or_else(|| {
            Error::Format(format!(
                "padding of {} bits with only {} data bits",
                padding,
                bits.len()
            ))
        })?;
    if tree.is_empty() && len > 0 {
        return Err(Error::format("bitstream present but the codebook is empty"));
    }

    let mut output = Vec::with_capacity(data.len());
    let mut node = tree.root();
    for (pos, bit) in bits[..len].iter().by_vals().enumerate() {
        node = match tree.step(node, bit) {
            Some(next) => next,
            None => {
                warn!("bit {} of {} follows no code", pos, len);
                return Err(Error::Format(format!(
                    "bit {} does not continue any code",
                    pos
                )));
            }
        };
        if let Some(symbol) = tree.symbol(node) {
            output.push(symbol);
            node = tree.root();
        }
    }

    if node != tree.root() {
        warn!(
            "bitstream of {} bits ends inside a code after {} symbols",
            len,
            output.len()
        );
        return Err(Error::format("bitstream ends in the middle of a code"));
    }
    Ok(output)
}
