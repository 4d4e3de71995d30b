//! Fixed-width big-endian field encoding for the blob format.

use crate::error::{Error, Result};

/// Size in bytes of every integer field in the blob.
pub const U32_LEN: usize = 4;

pub(crate) fn put_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_be_bytes());
}

/// Reads fields front to back from a borrowed blob.
/// Running past the end is a format error naming the field being read.
#[derive(Debug)]
pub(crate) struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        ByteReader { data, pos: 0 }
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn take(&mut self, n: usize, field: &str) -> Result<&'a [u8]> {
        if self.remaining() < n {
            return Err(Error::Format(format!(
                "truncated {} at offset {}: need {} bytes, {} left",
                field,
                self.pos,
                n,
                self.remaining()
            )));
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    pub(crate) fn read_u8(&mut self, field: &str) -> Result<u8> {
        Ok(self.take(1, field)?[0])
    }

    pub(crate) fn read_u32(&mut self, field: &str) -> Result<u32> {
        let mut buf = [0u8; U32_LEN];
        buf.copy_from_slice(self.take(U32_LEN, field)?);
        Ok(u32::from_be_bytes(buf))
    }
}

/// Reads the trailing big-endian `u32` of `data`.
pub(crate) fn read_trailing_u32(data: &[u8], field: &str) -> Result<u32> {
    let start = data.len().checked_sub(U32_LEN).ok_or_else(|| {
        Error::Format(format!(
            "truncated {}: blob is only {} bytes",
            field,
            data.len()
        ))
    })?;
    ByteReader::new(&data[start..]).read_u32(field)
}
