//! Byte frequency counting.
//!
//! The table iterates symbols in ascending byte order. Everything downstream
//! (the tree builder's tie-break and the header entry order) relies on that.

use rayon::prelude::*;

/// Inputs at least this large are counted on the rayon pool by
/// [`crate::compression::compress`].
pub const PARALLEL_THRESHOLD: usize = 1 << 20;

const CHUNK_SIZE: usize = 1 << 16;

/// Occurrence count of every byte value in an input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [usize; 256],
}

impl Default for FrequencyTable {
    fn default() -> Self {
        FrequencyTable { counts: [0; 256] }
    }
}

impl FrequencyTable {
    /// Count every byte of `data`.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut table = FrequencyTable::default();
        for &b in data {
            table.counts[b as usize] += 1;
        }
        table
    }

    /// Count `data` in chunks on the rayon pool.
    ///
    /// Partial tables are merged with [`FrequencyTable::merge`], a plain
    /// per-symbol sum, so the result equals [`FrequencyTable::from_bytes`]
    /// no matter how the chunks are scheduled.
    pub fn from_bytes_parallel(data: &[u8]) -> Self {
        data.par_chunks(CHUNK_SIZE)
            .map(FrequencyTable::from_bytes)
            .reduce(FrequencyTable::default, FrequencyTable::merge)
    }

    /// Sum two tables.
    pub fn merge(mut self, other: FrequencyTable) -> Self {
        for (mine, theirs) in self.counts.iter_mut().zip(other.counts.iter()) {
            *mine += theirs;
        }
        self
    }

    /// Count for `symbol` (0 if absent).
    pub fn get(&self, symbol: u8) -> usize {
        self.counts[symbol as usize]
    }

    /// Number of distinct symbols present.
    pub fn len(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Present symbols and their counts, ascending by symbol.
    pub fn iter(&self) -> impl Iterator<Item = (u8, usize)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c > 0)
            .map(|(b, &c)| (b as u8, c))
    }

    /// Total number of counted bytes.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}
