pub mod compression;
pub mod error;

pub use compression::{compress, decompress, Compression, HuffmanCodec};
pub use error::{Error, Result};
