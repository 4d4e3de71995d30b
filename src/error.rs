//! Error types shared by every stage of the codec.

use thiserror::Error;

/// Errors produced while compressing or decompressing.
#[derive(Debug, Error)]
pub enum Error {
    /// The byte source could not be read or the sink could not be written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A compressed blob is malformed: truncated header, inconsistent
    /// length fields, conflicting codes, or a bitstream that stops mid-code.
    #[error("malformed blob: {0}")]
    Format(String),

    /// The tree built for this input has a path longer than the blob header
    /// can describe.
    #[error("code length {length} exceeds the maximum of {max_length} bits")]
    CodeTooLong { length: usize, max_length: usize },

    /// The input holds a byte the supplied codebook has no code for.
    #[error("no code for byte {0:#04x}")]
    MissingCode(u8),
}

impl Error {
    /// Shorthand for building an [`Error::Format`].
    pub fn format(msg: impl Into<String>) -> Self {
        Error::Format(msg.into())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
