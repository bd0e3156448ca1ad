//! Error types for ntstream-common.

use thiserror::Error;

/// Common error type for ntstream operations.
#[derive(Debug, Error)]
pub enum Error {
    /// End of buffer reached while reading.
    #[error("unexpected end of buffer: needed {needed} bytes but only {available} available")]
    UnexpectedEof { needed: usize, available: usize },

    /// A length does not fit the 32-bit field it is written to.
    #[error("length {0} does not fit in a 32-bit field")]
    LengthOverflow(usize),

    /// UTF-8 decoding error.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
