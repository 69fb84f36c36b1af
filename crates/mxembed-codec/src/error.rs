//! Error types for the diagram token codec.
//!
//! Each codec stage has its own error type so callers can tell which layer
//! rejected the input. [`InvalidTokenError`] wraps all of them for the
//! composed [`detokenize`](crate::detokenize) pipeline.

use std::str::Utf8Error;

use thiserror::Error;

/// Failure to reverse the percent-encoding stage.
#[derive(Debug, Error)]
pub enum EncodingError {
    /// A `%` was not followed by two hexadecimal digits.
    #[error("malformed percent escape at byte {offset}")]
    MalformedEscape { offset: usize },

    /// The unescaped bytes do not form valid UTF-8.
    #[error("percent-decoded bytes are not valid UTF-8: {0}")]
    InvalidUtf8(#[from] Utf8Error),
}

/// Failure to inflate a raw DEFLATE stream.
#[derive(Debug, Error)]
pub enum DecompressionError {
    /// The bitstream is not valid DEFLATE data.
    #[error("corrupt deflate stream: {0}")]
    Corrupt(#[from] flate2::DecompressError),

    /// The input ended before the final block was complete.
    #[error("deflate stream truncated after {consumed} bytes")]
    Truncated { consumed: usize },
}

/// Failure of any stage while decoding a diagram token.
#[derive(Debug, Error)]
pub enum InvalidTokenError {
    #[error("token is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error(transparent)]
    Decompression(#[from] DecompressionError),

    #[error("inflated payload is not valid UTF-8: {0}")]
    Utf8(#[from] Utf8Error),

    #[error(transparent)]
    Encoding(#[from] EncodingError),
}

/// A freshly produced token did not decode back to its source text.
#[derive(Debug, Error)]
pub enum RoundTripError {
    #[error("token does not decode: {0}")]
    Decode(#[from] InvalidTokenError),

    #[error("decoded text differs from the source ({expected} bytes expected, {actual} decoded)")]
    Mismatch { expected: usize, actual: usize },
}
