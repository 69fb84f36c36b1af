//! Compressed diagram token codec.
//!
//! draw.io stores each page of a diagram as a "compressed diagram" token:
//! the page XML is percent-encoded, deflated without zlib framing, and
//! base64-encoded. This crate provides each stage separately and the
//! composed codec:
//!
//! - **Percent**: unreserved-set percent-encoding ([`percent`] module)
//! - **Deflate**: raw DEFLATE without header or checksum ([`deflate`] module)
//! - **Token**: the composed [`tokenize`] / [`detokenize`] pair ([`token`] module)
//!
//! # Example
//!
//! ```
//! use mxembed_codec::{detokenize, tokenize};
//!
//! let token = tokenize("<mxGraphModel/>");
//! assert_eq!(detokenize(token.as_str()).unwrap(), "<mxGraphModel/>");
//! ```

pub mod deflate;
pub mod error;
pub mod percent;
pub mod token;

pub use error::{DecompressionError, EncodingError, InvalidTokenError, RoundTripError};
pub use token::{DiagramToken, detokenize, tokenize, tokenize_with_level, verify_round_trip};
