//! The composed diagram token codec.
//!
//! `tokenize` = base64(raw-deflate(percent-encode(xml))) and `detokenize`
//! undoes each stage in reverse order.

use std::fmt;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use log::debug;

use crate::{
    deflate::{self, BEST_LEVEL},
    error::{InvalidTokenError, RoundTripError},
    percent,
};

/// A compressed diagram: standard base64 text with `=` padding.
///
/// Tokens made by [`tokenize`] always decode. Tokens read back from
/// documents enter through [`DiagramToken::from_base64`], which checks only
/// the base64 layer; [`detokenize`] reports any deeper damage.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DiagramToken(String);

impl DiagramToken {
    /// Wrap existing token text, such as a payload read from a document.
    ///
    /// Surrounding ASCII whitespace is trimmed; the remaining text must be
    /// padded standard base64.
    ///
    /// # Errors
    ///
    /// Returns the [`base64::DecodeError`] for text outside the alphabet or
    /// with invalid padding.
    pub fn from_base64(text: &str) -> Result<Self, base64::DecodeError> {
        let text = text.trim_ascii();
        STANDARD.decode(text)?;
        Ok(Self(text.to_string()))
    }

    /// Returns the token text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the token and returns its text.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Length of the token text in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false` for tokens produced by [`tokenize`].
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for DiagramToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DiagramToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Encode diagram XML into a token at the best compression level.
///
/// # Examples
///
/// ```
/// use mxembed_codec::{detokenize, tokenize};
///
/// let token = tokenize("日本語");
/// assert_eq!(detokenize(token.as_str()).unwrap(), "日本語");
/// ```
pub fn tokenize(xml: &str) -> DiagramToken {
    tokenize_with_level(xml, BEST_LEVEL)
}

/// Encode diagram XML into a token at the given compression `level` (`0..=9`).
pub fn tokenize_with_level(xml: &str, level: u32) -> DiagramToken {
    let escaped = percent::encode(xml);
    let compressed = deflate::compress_raw_with_level(escaped.as_bytes(), level);
    let token = DiagramToken(STANDARD.encode(compressed));

    debug!(xml_len = xml.len(), escaped_len = escaped.len(), token_len = token.len(); "Tokenized diagram");
    token
}

/// Decode a token back into the diagram XML.
///
/// ASCII whitespace inside the token is skipped, so payloads wrapped across
/// lines decode the same as single-line ones.
///
/// # Errors
///
/// Returns [`InvalidTokenError`] when the token is not base64, the inflated
/// stream is corrupt or truncated, or the decoded text is not UTF-8.
pub fn detokenize(token: &str) -> Result<String, InvalidTokenError> {
    let compact: String = token
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    let compressed = STANDARD.decode(compact.as_bytes())?;
    let inflated = deflate::decompress_raw(&compressed)?;
    let escaped = std::str::from_utf8(&inflated)?;
    let xml = percent::decode(escaped)?;

    debug!(token_len = token.len(), xml_len = xml.len(); "Detokenized diagram");
    Ok(xml)
}

/// Check that `token` decodes back to exactly `xml`.
///
/// # Errors
///
/// Returns [`RoundTripError::Decode`] if the token does not decode and
/// [`RoundTripError::Mismatch`] if it decodes to different text.
pub fn verify_round_trip(xml: &str, token: &DiagramToken) -> Result<(), RoundTripError> {
    let decoded = detokenize(token.as_str())?;
    if decoded != xml {
        return Err(RoundTripError::Mismatch {
            expected: xml.len(),
            actual: decoded.len(),
        });
    }
    Ok(())
}
