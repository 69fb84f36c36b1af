//! Percent-encoding over the RFC 3986 unreserved set.
//!
//! Every byte of the UTF-8 text outside `A-Z a-z 0-9 - _ . ~` is written as
//! `%XX` with uppercase hex digits. Multi-byte characters are escaped one
//! byte at a time.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode, utf8_percent_encode};

use crate::error::EncodingError;

/// Bytes that must be escaped: everything except the unreserved set.
const ESCAPED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode `text`, leaving only unreserved characters unescaped.
///
/// # Examples
///
/// ```
/// use mxembed_codec::percent;
///
/// assert_eq!(percent::encode("<a/>"), "%3Ca%2F%3E");
/// assert_eq!(percent::encode(""), "");
/// ```
pub fn encode(text: &str) -> String {
    utf8_percent_encode(text, ESCAPED).to_string()
}

/// Reverse [`encode`].
///
/// Characters that are not part of a `%XX` triple are copied through, so
/// decoding is tolerant of producers that leave extra characters unescaped.
/// Hex digits may be upper or lower case.
///
/// # Errors
///
/// Returns [`EncodingError::MalformedEscape`] when a `%` is not followed by
/// two hex digits and [`EncodingError::InvalidUtf8`] when the unescaped bytes
/// are not UTF-8.
pub fn decode(input: &str) -> Result<String, EncodingError> {
    check_escapes(input)?;
    let decoded = percent_decode(input.as_bytes()).decode_utf8()?;
    Ok(decoded.into_owned())
}

/// `percent_decode` passes malformed escapes through verbatim; reject them up front.
fn check_escapes(input: &str) -> Result<(), EncodingError> {
    let bytes = input.as_bytes();
    let mut offset = 0;

    while offset < bytes.len() {
        if bytes[offset] != b'%' {
            offset += 1;
            continue;
        }

        let well_formed = bytes
            .get(offset + 1..offset + 3)
            .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
        if !well_formed {
            return Err(EncodingError::MalformedEscape { offset });
        }
        offset += 3;
    }

    Ok(())
}
