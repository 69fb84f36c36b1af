//! Raw DEFLATE compression.
//!
//! draw.io tokens carry the bare DEFLATE bitstream: no two-byte zlib header
//! and no four-byte Adler-32 trailer. Compression runs the regular zlib
//! encoder and slices the framing off; decompression feeds the bitstream to
//! an inflater configured without a zlib header.

use std::io::Write;

use flate2::{Compression, Decompress, FlushDecompress, Status, write::ZlibEncoder};
use log::trace;

use crate::error::DecompressionError;

/// Compression level used by [`compress_raw`].
pub const BEST_LEVEL: u32 = 9;

const ZLIB_HEADER_LEN: usize = 2;
const ZLIB_TRAILER_LEN: usize = 4;

/// Compress `bytes` at [`BEST_LEVEL`] and strip the zlib framing.
pub fn compress_raw(bytes: &[u8]) -> Vec<u8> {
    compress_raw_with_level(bytes, BEST_LEVEL)
}

/// Compress `bytes` at `level` (clamped to `0..=9`) and strip the zlib framing.
///
/// The level only changes the size of the output; any level decompresses
/// with [`decompress_raw`].
pub fn compress_raw_with_level(bytes: &[u8], level: u32) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::new(level.min(BEST_LEVEL)));
    encoder
        .write_all(bytes)
        .expect("Writing to a Vec<u8> is infallible");
    let framed = encoder
        .finish()
        .expect("Writing to a Vec<u8> is infallible");

    // A zlib stream always holds the header, at least one block and the trailer.
    let raw = framed[ZLIB_HEADER_LEN..framed.len() - ZLIB_TRAILER_LEN].to_vec();
    trace!(input_len = bytes.len(), output_len = raw.len(), level; "Compressed raw deflate");
    raw
}

/// Inflate a raw DEFLATE bitstream.
///
/// Decoding stops at the end of the final block; bytes after it are ignored.
///
/// # Errors
///
/// Returns [`DecompressionError::Corrupt`] for an invalid bitstream and
/// [`DecompressionError::Truncated`] when the input runs out before the
/// final block ends (this includes empty input).
pub fn decompress_raw(compressed: &[u8]) -> Result<Vec<u8>, DecompressionError> {
    let mut inflater = Decompress::new(false);
    let mut output = Vec::with_capacity(compressed.len().saturating_mul(4).max(64));

    loop {
        if output.len() == output.capacity() {
            output.reserve(output.capacity());
        }

        let consumed = inflater.total_in() as usize;
        let produced = inflater.total_out();
        let status =
            inflater.decompress_vec(&compressed[consumed..], &mut output, FlushDecompress::None)?;

        match status {
            Status::StreamEnd => break,
            Status::Ok | Status::BufError => {
                let progressed =
                    inflater.total_in() as usize != consumed || inflater.total_out() != produced;
                if !progressed {
                    return Err(DecompressionError::Truncated {
                        consumed: inflater.total_in() as usize,
                    });
                }
            }
        }
    }

    trace!(input_len = compressed.len(), output_len = output.len(); "Inflated raw deflate");
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let data = b"<mxGraphModel><root><mxCell id=\"0\"/></root></mxGraphModel>";
        let compressed = compress_raw(data);
        assert_eq!(decompress_raw(&compressed).unwrap(), data);
    }

    #[test]
    fn test_empty_input_round_trip() {
        let compressed = compress_raw(&[]);
        assert!(!compressed.is_empty());
        assert_eq!(decompress_raw(&compressed).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_output_has_no_zlib_header() {
        // A zlib header at the best level starts with 0x78 0xDA.
        let compressed = compress_raw(b"hello hello hello hello");
        assert_ne!(&compressed[..2], &[0x78, 0xDA]);
    }

    #[test]
    fn test_every_level_round_trips() {
        let data = "abcabcabc %3C%2F%3E ".repeat(50);
        for level in 0..=BEST_LEVEL {
            let compressed = compress_raw_with_level(data.as_bytes(), level);
            assert_eq!(
                decompress_raw(&compressed).unwrap(),
                data.as_bytes(),
                "level {level}"
            );
        }
    }

    #[test]
    fn test_out_of_range_level_is_clamped() {
        let compressed = compress_raw_with_level(b"clamped", 42);
        assert_eq!(decompress_raw(&compressed).unwrap(), b"clamped");
    }

    #[test]
    fn test_large_input_grows_output_buffer() {
        let data = vec![b'x'; 1 << 20];
        let compressed = compress_raw(&data);
        assert!(compressed.len() < data.len() / 100);
        assert_eq!(decompress_raw(&compressed).unwrap(), data);
    }

    #[test]
    fn test_empty_stream_is_truncated() {
        let err = decompress_raw(&[]).unwrap_err();
        assert!(matches!(err, DecompressionError::Truncated { consumed: 0 }));
    }

    #[test]
    fn test_truncated_stream_fails() {
        let data: String = (0..2000).map(|i| format!("cell-{i};")).collect();
        let compressed = compress_raw(data.as_bytes());
        let truncated = &compressed[..compressed.len() / 2];
        assert!(decompress_raw(truncated).is_err());
    }

    #[test]
    fn test_garbage_is_corrupt() {
        // BFINAL=1 with the reserved block type 0b11.
        let err = decompress_raw(&[0xFF; 16]).unwrap_err();
        assert!(matches!(err, DecompressionError::Corrupt(_)));
    }
}
