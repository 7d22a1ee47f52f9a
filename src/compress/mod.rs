//! Compressed-size computation.
//!
//! Bundle sizes on their own overstate delivered cost; what reaches the
//! browser is a gzip- or brotli-encoded response body. These helpers
//! compress a byte span into an in-memory buffer and report the encoded
//! length. Both are synchronous and deterministic for a given input.

use std::io::{self, Write};

use brotli::enc::BrotliEncoderParams;
use flate2::write::GzEncoder;
use flate2::Compression;

/// Brotli quality used for size estimates. Matches the encoder setting CDNs
/// commonly serve static assets with.
const BROTLI_QUALITY: i32 = 11;

/// Returns the gzip-compressed length of `bytes` at the default level.
///
/// # Example
///
/// ```
/// use lassoscope::compress::gzip_size;
///
/// let size = gzip_size(b"aaaaaaaaaaaaaaaaaaaaaaaa").unwrap();
/// assert!(size > 0);
/// ```
pub fn gzip_size(bytes: &[u8]) -> io::Result<usize> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes)?;
    Ok(encoder.finish()?.len())
}

/// Returns the brotli-compressed length of `bytes`.
pub fn brotli_size(bytes: &[u8]) -> io::Result<usize> {
    let mut params = BrotliEncoderParams::default();
    params.quality = BROTLI_QUALITY;

    let mut input = bytes;
    let mut encoded = Vec::new();
    brotli::BrotliCompress(&mut input, &mut encoded, &params)?;
    Ok(encoded.len())
}
