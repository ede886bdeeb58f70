//! Transport decompression for OTLP request bodies.

use std::io::Read;

use flate2::read::GzDecoder;

use crate::error::RelayError;

/// Decompress a request body according to its `Content-Encoding` label.
///
/// Recognized labels are `gzip` and `zstd`. Any other label, including the
/// empty string, passes the bytes through unchanged; unknown encodings are
/// ignored, not rejected.
pub fn decompress(body: &[u8], content_encoding: &str) -> Result<Vec<u8>, RelayError> {
    match content_encoding {
        "gzip" => {
            let mut decoded = Vec::new();
            GzDecoder::new(body)
                .read_to_end(&mut decoded)
                .map_err(RelayError::Decompress)?;
            Ok(decoded)
        }
        "zstd" => zstd::stream::decode_all(body).map_err(RelayError::Decompress),
        _ => Ok(body.to_vec()),
    }
}
