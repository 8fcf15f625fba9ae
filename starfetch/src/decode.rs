//! Turn an accepted payload into catalog text.

use std::io::Read;
use std::string::FromUtf8Error;

use flate2::read::MultiGzDecoder;
use log::{debug, warn};
use thiserror::Error;

use crate::fetch::RawResponse;
use crate::source::Compression;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Payload is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),

    #[error("Payload decoded to empty text")]
    Empty,
}

/// Decompress (when the source says it may be gzipped) and decode as UTF-8.
///
/// A gzip failure is not fatal: mirrors sometimes serve the `.gz` name with
/// plain content, so the raw bytes are decoded as-is instead.
pub fn decode(raw: RawResponse) -> Result<String, DecodeError> {
    let RawResponse { source, bytes } = raw;

    let bytes = match source.compression {
        Compression::None => bytes,
        Compression::GzipMaybe => match gunzip(&bytes) {
            Ok(inflated) => {
                debug!(
                    "Decompressed {} -> {} bytes from {}",
                    bytes.len(),
                    inflated.len(),
                    source
                );
                inflated
            }
            Err(e) => {
                warn!("Not gzip data from {source} ({e}), decoding as plain text");
                bytes
            }
        },
    };

    let text = String::from_utf8(bytes)?;
    if text.is_empty() {
        return Err(DecodeError::Empty);
    }
    Ok(text)
}

fn gunzip(bytes: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut inflated = Vec::new();
    MultiGzDecoder::new(bytes).read_to_end(&mut inflated)?;
    Ok(inflated)
}
