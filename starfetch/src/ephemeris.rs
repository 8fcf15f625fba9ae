//! Download of the binary JPL ephemeris (`JPLEPH`)
//!
//! Shares the screened [`Fetcher`] with the catalog pipeline but has no
//! decode or extract stage: the first accepted payload is written verbatim.
//! An existing file is never re-downloaded.

use std::path::Path;

use log::{info, warn};

use crate::fetch::{Fetcher, Transport};
use crate::pipeline::{SourceError, SourceFailure};
use crate::source::SourceDescriptor;
use crate::writer::{write_atomic, WriteError};

#[derive(Debug)]
pub enum EphemerisOutcome {
    /// Destination already existed; nothing was fetched.
    AlreadyPresent,
    /// Payload from `uri` was written to the destination.
    Downloaded { uri: String, bytes: usize },
    /// No source produced an acceptable payload; nothing was written.
    Unavailable { failures: Vec<SourceFailure> },
}

/// Fetch the ephemeris into `destination` unless it is already there.
///
/// Sources are tried in order. Only a failure to write the file is an error.
pub fn fetch_ephemeris<T: Transport>(
    fetcher: &Fetcher<T>,
    sources: &[SourceDescriptor],
    destination: &Path,
) -> Result<EphemerisOutcome, WriteError> {
    if destination.exists() {
        info!("{} already exists.", destination.display());
        return Ok(EphemerisOutcome::AlreadyPresent);
    }

    let mut failures = Vec::new();
    for source in sources {
        info!("Downloading ephemeris from {source}...");
        match fetcher.fetch(source) {
            Ok(raw) => {
                write_atomic(destination, &raw.bytes)?;
                info!(
                    "Download successful: {} bytes to {}",
                    raw.bytes.len(),
                    destination.display()
                );
                return Ok(EphemerisOutcome::Downloaded {
                    uri: source.uri.to_string(),
                    bytes: raw.bytes.len(),
                });
            }
            Err(e) => {
                warn!("Failed to download from {source}: {e}");
                failures.push(SourceFailure {
                    source: source.clone(),
                    error: SourceError::Fetch(e),
                });
            }
        }
    }

    warn!("Could not download ephemeris from any source.");
    Ok(EphemerisOutcome::Unavailable { failures })
}
