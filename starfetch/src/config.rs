//! Run configuration for the catalog and ephemeris pipelines.
//!
//! Every field defaults to the compiled-in behavior; the binaries only
//! override the output path and the zero-record policy.

use std::path::PathBuf;
use std::time::Duration;

use crate::fetch::ContentScreen;
use crate::source::{SourceDescriptor, EPHEMERIS_SOURCES, HYG_SOURCES};

/// Browser-like identification; some mirrors reject default client ids.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

/// Per-attempt transport timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Naked-eye visibility limit used to filter the catalog.
pub const DEFAULT_MAGNITUDE_LIMIT: f64 = 5.0;

/// Smallest payload accepted as a JPL ephemeris.
///
/// Hand-tuned: error-page stand-ins are a few KiB, the DE405 excerpt is
/// several MiB.
pub const MIN_EPHEMERIS_BYTES: usize = 64 * 1024;

/// What to do when a source decodes fine but no row passes the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZeroRecordPolicy {
    /// Write a header-only file; the fetched source still counts as success.
    #[default]
    WriteEmpty,
    /// Discard the empty extraction and write the fallback table.
    UseFallback,
}

/// Settings for one run of the star catalog pipeline.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub sources: Vec<SourceDescriptor>,
    pub output: PathBuf,
    pub user_agent: String,
    pub timeout: Option<Duration>,
    pub magnitude_limit: f64,
    pub screen: ContentScreen,
    pub zero_records: ZeroRecordPolicy,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            sources: HYG_SOURCES.to_vec(),
            output: PathBuf::from("stars.csv"),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Some(DEFAULT_TIMEOUT),
            magnitude_limit: DEFAULT_MAGNITUDE_LIMIT,
            screen: ContentScreen::default(),
            zero_records: ZeroRecordPolicy::default(),
        }
    }
}

/// Settings for the ephemeris download.
#[derive(Debug, Clone)]
pub struct EphemerisConfig {
    pub sources: Vec<SourceDescriptor>,
    pub output: PathBuf,
    pub user_agent: String,
    pub timeout: Option<Duration>,
    pub screen: ContentScreen,
}

impl Default for EphemerisConfig {
    fn default() -> Self {
        Self {
            sources: EPHEMERIS_SOURCES.to_vec(),
            output: PathBuf::from("JPLEPH"),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Some(DEFAULT_TIMEOUT),
            screen: ContentScreen::with_min_size(MIN_EPHEMERIS_BYTES),
        }
    }
}
