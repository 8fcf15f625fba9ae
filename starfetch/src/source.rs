//! Candidate mirrors for the catalog and ephemeris downloads.

use std::borrow::Cow;
use std::fmt;

/// How the payload served by a source may be compressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    /// Payload is served as plain text.
    None,
    /// Payload is advertised as gzip, but some mirrors serve it already
    /// decompressed. Decompression failure degrades to a plain decode.
    GzipMaybe,
}

/// One candidate network location for a dataset.
///
/// Lists of descriptors are ordered by priority: earlier entries are tried
/// first and the first acceptable one wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDescriptor {
    pub uri: Cow<'static, str>,
    pub compression: Compression,
}

impl SourceDescriptor {
    /// Descriptor for a compiled-in URI.
    pub const fn new(uri: &'static str, compression: Compression) -> Self {
        Self {
            uri: Cow::Borrowed(uri),
            compression,
        }
    }

    /// Descriptor whose compression is inferred from a `.gz` suffix.
    pub fn infer(uri: impl Into<Cow<'static, str>>) -> Self {
        let uri = uri.into();
        let compression = if uri.ends_with(".gz") {
            Compression::GzipMaybe
        } else {
            Compression::None
        };
        Self { uri, compression }
    }
}

impl fmt::Display for SourceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri)
    }
}

/// HYG v3 mirrors, highest priority first.
pub const HYG_SOURCES: &[SourceDescriptor] = &[
    SourceDescriptor::new(
        "https://raw.githubusercontent.com/johanley/star-catalog/master/hygdata_v3.csv",
        Compression::None,
    ),
    SourceDescriptor::new(
        "https://raw.githubusercontent.com/astronexus/HYG-Database/main/hygdata_v3.csv.gz",
        Compression::GzipMaybe,
    ),
    SourceDescriptor::new(
        "https://raw.githubusercontent.com/astronexus/HYG-Database/master/hygdata_v3.csv.gz",
        Compression::GzipMaybe,
    ),
    SourceDescriptor::new(
        "https://raw.githubusercontent.com/astronexus/HYG-Database/main/hygdata_v3.csv",
        Compression::None,
    ),
    SourceDescriptor::new(
        "https://raw.githubusercontent.com/astronexus/HYG-Database/master/hygdata_v3.csv",
        Compression::None,
    ),
];

/// DE405 binary ephemeris mirrors (SuperNOVAS test data).
pub const EPHEMERIS_SOURCES: &[SourceDescriptor] = &[SourceDescriptor::new(
    "https://raw.githubusercontent.com/Smithsonian/SuperNOVAS/main/tests/data/JPLEPH",
    Compression::None,
)];
