//! Star catalog acquisition from untrusted mirrors
//!
//! This crate downloads the HYG star catalog from a prioritized list of
//! mirrors, screens out soft failures (HTML error pages, truncated payloads),
//! normalizes the surviving rows into a fixed `name,ra,dec` schema and writes
//! them sorted by magnitude. When no mirror yields usable text an embedded
//! table of bright stars is written instead, so the output is never empty.
//!
//! The binary JPL ephemeris used alongside the catalog is fetched through the
//! same screened [`fetch::Fetcher`] by [`ephemeris::fetch_ephemeris`].

pub mod catalog;
pub mod config;
pub mod decode;
pub mod ephemeris;
pub mod extract;
pub mod fallback;
pub mod fetch;
pub mod pipeline;
pub mod reader;
pub mod source;
pub mod writer;

pub use catalog::{CanonicalRow, CatalogRecord};
pub use config::{CatalogConfig, EphemerisConfig, ZeroRecordPolicy};
pub use decode::{decode, DecodeError};
pub use ephemeris::{fetch_ephemeris, EphemerisOutcome};
pub use extract::{ExtractStats, RecordExtractor};
pub use fallback::fallback_records;
pub use fetch::{
    ContentScreen, FailureReason, FetchError, Fetcher, HttpTransport, RawResponse, Transport,
};
pub use pipeline::{
    CatalogOrigin, Pipeline, PipelineError, PipelineReport, PipelineState, RunLog, SourceError,
    SourceFailure,
};
pub use reader::{load_catalog, CatalogEntry, ReadError};
pub use source::{Compression, SourceDescriptor, EPHEMERIS_SOURCES, HYG_SOURCES};
pub use writer::{write_atomic, CatalogWriter, WriteError};
