//! Multi-source catalog acquisition as an explicit state machine
//!
//! ```text
//! TryNextSource(i) --fetch+decode ok--> Success --extract--> Write --> Done
//!        |  ^                                |
//!        |  +------- source failed ----------+-- (zero records, UseFallback)
//!        v                                   v
//! ExhaustedSources -----------------> UseFallback --> Write --> Done
//! ```
//!
//! Sources are tried strictly in order. The first one whose payload passes the
//! screen and decodes to text wins, even if no row survives extraction (see
//! [`ZeroRecordPolicy`]). Source failures are logged and collected, never
//! returned as errors; only failing to write the output file is fatal.

use std::path::{Path, PathBuf};

use log::{info, warn};
use thiserror::Error;

use crate::catalog::CatalogRecord;
use crate::config::{CatalogConfig, ZeroRecordPolicy};
use crate::decode::{decode, DecodeError};
use crate::extract::{ExtractStats, RecordExtractor};
use crate::fallback::fallback_records;
use crate::fetch::{FetchError, Fetcher, HttpTransport, Transport};
use crate::source::SourceDescriptor;
use crate::writer::{CatalogWriter, WriteError};

#[derive(Error, Debug)]
pub enum PipelineError {
    /// The HTTP client could not be constructed.
    #[error("Failed to set up HTTP client: {0}")]
    Client(FetchError),

    /// The output file could not be written.
    #[error("Failed to write catalog: {0}")]
    Write(#[from] WriteError),
}

/// Why a single source was abandoned.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

#[derive(Debug)]
pub struct SourceFailure {
    pub source: SourceDescriptor,
    pub error: SourceError,
}

/// Where the written rows came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogOrigin {
    Fetched { uri: String },
    Fallback,
}

/// States of one pipeline run.
#[derive(Debug)]
pub enum PipelineState {
    /// Attempt the source at this index.
    TryNextSource(usize),
    /// A source produced decoded text.
    Success {
        source: SourceDescriptor,
        text: String,
    },
    /// Every source failed.
    ExhaustedSources,
    UseFallback,
    Write {
        records: Vec<CatalogRecord>,
        origin: CatalogOrigin,
    },
    Done {
        origin: CatalogOrigin,
        written: usize,
    },
}

/// What happened along the way, filled in as the states advance.
#[derive(Debug, Default)]
pub struct RunLog {
    pub failures: Vec<SourceFailure>,
    pub stats: Option<ExtractStats>,
}

/// Summary of a completed run.
#[derive(Debug)]
pub struct PipelineReport {
    pub origin: CatalogOrigin,
    /// Data rows written (header excluded).
    pub written: usize,
    /// Extraction counters, present when a source succeeded.
    pub stats: Option<ExtractStats>,
    /// Sources that failed before the winning one (or all of them).
    pub failures: Vec<SourceFailure>,
}

pub struct Pipeline<T> {
    sources: Vec<SourceDescriptor>,
    fetcher: Fetcher<T>,
    extractor: RecordExtractor,
    writer: CatalogWriter,
    output: PathBuf,
    zero_records: ZeroRecordPolicy,
}

impl Pipeline<HttpTransport> {
    /// Pipeline fetching over HTTP with the configured identification and timeout.
    pub fn from_config(config: &CatalogConfig) -> Result<Self, PipelineError> {
        let transport = HttpTransport::new(&config.user_agent, config.timeout)
            .map_err(PipelineError::Client)?;
        Ok(Self::new(config, transport))
    }
}

impl<T: Transport> Pipeline<T> {
    pub fn new(config: &CatalogConfig, transport: T) -> Self {
        Self {
            sources: config.sources.clone(),
            fetcher: Fetcher::new(transport, config.screen),
            extractor: RecordExtractor::new(config.magnitude_limit),
            writer: CatalogWriter::new(),
            output: config.output.clone(),
            zero_records: config.zero_records,
        }
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Run from the first source until the catalog is written.
    pub fn run(&self) -> Result<PipelineReport, PipelineError> {
        let mut log = RunLog::default();
        let mut state = PipelineState::TryNextSource(0);

        loop {
            state = match self.step(state, &mut log)? {
                PipelineState::Done { origin, written } => {
                    info!("Successfully wrote {}", self.output.display());
                    return Ok(PipelineReport {
                        origin,
                        written,
                        stats: log.stats,
                        failures: log.failures,
                    });
                }
                next => next,
            };
        }
    }

    /// Advance one transition. `Done` is terminal and returned unchanged.
    pub fn step(
        &self,
        state: PipelineState,
        log: &mut RunLog,
    ) -> Result<PipelineState, PipelineError> {
        let next = match state {
            PipelineState::TryNextSource(index) => match self.sources.get(index) {
                None => PipelineState::ExhaustedSources,
                Some(source) => match self.attempt(source) {
                    Ok(text) => PipelineState::Success {
                        source: source.clone(),
                        text,
                    },
                    Err(error) => {
                        warn!("Failed to download from {source}: {error}");
                        log.failures.push(SourceFailure {
                            source: source.clone(),
                            error,
                        });
                        PipelineState::TryNextSource(index + 1)
                    }
                },
            },
            PipelineState::Success { source, text } => {
                info!("Processing downloaded data...");
                let (records, stats) = self.extractor.extract_with_stats(&text);
                log.stats = Some(stats);

                if records.is_empty() {
                    warn!("No stars from {source} passed the filter");
                }
                if records.is_empty() && self.zero_records == ZeroRecordPolicy::UseFallback {
                    PipelineState::UseFallback
                } else {
                    PipelineState::Write {
                        records,
                        origin: CatalogOrigin::Fetched {
                            uri: source.uri.into_owned(),
                        },
                    }
                }
            }
            PipelineState::ExhaustedSources => {
                warn!("Could not download catalog from any source. Using fallback list.");
                PipelineState::UseFallback
            }
            PipelineState::UseFallback => PipelineState::Write {
                records: fallback_records(),
                origin: CatalogOrigin::Fallback,
            },
            PipelineState::Write { records, origin } => {
                let written = self.writer.write(records, &self.output)?;
                PipelineState::Done { origin, written }
            }
            done @ PipelineState::Done { .. } => done,
        };
        Ok(next)
    }

    fn attempt(&self, source: &SourceDescriptor) -> Result<String, SourceError> {
        info!("Downloading catalog from {source}...");
        let raw = self.fetcher.fetch(source)?;
        let text = decode(raw)?;
        info!("Download successful.");
        Ok(text)
    }
}
