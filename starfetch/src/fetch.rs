//! Screened retrieval of raw bytes from a source
//!
//! A [`Fetcher`] pairs a [`Transport`] (anything that turns a URI into bytes)
//! with a [`ContentScreen`], the byte-level sanity filter every payload must
//! pass before it is handed to the decoder.
//!
//! # Soft failures
//!
//! Mirrors frequently answer a missing file with a `200 OK` HTML page, and
//! large binary downloads are sometimes replaced by a short error stub. Both
//! are rejected here and reported as failures of the same weight as a
//! network error, so the caller simply moves on to the next source.

use std::time::Duration;

use log::debug;
use thiserror::Error;

use crate::source::SourceDescriptor;

/// Signatures that mark a payload as an HTML document (compared lowercase).
pub const HTML_SIGNATURES: &[&[u8]] = &[b"<!doctype html>", b"<html"];

/// Errors that make a single source unusable.
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP client failure: DNS, TLS, connection, or non-success status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Transport failure reported by a non-HTTP transport.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Payload contains an HTML document signature.
    #[error("Received HTML instead of data")]
    HtmlContent,

    /// Payload is smaller than the screen's minimum size.
    #[error("Payload too small: {size} bytes (minimum {min})")]
    TooSmall { size: usize, min: usize },
}

/// Coarse classification of a [`FetchError`], used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    Network,
    HtmlContent,
    TooSmall,
}

impl FetchError {
    pub fn reason(&self) -> FailureReason {
        match self {
            FetchError::Http(_) | FetchError::Transport(_) => FailureReason::Network,
            FetchError::HtmlContent => FailureReason::HtmlContent,
            FetchError::TooSmall { .. } => FailureReason::TooSmall,
        }
    }
}

/// Bytes accepted from a source, tagged with where they came from.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub source: SourceDescriptor,
    pub bytes: Vec<u8>,
}

/// Anything able to retrieve the full body behind a URI.
///
/// Implementations issue exactly one request per call and must not write
/// anything to disk.
pub trait Transport {
    fn get(&self, uri: &str) -> Result<Vec<u8>, FetchError>;
}

/// Blocking HTTP(S) transport with a browser-like `User-Agent`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Build a client sending `user_agent`, with an optional per-request timeout.
    pub fn new(user_agent: &str, timeout: Option<Duration>) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, uri: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.client.get(uri).send()?.error_for_status()?;
        let bytes = response.bytes()?;
        Ok(bytes.to_vec())
    }
}

/// Byte-level sanity filter applied to every payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentScreen {
    /// Payloads shorter than this are rejected.
    pub min_size: usize,
    /// Reject payloads that look like an HTML document.
    pub reject_html: bool,
}

impl ContentScreen {
    pub fn with_min_size(min_size: usize) -> Self {
        Self {
            min_size,
            ..Self::default()
        }
    }

    /// Accept or reject a payload.
    pub fn check(&self, bytes: &[u8]) -> Result<(), FetchError> {
        if bytes.len() < self.min_size {
            return Err(FetchError::TooSmall {
                size: bytes.len(),
                min: self.min_size,
            });
        }
        if self.reject_html && looks_like_html(bytes) {
            return Err(FetchError::HtmlContent);
        }
        Ok(())
    }
}

impl Default for ContentScreen {
    /// Rejects empty bodies and HTML pages.
    fn default() -> Self {
        Self {
            min_size: 1,
            reject_html: true,
        }
    }
}

/// Case-insensitive search for any of [`HTML_SIGNATURES`] anywhere in `bytes`.
pub fn looks_like_html(bytes: &[u8]) -> bool {
    HTML_SIGNATURES.iter().any(|signature| {
        bytes
            .windows(signature.len())
            .any(|window| window.eq_ignore_ascii_case(signature))
    })
}

/// A transport plus the screen its payloads must pass.
#[derive(Debug, Clone)]
pub struct Fetcher<T> {
    transport: T,
    screen: ContentScreen,
}

impl<T: Transport> Fetcher<T> {
    pub fn new(transport: T, screen: ContentScreen) -> Self {
        Self { transport, screen }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Retrieve one source and screen the result.
    pub fn fetch(&self, source: &SourceDescriptor) -> Result<RawResponse, FetchError> {
        let bytes = self.transport.get(&source.uri)?;
        debug!("Received {} bytes from {}", bytes.len(), source);
        self.screen.check(&bytes)?;
        Ok(RawResponse {
            source: source.clone(),
            bytes,
        })
    }
}
