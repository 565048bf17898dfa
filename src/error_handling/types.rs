//! Error type definitions.
//!
//! This module defines the failure taxonomy of the resolver and the named
//! counters exposed through the diagnostics endpoints.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::{EnumIter as EnumIterMacro, IntoStaticStr};
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// Error loading the default icon from disk.
    #[error("Default icon could not be loaded from {path}: {source}")]
    DefaultIconError {
        /// Path that was read
        path: String,
        /// Underlying I/O failure
        source: std::io::Error,
    },
}

/// The only failure a caller of the resolver can observe.
///
/// Every other failure mode degrades to "try the next probe" and finally to
/// the default icon.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The input could not be turned into a `scheme://host` domain.
    #[error("Malformed URL:{0}")]
    InvalidUrl(String),
}

/// Failure of a single outbound fetch.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request budget was exhausted, either before the call or during it.
    #[error("request budget exhausted after {elapsed_ms}ms")]
    Timeout {
        /// Milliseconds elapsed since the request started
        elapsed_ms: u128,
    },

    /// Connection refused, DNS failure, TLS failure, malformed URL, and so on.
    #[error("transport error: {0}")]
    Transport(#[from] ReqwestError),

    /// The body exceeded the configured buffer limit.
    #[error("response body exceeds {limit} bytes")]
    BodyTooLarge {
        /// Configured limit in bytes
        limit: usize,
    },
}

/// Why a fetched resource was not accepted as an icon.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Status code other than 200.
    #[error("non-success response: {0}")]
    NonSuccessStatus(u16),

    /// Zero-length body.
    #[error("empty body")]
    EmptyBody,

    /// The content sniffer could not classify the body.
    #[error("content sniffing failed: {0}")]
    SniffFailed(String),

    /// The sniffed MIME type is on the blacklist.
    #[error("blacklisted content type: {0}")]
    BlacklistedType(String),
}

/// Why a single probe of the fallback chain produced no icon.
///
/// Always recovered by moving on to the next probe.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// The page or icon could not be fetched.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The fetched resource is not an acceptable icon.
    #[error("rejected: {0}")]
    Rejected(#[from] Rejection),

    /// The page itself answered with a non-200 status.
    #[error("page returned status {0}")]
    PageStatus(u16),

    /// The page has neither an icon link nor a refresh directive to follow.
    #[error("no icon link found")]
    NoIconLink,

    /// The probe location could not be built from the domain.
    #[error("invalid probe location: {0}")]
    InvalidLocation(String),

    /// The same probe already ran for this request.
    #[error("already attempted")]
    AlreadyAttempted,
}

/// Failure reported by a content sniffer, distinct from "unknown type".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SniffError {
    /// Nothing to classify.
    #[error("no bytes to classify")]
    EmptyInput,

    /// The detector itself failed.
    #[error("detector failure: {0}")]
    Detector(String),
}

/// Failure of the location cache backend. Logged, never surfaced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// The backend refused the operation.
    #[error("cache backend unavailable: {0}")]
    Unavailable(String),
}

/// Process-wide counters reported by the diagnostics endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Counter {
    /// Favicon requests received
    Requests,
    /// Requests answered from the location cache
    Hits,
    /// Requests answered with the default icon
    Defaults,
}

impl Counter {
    /// Name used in status output (`requests`, `hits`, `defaults`).
    pub fn name(self) -> &'static str {
        self.into()
    }
}
