//! Content sniffing.
//!
//! Classifies byte blobs by content rather than by the declared
//! `Content-Type`, and unwraps gzip-compressed payloads.
//!
//! The [`ContentSniffer`] trait is the seam between the validator and the
//! magic-byte detector; [`MagicSniffer`] is the production implementation.

mod gzip;
mod magic;

pub use gzip::{gunzip, GZIP_MIME};
pub use magic::MagicSniffer;

use crate::error_handling::SniffError;

/// Classifies bytes into a MIME type.
///
/// An unrecognized blob is not an error: implementations report it as
/// `application/octet-stream`. `Err` is reserved for the detector itself
/// failing, which the validator treats as a rejection.
pub trait ContentSniffer: Send + Sync {
    /// Returns the MIME type of `data`.
    fn sniff(&self, data: &[u8]) -> Result<String, SniffError>;
}
