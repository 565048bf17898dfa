//! The validated icon value.

use serde::Serialize;

/// A favicon that passed validation.
///
/// `data` is never empty and `mime_type` is never on the blacklist once a
/// value leaves the validator. `location` is the absolute URL the bytes were
/// fetched from; the validator leaves it empty and the probe that fetched the
/// resource fills it in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Icon {
    /// Raw icon bytes, after any gzip unwrap
    #[serde(skip)]
    pub data: Vec<u8>,
    /// Absolute URL of the icon
    pub location: String,
    /// Sniffed MIME type, normalized (`image/x-ico` becomes `image/x-icon`)
    pub mime_type: String,
}

impl Icon {
    /// Returns the same icon with its location set.
    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Size of the icon in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the icon has no bytes (never true for a validated icon).
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
