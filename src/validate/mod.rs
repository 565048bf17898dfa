//! Icon validation.
//!
//! Decides whether a fetched resource is acceptable as a favicon. Acceptance
//! is based on the sniffed content, never on the declared `Content-Type`.

mod icon;

use std::sync::Arc;

use crate::config::{
    ICON_MIMETYPE_BLACKLIST, ICO_MIME, LEGACY_ICO_MIME, MAX_ICON_LENGTH, MIN_ICON_LENGTH,
};
use crate::error_handling::Rejection;
use crate::fetch::FetchedResponse;
use crate::sniff::{gunzip, ContentSniffer, GZIP_MIME};

pub use icon::Icon;

/// Applies the acceptance rules to fetched responses.
#[derive(Clone)]
pub struct IconValidator {
    sniffer: Arc<dyn ContentSniffer>,
    max_decompressed_size: usize,
}

impl IconValidator {
    /// Creates a validator. Gzip payloads are inflated up to
    /// `max_decompressed_size` bytes.
    pub fn new(sniffer: Arc<dyn ContentSniffer>, max_decompressed_size: usize) -> Self {
        Self {
            sniffer,
            max_decompressed_size,
        }
    }

    /// Validates a response, returning the icon it carries.
    ///
    /// Checks run in order and stop at the first rejection:
    /// 1. status must be 200
    /// 2. body must be non-empty
    /// 3. body is sniffed; a gzip body is inflated once and re-sniffed
    /// 4. `image/x-ico` is normalized to `image/x-icon`
    /// 5. the type must not be blacklisted
    ///
    /// A size outside the plausible icon range and a mismatch with the
    /// declared `Content-Type` are logged but do not reject.
    ///
    /// The returned icon has an empty location; the caller sets it.
    pub fn validate(&self, response: FetchedResponse) -> Result<Icon, Rejection> {
        let url = response.final_url.as_str();
        if response.status != reqwest::StatusCode::OK {
            return Err(Rejection::NonSuccessStatus(response.status.as_u16()));
        }
        if response.body.is_empty() {
            return Err(Rejection::EmptyBody);
        }

        let declared = response.declared_content_type();
        let mut data = response.body;
        let mut mime = self.sniff(url, &data)?;

        if mime == GZIP_MIME {
            match gunzip(&data, self.max_decompressed_size) {
                Ok(inflated) if !inflated.is_empty() => {
                    log::warn!(
                        "Icon at {} was gzip-compressed ({} -> {} bytes)",
                        url,
                        data.len(),
                        inflated.len()
                    );
                    mime = self.sniff(url, &inflated)?;
                    data = inflated;
                }
                Ok(_) => log::warn!("Icon at {} inflated to nothing; keeping gzip body", url),
                Err(e) => log::warn!("Could not decompress gzip icon at {}: {:#}", url, e),
            }
        }

        if mime == LEGACY_ICO_MIME {
            mime = ICO_MIME.to_string();
        }

        if let Some(declared) = declared.as_deref() {
            if declared != mime {
                log::warn!(
                    "Content-Type mismatch for {}: declared {}, sniffed {}",
                    url,
                    declared,
                    mime
                );
            }
        }

        if ICON_MIMETYPE_BLACKLIST.contains(&mime.as_str()) {
            log::warn!("Rejecting {} with blacklisted type {}", url, mime);
            return Err(Rejection::BlacklistedType(mime));
        }

        if !(MIN_ICON_LENGTH..=MAX_ICON_LENGTH).contains(&data.len()) {
            log::warn!(
                "Icon at {} is {} bytes, outside the expected {}..={} range",
                url,
                data.len(),
                MIN_ICON_LENGTH,
                MAX_ICON_LENGTH
            );
        }

        Ok(Icon {
            data,
            location: String::new(),
            mime_type: mime,
        })
    }

    fn sniff(&self, url: &str, data: &[u8]) -> Result<String, Rejection> {
        self.sniffer.sniff(data).map_err(|e| {
            log::error!("Content sniffing failed for {}: {}", url, e);
            Rejection::SniffFailed(e.to_string())
        })
    }
}
