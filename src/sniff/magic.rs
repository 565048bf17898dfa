//! Magic-byte sniffer with a text fallback.

use crate::config::{ICO_MIME, LEGACY_ICO_MIME};
use crate::error_handling::SniffError;

use super::ContentSniffer;

/// Aliases some detectors report for `.ico` files.
const ICO_ALIASES: &[&str] = &["image/vnd.microsoft.icon", LEGACY_ICO_MIME];

/// How much of a text body is inspected for markup.
const TEXT_PREFIX_LEN: usize = 512;

/// Sniffs with `infer` magic numbers, then falls back to text heuristics.
///
/// Binary formats (PNG, GIF, JPEG, ICO, gzip, ...) are recognized by their
/// magic bytes. Markup is recognized from the first bytes of the body, and
/// any other valid UTF-8 is `text/plain`.
#[derive(Debug, Default, Clone, Copy)]
pub struct MagicSniffer;

impl MagicSniffer {
    /// Creates a sniffer.
    pub fn new() -> Self {
        Self
    }

    fn sniff_text(data: &[u8]) -> &'static str {
        let prefix = &data[..data.len().min(TEXT_PREFIX_LEN)];
        let head = String::from_utf8_lossy(prefix);
        let head = head.trim_start_matches('\u{feff}').trim_start().to_ascii_lowercase();

        if head.starts_with("<?xml") {
            if head.contains("<svg") {
                "image/svg+xml"
            } else if head.contains("<html") {
                "text/html"
            } else {
                "application/xml"
            }
        } else if head.starts_with("<svg") {
            "image/svg+xml"
        } else if head.starts_with("<!doctype html") || head.contains("<html") {
            "text/html"
        } else if is_text(data) {
            "text/plain"
        } else {
            "application/octet-stream"
        }
    }
}

/// Valid UTF-8 without control characters other than whitespace.
fn is_text(data: &[u8]) -> bool {
    std::str::from_utf8(data).is_ok_and(|s| {
        s.chars()
            .all(|c| !c.is_control() || matches!(c, '\n' | '\r' | '\t' | '\u{c}'))
    })
}

impl ContentSniffer for MagicSniffer {
    fn sniff(&self, data: &[u8]) -> Result<String, SniffError> {
        if data.is_empty() {
            return Err(SniffError::EmptyInput);
        }

        // infer's text matchers report `text/xml`; markup goes through the
        // heuristics so XML error pages land on the blacklisted type.
        let mime = match infer::get(data) {
            Some(kind) if kind.matcher_type() == infer::MatcherType::Text => {
                Self::sniff_text(data)
            }
            Some(kind) if ICO_ALIASES.contains(&kind.mime_type()) => ICO_MIME,
            Some(kind) => kind.mime_type(),
            None => Self::sniff_text(data),
        };
        Ok(mime.to_string())
    }
}
