//! HTML parsing for icon discovery.
//!
//! This module extracts the two things the page-link probe looks for:
//! - `<link rel="icon">` / `<link rel="shortcut icon">` hrefs
//! - `<meta http-equiv="refresh">` targets
//!
//! All parsing is done using CSS selectors via the `scraper` crate. Returned
//! URLs are absolute, resolved against the page URL.

mod icon_link;
mod refresh;

// Re-export public API
pub use icon_link::find_icon_href;
pub use refresh::find_meta_refresh;

use url::Url;

/// Resolves a raw attribute value against the page URL.
///
/// Protocol-relative values (`//cdn.example.com/x.ico`) inherit the page's
/// scheme. Only `http` and `https` results are returned.
fn resolve_against(page: &Url, raw: &str) -> Option<Url> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match page.join(raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Some(url),
        Ok(url) => {
            log::debug!("Ignoring non-HTTP reference {} on {}", url.scheme(), page);
            None
        }
        Err(e) => {
            log::debug!("Unresolvable reference '{}' on {}: {}", raw, page, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
