//! `<link rel="icon">` extraction.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};
use url::Url;

use super::resolve_against;
use crate::utils::{compile_regex_unsafe, parse_selector_unsafe};

static LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("link[rel][href]", "LINK_SELECTOR"));

/// `rel` values that mark a favicon link.
static ICON_REL_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex_unsafe(r"(?i)^\s*(shortcut|icon|shortcut\s+icon)\s*$", "ICON_REL_RE")
});

/// Finds the first favicon `<link>` in the document and resolves its `href`
/// against `page`.
///
/// Matching `rel` values are `icon`, `shortcut`, and `shortcut icon`, compared
/// case-insensitively. `apple-touch-icon` and similar are not favicons.
pub fn find_icon_href(html: &str, page: &Url) -> Option<Url> {
    let document = Html::parse_document(html);
    document
        .select(&LINK_SELECTOR)
        .filter(|link| {
            link.value()
                .attr("rel")
                .is_some_and(|rel| ICON_REL_RE.is_match(rel))
        })
        .filter_map(|link| link.value().attr("href"))
        .find_map(|href| resolve_against(page, href))
}
