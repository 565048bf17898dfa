//! `<meta http-equiv="refresh">` extraction.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};
use url::Url;

use super::resolve_against;
use crate::utils::{compile_regex_unsafe, parse_selector_unsafe};

static META_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("meta[http-equiv][content]", "META_SELECTOR"));

/// The `url=` part of a refresh directive (`0; url=/home`).
static REFRESH_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(r"(?i)url\s*=\s*([^;]+)", "REFRESH_URL_RE"));

/// Finds a meta-refresh directive and resolves its target against `page`.
///
/// A refresh without a `url=` part reloads the same page and is ignored.
pub fn find_meta_refresh(html: &str, page: &Url) -> Option<Url> {
    let document = Html::parse_document(html);
    document
        .select(&META_SELECTOR)
        .filter(|meta| {
            meta.value()
                .attr("http-equiv")
                .is_some_and(|v| v.trim().eq_ignore_ascii_case("refresh"))
        })
        .filter_map(|meta| meta.value().attr("content"))
        .filter_map(|content| REFRESH_URL_RE.captures(content))
        .filter_map(|caps| caps.get(1))
        .map(|target| target.as_str().trim().trim_matches(|c| c == '\'' || c == '"'))
        .find_map(|target| resolve_against(page, target))
}
