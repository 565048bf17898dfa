//! Domain normalization and derivation.
//!
//! This module turns arbitrary caller input into the `scheme://host[:port]`
//! strings that key the location cache, and derives the alternative domains
//! the fallback chain probes.
//!
//! Key functions:
//! - `normalize()` - Decodes and parses input into a [`Target`]
//! - `parent_domain()` - Strips one subdomain label
//! - `www_domain()` - Prepends `www.`
//! - `resolve_redirect()` - Follows a domain's top-level redirect once

mod redirect;

use std::sync::LazyLock;

use regex::bytes::{Captures, Regex};
use url::{Host, Url};

use crate::error_handling::ResolveError;
use crate::utils::{compile_bytes_regex_unsafe, compile_regex_unsafe};

pub use redirect::resolve_redirect;

/// A percent sign followed by exactly two hex digits.
static PERCENT_ESCAPE: LazyLock<Regex> =
    LazyLock::new(|| compile_bytes_regex_unsafe(r"%([0-9a-fA-F]{2})", "PERCENT_ESCAPE"));

/// A URL scheme at the very start of the input. A `://` later on (a query
/// parameter holding another URL, say) does not count.
static SCHEME_PREFIX: LazyLock<regex::Regex> =
    LazyLock::new(|| compile_regex_unsafe(r"^[A-Za-z][A-Za-z0-9+.\-]*://", "SCHEME_PREFIX"));

/// Normalized form of a caller's input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Full parsed URL, used as the page for the page-link probe
    pub path: String,
    /// `scheme://host[:port]`, the cache key.
    ///
    /// Scheme and host are lowercased by URL parsing, so `Example.COM` and
    /// `example.com` share one key.
    pub domain: String,
}

/// Percent-decodes `input`, leaving anything that is not `%` plus two hex
/// digits untouched (`100%` and `%zz` survive as-is).
///
/// Decoded bytes that do not form valid UTF-8 are replaced with U+FFFD.
pub fn url_decode(input: &str) -> String {
    let decoded = PERCENT_ESCAPE.replace_all(input.as_bytes(), |caps: &Captures<'_>| {
        let hex = std::str::from_utf8(&caps[1]).unwrap_or("00");
        vec![u8::from_str_radix(hex, 16).unwrap_or(0)]
    });
    String::from_utf8_lossy(&decoded).into_owned()
}

/// Normalizes caller input into a [`Target`].
///
/// The input is percent-decoded, `http://` is prefixed when no scheme is
/// present, and the result is parsed. Only `http` and `https` URLs with a
/// host are accepted.
///
/// # Errors
///
/// Returns `ResolveError::InvalidUrl` if the input does not parse, uses
/// another scheme, or has no host.
pub fn normalize(input: &str) -> Result<Target, ResolveError> {
    let decoded = url_decode(input.trim());
    let candidate = if SCHEME_PREFIX.is_match(&decoded) {
        decoded
    } else {
        format!("http://{decoded}")
    };

    let parsed = Url::parse(&candidate).map_err(|_| ResolveError::InvalidUrl(input.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ResolveError::InvalidUrl(input.to_string()));
    }
    let host = match parsed.host_str() {
        Some(host) if !host.is_empty() => host,
        _ => return Err(ResolveError::InvalidUrl(input.to_string())),
    };

    let domain = match parsed.port() {
        Some(port) => format!("{}://{}:{}", parsed.scheme(), host, port),
        None => format!("{}://{}", parsed.scheme(), host),
    };

    Ok(Target {
        path: parsed.to_string(),
        domain,
    })
}

/// A domain split into the parts the variant functions rebuild from.
struct DomainParts {
    scheme: String,
    host: String,
    port: Option<u16>,
}

impl DomainParts {
    /// Splits a `scheme://host[:port]` string. IP-literal hosts yield `None`:
    /// they have neither a parent nor a `www` form.
    fn parse(domain: &str) -> Option<Self> {
        let parsed = Url::parse(domain).ok()?;
        match parsed.host()? {
            Host::Domain(host) => Some(Self {
                scheme: parsed.scheme().to_string(),
                host: host.to_string(),
                port: parsed.port(),
            }),
            Host::Ipv4(_) | Host::Ipv6(_) => None,
        }
    }

    fn rebuild(&self, host: &str) -> String {
        match self.port {
            Some(port) => format!("{}://{}:{}", self.scheme, host, port),
            None => format!("{}://{}", self.scheme, host),
        }
    }
}

/// Drops the leftmost host label when the host has more than two labels.
///
/// `http://a.b.example.com` gives `http://b.example.com`;
/// `http://example.com` has no parent.
pub fn parent_domain(domain: &str) -> Option<String> {
    let parts = DomainParts::parse(domain)?;
    let labels: Vec<&str> = parts.host.split('.').collect();
    if labels.len() > 2 {
        Some(parts.rebuild(&labels[1..].join(".")))
    } else {
        None
    }
}

/// Prepends `www.` to the host unless it already contains `www` anywhere.
///
/// `http://example.com` gives `http://www.example.com`;
/// `http://www.example.com` and `http://www2.example.com` give `None`.
pub fn www_domain(domain: &str) -> Option<String> {
    let parts = DomainParts::parse(domain)?;
    if parts.host.contains("www") {
        None
    } else {
        Some(parts.rebuild(&format!("www.{}", parts.host)))
    }
}
