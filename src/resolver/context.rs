//! Per-request resolution state.

use std::collections::HashSet;
use std::fmt;

use url::Url;

use crate::domain::{parent_domain, www_domain, Target};
use crate::fetch::Deadline;

/// Kind of probe, used to recognize repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeKind {
    /// Fetch a page and follow its `<link rel="icon">`
    PageLink,
    /// Fetch `{domain}/favicon.ico`
    Root,
}

/// One step of the fallback chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe {
    /// Page-link probe on a page URL
    PageLink(String),
    /// Root probe on a domain
    Root(String),
}

impl fmt::Display for Probe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Probe::PageLink(page) => write!(f, "page-link probe on {page}"),
            Probe::Root(domain) => write!(f, "root probe on {domain}"),
        }
    }
}

/// Scratch state for one resolution. Created at request entry, dropped at
/// exit, never persisted.
#[derive(Debug)]
pub struct ResolutionContext {
    /// Budget shared by every fetch of this request
    pub deadline: Deadline,
    /// Input exactly as the caller supplied it
    pub original_url: String,
    /// Normalized input
    pub target: Target,
    /// Domain the target's top-level redirect ends on
    pub redirected_domain: String,
    /// Parent of the redirected (or original) domain, else the redirected domain
    pub parent_domain: String,
    /// `www` form of the redirected domain, if it has one
    pub www_domain: Option<String>,
    attempted: HashSet<(ProbeKind, String)>,
}

impl ResolutionContext {
    /// Derives the domain variants for a normalized, redirect-resolved target.
    pub fn new(
        original_url: &str,
        target: Target,
        redirected_domain: String,
        deadline: Deadline,
    ) -> Self {
        let parent = parent_domain(&redirected_domain)
            .or_else(|| parent_domain(&target.domain))
            .unwrap_or_else(|| redirected_domain.clone());
        let www = www_domain(&redirected_domain);

        log::debug!(
            "domain:{}, redirected:{}, parent:{}, www:{}",
            target.domain,
            redirected_domain,
            parent,
            www.as_deref().unwrap_or("-")
        );

        Self {
            deadline,
            original_url: original_url.to_string(),
            target,
            redirected_domain,
            parent_domain: parent,
            www_domain: www,
            attempted: HashSet::new(),
        }
    }

    /// Keys a resolution outcome is cached under.
    pub fn cache_keys(&self) -> [&str; 2] {
        [self.target.domain.as_str(), self.redirected_domain.as_str()]
    }

    /// Probes to run after the cache lookup, in order.
    ///
    /// The default icon is not a probe; it is what the chain falls back to
    /// when every probe fails.
    pub fn plan(&self) -> Vec<Probe> {
        let mut plan = vec![
            Probe::PageLink(self.target.path.clone()),
            Probe::Root(self.redirected_domain.clone()),
            Probe::PageLink(self.parent_domain.clone()),
            Probe::Root(self.parent_domain.clone()),
        ];
        if let Some(www) = &self.www_domain {
            plan.push(Probe::PageLink(www.clone()));
            plan.push(Probe::Root(www.clone()));
        }
        plan.push(Probe::Root(self.target.domain.clone()));
        plan
    }

    /// Records an attempt, returning `false` if the same probe already ran.
    ///
    /// `location` is compared in its parsed form, so `http://a.com` and
    /// `http://a.com/` count as the same page.
    pub fn first_attempt(&mut self, kind: ProbeKind, location: &str) -> bool {
        let key = Url::parse(location)
            .map(String::from)
            .unwrap_or_else(|_| location.to_string());
        self.attempted.insert((kind, key))
    }
}
