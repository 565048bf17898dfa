//! Favicon resolution.
//!
//! This module runs the fallback chain: the location cache first, then
//! page-link and root probes across the redirected, parent, `www`, and
//! original domains, and finally the default icon. Probes run strictly in
//! order and the first success wins.
//!
//! Every failure other than a malformed input degrades to "try the next
//! probe", so a well-formed input always resolves to some icon.

mod context;
mod probes;

use std::sync::Arc;
use std::time::Duration;

use crate::cache::{CacheValue, LocationCache};
use crate::config::Config;
use crate::domain::{normalize, resolve_redirect};
use crate::error_handling::{Counter, Counters, InitializationError, ResolveError};
use crate::fetch::{Deadline, Fetcher};
use crate::initialization::load_default_icon;
use crate::sniff::MagicSniffer;
use crate::validate::{Icon, IconValidator};

pub use context::{Probe, ProbeKind, ResolutionContext};

/// Outcome of a resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The icon to serve
    pub icon: Icon,
    /// Whether the icon came from the location cache
    pub cache_hit: bool,
}

/// Runs the fallback chain. Cheap to clone; clones share the cache,
/// counters, and HTTP client.
#[derive(Clone)]
pub struct FaviconResolver {
    fetcher: Fetcher,
    validator: IconValidator,
    cache: LocationCache,
    counters: Arc<Counters>,
    default_icon: Arc<Icon>,
    request_timeout: Duration,
}

impl FaviconResolver {
    /// Assembles a resolver from its collaborators.
    pub fn new(
        fetcher: Fetcher,
        validator: IconValidator,
        cache: LocationCache,
        counters: Arc<Counters>,
        default_icon: Icon,
        request_timeout: Duration,
    ) -> Self {
        Self {
            fetcher,
            validator,
            cache,
            counters,
            default_icon: Arc::new(default_icon),
            request_timeout,
        }
    }

    /// Builds a resolver with an in-memory cache from configuration.
    ///
    /// # Errors
    ///
    /// Returns an `InitializationError` if the HTTP client cannot be built or
    /// the configured default icon cannot be loaded.
    pub fn from_config(config: &Config, counters: Arc<Counters>) -> Result<Self, InitializationError> {
        let fetcher = Fetcher::from_config(config)?;
        let validator = IconValidator::new(Arc::new(MagicSniffer::new()), config.max_body_size);
        let cache = LocationCache::in_memory_bounded(config.cache_ttl, config.cache_max_bytes);
        let default_icon = load_default_icon(config)?;
        Ok(Self::new(
            fetcher,
            validator,
            cache,
            counters,
            default_icon,
            config.request_timeout(),
        ))
    }

    /// The shared location cache.
    pub fn cache(&self) -> &LocationCache {
        &self.cache
    }

    /// The shared counters.
    pub fn counters(&self) -> &Arc<Counters> {
        &self.counters
    }

    /// The icon served when nothing better is found.
    pub fn default_icon(&self) -> &Icon {
        &self.default_icon
    }

    /// Resolves the favicon for `input`.
    ///
    /// With `skip_cache` the cache is not read, but the outcome is still
    /// written back.
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::InvalidUrl` if `input` cannot be normalized.
    /// Nothing else fails: the default icon is the backstop.
    pub async fn resolve(&self, input: &str, skip_cache: bool) -> Result<Resolution, ResolveError> {
        log::debug!("Incoming request:{} (skip_cache={})", input, skip_cache);
        self.counters.increment(Counter::Requests);

        let deadline = Deadline::new(self.request_timeout);
        let target = normalize(input)?;
        let redirected = resolve_redirect(&self.fetcher, &target.domain, &deadline).await;
        let mut ctx = ResolutionContext::new(input, target, redirected, deadline);

        let resolution = match self.from_cache(&ctx, skip_cache) {
            Some(resolution) => resolution,
            None => self.run_probes(&mut ctx).await,
        };

        log::info!(
            "Resolved {} to {} in {:.3}s",
            ctx.target.domain,
            resolution.icon.location,
            ctx.deadline.elapsed().as_secs_f64()
        );
        Ok(resolution)
    }

    /// Drops the cached outcome for `input`'s domain and for the domain it
    /// redirects to, returning the normalized domain.
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::InvalidUrl` if `input` cannot be normalized.
    pub async fn clear(&self, input: &str) -> Result<String, ResolveError> {
        log::debug!("Incoming cache invalidation request:{}", input);
        let target = normalize(input)?;
        self.cache.invalidate(&target.domain);

        let deadline = Deadline::new(self.request_timeout);
        let redirected = resolve_redirect(&self.fetcher, &target.domain, &deadline).await;
        if redirected != target.domain {
            self.cache.invalidate(&redirected);
        }
        Ok(target.domain)
    }

    fn from_cache(&self, ctx: &ResolutionContext, skip_cache: bool) -> Option<Resolution> {
        if skip_cache {
            return None;
        }
        let value = self.cache.get(&ctx.redirected_domain)?;
        self.counters.increment(Counter::Hits);
        let icon = match value {
            CacheValue::Hit(icon) => {
                log::debug!(
                    "Cache hit:{}, location:{}",
                    ctx.redirected_domain,
                    icon.location
                );
                icon
            }
            CacheValue::DefaultSentinel => {
                log::debug!("Cache hit:{}, default icon", ctx.redirected_domain);
                self.counters.increment(Counter::Defaults);
                self.default_icon().clone()
            }
        };
        Some(Resolution {
            icon,
            cache_hit: true,
        })
    }

    async fn run_probes(&self, ctx: &mut ResolutionContext) -> Resolution {
        for probe in ctx.plan() {
            let result = match &probe {
                Probe::PageLink(page) => self.page_link_probe(ctx, page, true).await,
                Probe::Root(domain) => self.root_probe(ctx, domain).await,
            };
            match result {
                Ok(icon) => {
                    log::debug!(
                        "Found favicon at:{} for domain:{}",
                        icon.location,
                        ctx.target.domain
                    );
                    self.cache
                        .put_all(ctx.cache_keys(), &CacheValue::Hit(icon.clone()));
                    return Resolution {
                        icon,
                        cache_hit: false,
                    };
                }
                Err(e) => log::debug!("{} failed: {}", probe, e),
            }
        }

        log::debug!("Falling back to default icon for:{}", ctx.target.domain);
        self.cache
            .put_all(ctx.cache_keys(), &CacheValue::DefaultSentinel);
        self.counters.increment(Counter::Defaults);
        Resolution {
            icon: self.default_icon().clone(),
            cache_hit: false,
        }
    }
}
