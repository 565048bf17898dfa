//! Page-link and root probes.

use futures::future::BoxFuture;
use url::Url;

use super::context::{ProbeKind, ResolutionContext};
use super::FaviconResolver;
use crate::domain::normalize;
use crate::error_handling::ProbeError;
use crate::parse::{find_icon_href, find_meta_refresh};
use crate::validate::Icon;

/// `{domain}/favicon.ico`
fn root_icon_url(domain: &str) -> Result<Url, ProbeError> {
    Url::parse(domain)
        .and_then(|base| base.join("/favicon.ico"))
        .map_err(|e| ProbeError::InvalidLocation(format!("{domain}: {e}")))
}

impl FaviconResolver {
    /// Fetches and validates the icon at `url`. The icon's location is the
    /// requested URL.
    async fn fetch_icon(
        &self,
        ctx: &ResolutionContext,
        url: &str,
        cookie: Option<&str>,
    ) -> Result<Icon, ProbeError> {
        let response = self.fetcher.fetch(url, &ctx.deadline, cookie).await?;
        let icon = self.validator.validate(response)?;
        Ok(icon.at(url))
    }

    /// Looks for `/favicon.ico` on `domain`.
    pub(super) async fn root_probe(
        &self,
        ctx: &mut ResolutionContext,
        domain: &str,
    ) -> Result<Icon, ProbeError> {
        let url = root_icon_url(domain)?;
        if !ctx.first_attempt(ProbeKind::Root, url.as_str()) {
            return Err(ProbeError::AlreadyAttempted);
        }
        log::warn!("Attempting to locate favicon for domain:{} at root", domain);
        self.fetch_icon(ctx, url.as_str(), None).await
    }

    /// Fetches `page` and follows its favicon `<link>`.
    ///
    /// A page without a favicon link but with a meta-refresh directive is
    /// followed once: the refresh target gets a page-link probe with
    /// `allow_refresh` off, then a root probe on the target's domain. The
    /// response's cookies are forwarded to the icon fetch.
    pub(super) fn page_link_probe<'a>(
        &'a self,
        ctx: &'a mut ResolutionContext,
        page: &'a str,
        allow_refresh: bool,
    ) -> BoxFuture<'a, Result<Icon, ProbeError>> {
        Box::pin(async move {
            if !ctx.first_attempt(ProbeKind::PageLink, page) {
                return Err(ProbeError::AlreadyAttempted);
            }
            log::debug!("Attempting to locate embedded favicon link in page:{}", page);

            let response = self.fetcher.fetch(page, &ctx.deadline, None).await?;
            if response.status != reqwest::StatusCode::OK {
                return Err(ProbeError::PageStatus(response.status.as_u16()));
            }

            let html = response.text();
            if let Some(href) = find_icon_href(&html, &response.final_url) {
                log::debug!(
                    "Found embedded favicon link:{} for domain:{}",
                    href,
                    ctx.target.domain
                );
                let cookie = response.cookie_header();
                return self.fetch_icon(ctx, href.as_str(), cookie.as_deref()).await;
            }

            let refresh = if allow_refresh {
                find_meta_refresh(&html, &response.final_url)
            } else {
                None
            };
            let Some(refresh) = refresh else {
                return Err(ProbeError::NoIconLink);
            };

            log::debug!(
                "Processing refresh directive:{} for domain:{}",
                refresh,
                ctx.target.domain
            );
            match self.page_link_probe(ctx, refresh.as_str(), false).await {
                Ok(icon) => Ok(icon),
                Err(e) => {
                    log::debug!("Page-link probe on refresh target {} failed: {}", refresh, e);
                    let domain = normalize(refresh.as_str())
                        .map_err(|e| ProbeError::InvalidLocation(e.to_string()))?
                        .domain;
                    self.root_probe(ctx, &domain).await
                }
            }
        })
    }
}
