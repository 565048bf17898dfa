//! Top-level redirect resolution.

use super::normalize;
use crate::fetch::{Deadline, Fetcher};

/// Follows `domain`'s transport-level redirects and returns the domain the
/// chain ends on.
///
/// Best-effort: on any transport error, timeout, or unparseable final URL the
/// original domain is returned unchanged.
pub async fn resolve_redirect(fetcher: &Fetcher, domain: &str, deadline: &Deadline) -> String {
    let final_url = match fetcher.final_url(domain, deadline).await {
        Ok(url) => url,
        Err(e) => {
            log::warn!("Could not resolve redirect for {}: {}", domain, e);
            return domain.to_string();
        }
    };

    match normalize(final_url.as_str()) {
        Ok(target) if target.domain != domain => {
            log::debug!("{} redirects to {}", domain, target.domain);
            target.domain
        }
        Ok(_) => domain.to_string(),
        Err(e) => {
            log::warn!(
                "Redirect of {} ended on unusable URL {}: {}",
                domain,
                final_url,
                e
            );
            domain.to_string()
        }
    }
}
