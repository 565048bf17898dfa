//! Favicon handler.

use axum::{
    extract::{Query, State},
    http::{
        header::{CACHE_CONTROL, CONTENT_TYPE, EXPIRES},
        HeaderMap, HeaderValue, StatusCode,
    },
    response::{IntoResponse, Response},
};

use super::super::types::{AppState, IconQuery};
use crate::config::BROWSER_CACHE_MAX_AGE_SECS;
use crate::resolver::Resolution;

/// HTTP-date format used for `Expires`.
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Resolves `url` and answers with the icon bytes.
///
/// Only a malformed `url` produces an error response (400); every other
/// failure has already been turned into the default icon.
pub async fn icon_handler(
    State(state): State<AppState>,
    Query(query): Query<IconQuery>,
) -> Response {
    let Some(url) = query.url.as_deref() else {
        return (StatusCode::BAD_REQUEST, "Missing url parameter").into_response();
    };

    match state.resolver.resolve(url, query.skip_cache()).await {
        Ok(resolution) => icon_response(resolution),
        Err(e) => {
            log::debug!("Rejected request for {}: {}", url, e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}

fn icon_response(resolution: Resolution) -> Response {
    let expires = chrono::Utc::now() + chrono::Duration::seconds(BROWSER_CACHE_MAX_AGE_SECS);

    let mut headers = HeaderMap::new();
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_str(&resolution.icon.mime_type)
            .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream")),
    );
    if let Ok(value) =
        HeaderValue::from_str(&format!("public, max-age={}", BROWSER_CACHE_MAX_AGE_SECS))
    {
        headers.insert(CACHE_CONTROL, value);
    }
    if let Ok(value) = HeaderValue::from_str(&expires.format(HTTP_DATE_FORMAT).to_string()) {
        headers.insert(EXPIRES, value);
    }
    if resolution.cache_hit {
        headers.insert("x-cache", HeaderValue::from_static("Hit"));
    }

    (StatusCode::OK, headers, resolution.icon.data).into_response()
}
