//! Cache invalidation handler.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::super::types::{AppState, ClearQuery};

/// Drops the cached outcome for `url`'s domain.
pub async fn clear_handler(
    State(state): State<AppState>,
    Query(query): Query<ClearQuery>,
) -> Response {
    let Some(url) = query.url.as_deref() else {
        return (StatusCode::BAD_REQUEST, "Missing url parameter").into_response();
    };

    match state.resolver.clear(url).await {
        Ok(domain) => (StatusCode::OK, format!("Evicted cache entry for {domain}")).into_response(),
        Err(e) => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    }
}
