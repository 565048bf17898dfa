//! Prometheus metrics handler.

use axum::{
    extract::State,
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
};

use super::super::types::AppState;
use crate::error_handling::Counter;

/// Prometheus-compatible metrics endpoint
pub async fn metrics_handler(State(state): State<AppState>) -> Response {
    let counters = state.resolver.counters();
    let requests = counters.get(Counter::Requests);
    let hits = counters.get(Counter::Hits);
    let defaults = counters.get(Counter::Defaults);
    let uptime = state.start_time.elapsed().as_secs_f64();
    let hit_ratio = if requests > 0 {
        hits as f64 / requests as f64
    } else {
        0.0
    };

    let metrics = format!(
        r#"# HELP favicon_service_requests_total Favicon requests received
# TYPE favicon_service_requests_total counter
favicon_service_requests_total {}

# HELP favicon_service_cache_hits_total Requests answered from the location cache
# TYPE favicon_service_cache_hits_total counter
favicon_service_cache_hits_total {}

# HELP favicon_service_defaults_total Requests answered with the default icon
# TYPE favicon_service_defaults_total counter
favicon_service_defaults_total {}

# HELP favicon_service_cache_hit_ratio Share of requests answered from the cache (0-1)
# TYPE favicon_service_cache_hit_ratio gauge
favicon_service_cache_hit_ratio {}

# HELP favicon_service_uptime_seconds Seconds since the server started
# TYPE favicon_service_uptime_seconds gauge
favicon_service_uptime_seconds {}
"#,
        requests, hits, defaults, hit_ratio, uptime
    );

    (
        StatusCode::OK,
        [(CONTENT_TYPE, "text/plain; version=0.0.4")],
        metrics,
    )
        .into_response()
}
