//! JSON status handler.

use axum::{extract::State, Json};

use super::super::types::{AppState, StatusResponse};

/// JSON status endpoint with the request counters
pub async fn status_handler(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok",
        counters: state.resolver.counters().snapshot(),
    })
}
