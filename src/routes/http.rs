// GET handlers: version, api/info, api/metrics

use axum::{extract::State, response::IntoResponse};

use super::AppState;
use crate::version::{NAME, VERSION};

/// GET /version — returns service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}

/// GET /api/info — static system identity, fetched once at startup.
pub(super) async fn api_info_handler(State(state): State<AppState>) -> impl IntoResponse {
    axum::Json(state.system_info.as_ref().clone())
}

/// GET /api/metrics — one on-demand sample; the caller owns the polling cadence.
pub(super) async fn api_metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    axum::Json(state.metrics.sample_metrics().await)
}
