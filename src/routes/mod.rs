// HTTP + WebSocket routes

mod http;
mod ws;

use axum::{Router, routing::get};
use std::sync::Arc;
use tokio::sync::broadcast;
use tower_http::cors::{Any, CorsLayer};

use crate::models::{MetricsSnapshot, SystemInfo};
use crate::service::MetricsService;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) metrics_tx: broadcast::Sender<MetricsSnapshot>,
    pub(crate) metrics: Arc<MetricsService>,
    pub(crate) system_info: Arc<SystemInfo>,
}

pub fn app(
    metrics_tx: broadcast::Sender<MetricsSnapshot>,
    metrics: Arc<MetricsService>,
    system_info: Arc<SystemInfo>,
) -> Router {
    let state = AppState {
        metrics_tx,
        metrics,
        system_info,
    };
    Router::new()
        .route("/", get(|| async { "hostmetrics" })) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .route("/api/info", get(http::api_info_handler)) // GET /api/info
        .route("/api/metrics", get(http::api_metrics_handler)) // GET /api/metrics
        .route("/ws/metrics", get(ws::ws_metrics)) // WS /ws/metrics
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
