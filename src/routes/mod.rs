// HTTP + WebSocket routes

mod error;
mod http;
mod middleware;
mod performance;
mod ws;

pub use error::ApiError;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::AppConfig;
use crate::monitor::PerformanceMonitor;
use middleware::Recorder;

/// The monitor's own surface; `app()` does not record requests under these paths.
pub const UNRECORDED_PREFIXES: &[&str] = &["/api/v1/performance", "/ws/performance"];

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) monitor: Arc<PerformanceMonitor>,
    pub(crate) config: AppConfig,
}

pub fn app(monitor: Arc<PerformanceMonitor>, config: AppConfig) -> Router {
    let state = AppState {
        monitor: monitor.clone(),
        config,
    };
    Router::new()
        .route("/", get(|| async { "perfwatch: performance monitor" })) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .route("/api/v1/performance/stats", get(performance::stats)) // GET stats
        .route("/api/v1/performance/health", get(performance::health)) // GET health
        .route("/api/v1/performance/alerts", get(performance::alerts)) // GET alerts
        .route("/api/v1/performance/alerts/clear", post(performance::clear_alerts)) // POST clear
        .route("/api/v1/performance/reset", post(performance::reset)) // POST reset
        .route("/api/v1/performance/targets", post(performance::set_targets)) // POST targets
        .route("/api/v1/performance/samples", post(performance::record_samples)) // POST samples
        .route("/ws/performance", get(ws::ws_performance)) // WS /ws/performance
        .fallback(http::not_found)
        .layer(from_fn_with_state(
            Recorder {
                monitor,
                skip: UNRECORDED_PREFIXES,
            },
            middleware::record_request,
        ))
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}

/// Wraps any router so every request it serves is recorded by `monitor`, with no
/// paths excluded. Use this to observe an application's own traffic.
pub fn instrument<S>(router: Router<S>, monitor: Arc<PerformanceMonitor>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(from_fn_with_state(
        Recorder { monitor, skip: &[] },
        middleware::record_request,
    ))
}
