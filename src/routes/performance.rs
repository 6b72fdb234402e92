// /api/v1/performance handlers: thin dispatch from HTTP to the monitor

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderValue, StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use super::{AppState, ApiError};
use crate::duration::parse_duration;
use crate::models::{
    HealthResponse, MessageResponse, RequestSample, SampleRequest, TargetsRequest, now_rfc3339,
};

/// Serializes before any header is written, so an encoding failure still becomes a clean 500.
fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Result<Response, ApiError> {
    let bytes = serde_json::to_vec(body)?;
    Ok((
        status,
        [(CONTENT_TYPE, HeaderValue::from_static("application/json"))],
        bytes,
    )
        .into_response())
}

/// GET /api/v1/performance/stats
pub(super) async fn stats(State(state): State<AppState>) -> Result<Response, ApiError> {
    json_response(StatusCode::OK, &state.monitor.get_stats())
}

/// GET /api/v1/performance/health — 200 when healthy, 503 otherwise.
pub(super) async fn health(State(state): State<AppState>) -> Result<Response, ApiError> {
    let healthy = state.monitor.is_healthy();
    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    json_response(
        status,
        &HealthResponse {
            healthy,
            timestamp: now_rfc3339(),
        },
    )
}

/// GET /api/v1/performance/alerts
pub(super) async fn alerts(State(state): State<AppState>) -> Result<Response, ApiError> {
    json_response(StatusCode::OK, &state.monitor.get_alerts())
}

/// POST /api/v1/performance/reset
pub(super) async fn reset(State(state): State<AppState>) -> Result<Response, ApiError> {
    state.monitor.reset();
    tracing::info!(operation = "reset", "Performance statistics reset");
    json_response(
        StatusCode::OK,
        &MessageResponse::now("Performance statistics reset"),
    )
}

/// POST /api/v1/performance/alerts/clear
pub(super) async fn clear_alerts(State(state): State<AppState>) -> Result<Response, ApiError> {
    state.monitor.clear_alerts();
    tracing::info!(operation = "clear_alerts", "Alerts cleared");
    json_response(StatusCode::OK, &MessageResponse::now("Alerts cleared"))
}

/// POST /api/v1/performance/targets — all four fields required; nothing changes on error.
pub(super) async fn set_targets(
    State(state): State<AppState>,
    payload: Result<Json<TargetsRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(req) = payload?;
    let latency = parse_duration(&req.latency)?;
    state
        .monitor
        .set_targets(req.rps, latency, req.error_rate, req.throughput)?;
    tracing::info!(
        operation = "set_targets",
        rps = req.rps,
        latency = %req.latency,
        error_rate = req.error_rate,
        throughput = req.throughput,
        "Performance targets updated"
    );
    json_response(
        StatusCode::OK,
        &MessageResponse::now("Performance targets updated"),
    )
}

/// POST /api/v1/performance/samples — external reporters push observed requests.
/// The batch is validated as a whole before anything is recorded.
pub(super) async fn record_samples(
    State(state): State<AppState>,
    payload: Result<Json<Vec<SampleRequest>>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(batch) = payload?;
    let samples = batch
        .iter()
        .map(|s| -> Result<RequestSample, ApiError> {
            Ok(RequestSample {
                latency: parse_duration(&s.latency)?,
                bytes: s.bytes,
                is_error: s.error,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    let count = samples.len();
    for sample in samples {
        state.monitor.record(sample);
    }
    tracing::debug!(operation = "record_samples", count, "Samples recorded");
    json_response(
        StatusCode::ACCEPTED,
        &MessageResponse::now(format!("Recorded {} samples", count)),
    )
}
