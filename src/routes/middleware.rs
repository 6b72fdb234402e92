// Request-recording middleware: the live-traffic ingestion path into the monitor

use axum::{
    body::HttpBody,
    extract::{Request, State},
    http::header::CONTENT_LENGTH,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use std::time::Instant;

use crate::models::RequestSample;
use crate::monitor::PerformanceMonitor;

/// Middleware state: the monitor to feed and the path prefixes left unrecorded.
#[derive(Clone)]
pub(super) struct Recorder {
    pub(super) monitor: Arc<PerformanceMonitor>,
    pub(super) skip: &'static [&'static str],
}

impl Recorder {
    fn skips(&self, path: &str) -> bool {
        self.skip.iter().any(|prefix| under_prefix(path, prefix))
    }
}

/// True when `path` is `prefix` itself or lies below it on a segment boundary.
fn under_prefix(path: &str, prefix: &str) -> bool {
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

/// Times the inner service and records latency, response size and 5xx status.
/// Streaming bodies without a known length count as zero bytes.
pub(super) async fn record_request(
    State(recorder): State<Recorder>,
    request: Request,
    next: Next,
) -> Response {
    if recorder.skips(request.uri().path()) {
        return next.run(request).await;
    }

    let started = Instant::now();
    let response = next.run(request).await;
    let bytes = response
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .or_else(|| response.body().size_hint().exact())
        .unwrap_or(0);
    recorder.monitor.record(RequestSample {
        latency: started.elapsed(),
        bytes,
        is_error: response.status().is_server_error(),
    });
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_matches_whole_segments_only() {
        assert!(under_prefix("/api/v1/performance", "/api/v1/performance"));
        assert!(under_prefix("/api/v1/performance/stats", "/api/v1/performance"));
        assert!(!under_prefix("/api/v1/performance-report", "/api/v1/performance"));
        assert!(!under_prefix("/api/v1", "/api/v1/performance"));
        assert!(under_prefix("/ws/performance", "/ws/performance"));
        assert!(!under_prefix("/ws/chat", "/ws/performance"));
    }
}
