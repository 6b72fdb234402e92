// API error type: maps client and collaborator failures to HTTP status codes

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::duration::DurationError;
use crate::models::ErrorResponse;
use crate::monitor::MonitorError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("malformed request body: {0}")]
    MalformedBody(#[from] JsonRejection),

    #[error("invalid latency: {0}")]
    InvalidLatency(#[from] DurationError),

    #[error("{0}")]
    InvalidTarget(#[from] MonitorError),

    #[error("response serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MalformedBody(_)
            | ApiError::InvalidLatency(_)
            | ApiError::InvalidTarget(_) => StatusCode::BAD_REQUEST,
            ApiError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Serialization(e) => {
                tracing::error!(error = %e, "response serialization failed");
                "An internal error occurred".to_string()
            }
            other => {
                tracing::debug!(error = %other, "request rejected");
                other.to_string()
            }
        };
        (
            status,
            axum::Json(ErrorResponse {
                error: true,
                message,
            }),
        )
            .into_response()
    }
}
