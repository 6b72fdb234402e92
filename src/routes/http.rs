// GET handlers: version, fallback

use axum::{http::StatusCode, response::IntoResponse};

use crate::models::ErrorResponse;
use crate::version::{NAME, VERSION};

/// GET /version — returns service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}

pub(super) async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        axum::Json(ErrorResponse {
            error: true,
            message: "Not found".to_string(),
        }),
    )
}
