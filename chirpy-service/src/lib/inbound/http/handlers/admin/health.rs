use axum::http::StatusCode;

/// Liveness probe. Plain text, no dependencies checked.
pub async fn health() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}
