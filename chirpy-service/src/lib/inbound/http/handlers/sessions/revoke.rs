use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::middleware::authorization;
use crate::inbound::http::router::AppState;

pub async fn revoke(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    state
        .auth_service
        .revoke(authorization(&headers)?)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
