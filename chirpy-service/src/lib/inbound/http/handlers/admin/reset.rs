use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Delete every user, and with them every chirp and refresh token.
///
/// Refused outside the dev platform.
pub async fn reset(
    State(state): State<AppState>,
) -> Result<ApiSuccess<ResetResponseData>, ApiError> {
    if !state.platform.is_dev() {
        tracing::warn!(platform = ?state.platform, "Reset refused");
        return Err(ApiError::Forbidden(
            "Reset is only allowed in dev environment".to_string(),
        ));
    }

    let deleted_users = state.auth_service.reset().await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ResetResponseData { deleted_users },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResetResponseData {
    pub deleted_users: u64,
}
