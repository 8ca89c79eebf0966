use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::domain::session::models::UpdateCredentialsCommand;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::UserData;
use crate::inbound::http::middleware::authorization;
use crate::inbound::http::router::AppState;

/// Replace the caller's email and password.
///
/// An anonymous caller sees 401 rather than a validation error.
pub async fn update_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<UpdateUserRequest>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let command = UpdateCredentialsCommand {
        email: body.email,
        password: body.password,
    };

    state
        .auth_service
        .change_password(authorization(&headers)?, command)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}

#[derive(Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateUserRequest {
    email: String,
    password: String,
}
