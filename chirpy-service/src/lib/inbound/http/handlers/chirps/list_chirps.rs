use axum::extract::State;
use axum::http::StatusCode;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::ChirpData;
use crate::inbound::http::router::AppState;

pub async fn list_chirps(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<ChirpData>>, ApiError> {
    let chirps = state.chirp_service.list_chirps().await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        chirps.iter().map(ChirpData::from).collect(),
    ))
}
