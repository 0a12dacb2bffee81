use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub access_token: String,
}

/// POST /api/auth/refresh - exchange a refresh token for a new access token.
/// A missing, malformed, expired or orphaned token all report the same
/// generic 401.
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> ApiResult<RefreshResponse> {
    let token = payload
        .refresh_token
        .as_deref()
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::unauthorized("Invalid refresh token"))?;

    let access_token = state.auth.refresh(token).await?;

    Ok(ApiResponse::success(RefreshResponse { access_token }))
}
