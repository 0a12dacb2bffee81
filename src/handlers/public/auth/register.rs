use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::database::models::UserProfile;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserProfile,
}

/// POST /api/auth/register - create an account and issue the first token pair
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<RegisterResponse> {
    payload.validate()?;

    let (tokens, user) = state
        .auth
        .register(&payload.name, &payload.email, &payload.password)
        .await?;

    Ok(ApiResponse::created(RegisterResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        user: user.profile(),
    }))
}
