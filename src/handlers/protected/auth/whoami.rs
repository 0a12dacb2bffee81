use axum::extract::State;
use axum::Extension;

use crate::database::models::UserProfile;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /api/auth/whoami - profile of the authenticated user. A valid token
/// whose user has since been removed reports 401, not 404.
pub async fn whoami(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<UserProfile> {
    let user = state
        .auth
        .profile(auth_user.user_id)
        .await?
        .ok_or_else(|| ApiError::unauthorized("User not found"))?;

    Ok(ApiResponse::success(user.profile()))
}
