use axum::extract::{Path, State};
use axum::Extension;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::state::AppState;

/// DELETE /api/surveys/:id - remove the document, 204 on success
pub async fn survey_delete(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<()> {
    state.surveys.delete(auth_user.user_id, id).await?;
    Ok(ApiResponse::no_content())
}
