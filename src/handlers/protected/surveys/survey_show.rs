use axum::extract::{Path, State};
use axum::Extension;
use uuid::Uuid;

use crate::database::models::Survey;
use crate::middleware::auth::AuthUser;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /api/surveys/:id - full survey document, owner-scoped
pub async fn survey_show(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<Survey> {
    let survey = state.surveys.get(auth_user.user_id, id).await?;
    Ok(ApiResponse::success(survey))
}
