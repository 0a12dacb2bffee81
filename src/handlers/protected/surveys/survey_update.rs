use axum::extract::{Path, State};
use axum::{Extension, Json};
use uuid::Uuid;

use crate::database::models::{Survey, SurveyPatch};
use crate::middleware::auth::AuthUser;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::state::AppState;

/// PUT /api/surveys/:id - merge the provided fields into the stored document.
/// Publishing sets `status` to `published`; repeating the call is a no-op.
/// There is no version check: concurrent writers overwrite whole documents.
pub async fn survey_update(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(patch): Json<SurveyPatch>,
) -> ApiResult<Survey> {
    let survey = state.surveys.update(auth_user.user_id, id, patch).await?;
    Ok(ApiResponse::success(survey))
}
