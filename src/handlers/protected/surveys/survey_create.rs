use axum::extract::State;
use axum::{Extension, Json};
use serde::Deserialize;
use validator::Validate;

use crate::database::models::{NewSurvey, Survey};
use crate::middleware::auth::AuthUser;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateSurveyRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// POST /api/surveys - create an empty draft survey owned by the caller
pub async fn survey_create(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(payload): Json<CreateSurveyRequest>,
) -> ApiResult<Survey> {
    payload.validate()?;

    let survey = state
        .surveys
        .insert(
            auth_user.user_id,
            NewSurvey {
                title: payload.title,
                description: payload.description,
            },
        )
        .await?;

    Ok(ApiResponse::created(survey))
}
