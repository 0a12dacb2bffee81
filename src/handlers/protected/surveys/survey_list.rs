use axum::extract::{Query, State};
use axum::Extension;
use serde::Deserialize;

use crate::database::models::SurveyPage;
use crate::middleware::auth::AuthUser;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// GET /api/surveys?page=&limit= - paginated listing of the caller's surveys,
/// newest changes first. The limit is clamped server-side.
pub async fn survey_list(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<ListQuery>,
) -> ApiResult<SurveyPage> {
    let api = &state.config.api;
    let page = query.page.unwrap_or(1).max(1);
    let limit = query
        .limit
        .unwrap_or(api.default_page_size)
        .clamp(1, api.max_page_size);

    let surveys = state.surveys.page(auth_user.user_id, page, limit).await?;

    Ok(ApiResponse::success(surveys))
}
