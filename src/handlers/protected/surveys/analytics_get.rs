use axum::extract::State;
use axum::Extension;

use crate::database::models::{AnalyticsSummary, SurveyStatus};
use crate::flow;
use crate::middleware::auth::AuthUser;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /api/surveys/analytics - aggregate metrics over the caller's surveys.
/// The average eligibility rate is the mean of the per-survey flow-model
/// rate, rounded to the nearest integer.
pub async fn analytics_get(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<AnalyticsSummary> {
    let surveys = state.surveys.all_for_owner(auth_user.user_id).await?;

    let total_surveys = surveys.len() as i64;
    let published_surveys = surveys
        .iter()
        .filter(|s| s.status == SurveyStatus::Published)
        .count() as i64;
    let total_responses = surveys.iter().map(|s| s.response_count).sum();

    let avg_eligibility_rate = if surveys.is_empty() {
        0
    } else {
        let sum: u32 = surveys.iter().map(|s| flow::eligibility_rate(&s.nodes)).sum();
        (sum as f64 / surveys.len() as f64).round() as u32
    };

    Ok(ApiResponse::success(AnalyticsSummary {
        total_surveys,
        published_surveys,
        total_responses,
        avg_eligibility_rate,
    }))
}
