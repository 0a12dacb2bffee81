use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::json;

/// Successful API response wrapped in the `{ success, data }` envelope.
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    data: T,
    status: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    /// 200 OK
    pub fn success(data: T) -> Self {
        Self {
            data,
            status: StatusCode::OK,
        }
    }

    /// 201 Created
    pub fn created(data: T) -> Self {
        Self {
            data,
            status: StatusCode::CREATED,
        }
    }
}

impl ApiResponse<()> {
    /// 204 No Content; the envelope is omitted entirely.
    pub fn no_content() -> Self {
        Self {
            data: (),
            status: StatusCode::NO_CONTENT,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        if self.status == StatusCode::NO_CONTENT {
            return self.status.into_response();
        }

        match serde_json::to_value(&self.data) {
            Ok(value) => (
                self.status,
                Json(json!({ "success": true, "data": value })),
            )
                .into_response(),
            Err(e) => {
                tracing::error!("failed to serialize response body: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": true,
                        "message": "Failed to serialize response",
                        "code": "INTERNAL_SERVER_ERROR",
                    })),
                )
                    .into_response()
            }
        }
    }
}

/// Handler result: success envelope or `ApiError` translated at the boundary.
pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::ApiError>;
