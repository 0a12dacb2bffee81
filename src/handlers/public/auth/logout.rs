use serde_json::{json, Value};

use crate::middleware::response::{ApiResponse, ApiResult};

/// POST /api/auth/logout - stateless acknowledgment. No token is revoked
/// server-side; clients drop their stored session and short-lived access
/// tokens age out on their own.
pub async fn logout() -> ApiResult<Value> {
    Ok(ApiResponse::success(json!({
        "message": "Logged out successfully"
    })))
}
