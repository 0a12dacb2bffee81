pub mod auth;
pub mod response;

pub use auth::{jwt_auth, AuthUser};
pub use response::{ApiResponse, ApiResult};
