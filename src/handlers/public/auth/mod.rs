mod login;
mod logout;
mod refresh;
mod register;

pub use login::{login, LoginRequest, LoginResponse};
pub use logout::logout;
pub use refresh::{refresh, RefreshRequest, RefreshResponse};
pub use register::{register, RegisterRequest, RegisterResponse};
