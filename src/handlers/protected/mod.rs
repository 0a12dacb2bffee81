pub mod auth;
pub mod surveys;
