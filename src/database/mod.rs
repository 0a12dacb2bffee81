pub mod models;
pub mod store;
pub mod surveys;
pub mod users;

pub use store::{StoreError, SurveyStore, UserStore};
