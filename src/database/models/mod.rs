pub mod survey;
pub mod user;

pub use survey::{
    AnalyticsSummary, NewSurvey, Survey, SurveyPage, SurveyPatch, SurveyStatus,
};
pub use user::{NewUser, User, UserProfile};
