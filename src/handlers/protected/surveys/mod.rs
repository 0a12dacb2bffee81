mod analytics_get;
mod survey_create;
mod survey_delete;
mod survey_list;
mod survey_show;
mod survey_update;

pub use analytics_get::analytics_get;
pub use survey_create::{survey_create, CreateSurveyRequest};
pub use survey_delete::survey_delete;
pub use survey_list::{survey_list, ListQuery};
pub use survey_show::survey_show;
pub use survey_update::survey_update;
