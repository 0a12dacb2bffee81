use std::sync::Arc;

use crate::config::AppConfig;
use crate::database::store::{SurveyStore, UserStore};
use crate::services::AuthService;

/// Application state threaded through every handler via axum `State`.
/// Built once at startup; nothing here is a process-wide singleton, so tests
/// can assemble their own instances with swapped-in stores.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub auth: AuthService,
    pub surveys: Arc<dyn SurveyStore>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        users: Arc<dyn UserStore>,
        surveys: Arc<dyn SurveyStore>,
    ) -> Self {
        let auth = AuthService::new(users, config.security.clone());
        Self {
            config: Arc::new(config),
            auth,
            surveys,
        }
    }
}
