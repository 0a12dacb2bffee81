//! In-memory store implementations and a router harness for tests that need
//! the full stack without a database.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::Utc;
use serde_json::Value;
use tokio::sync::RwLock;
use tower::ServiceExt;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::database::models::{
    NewSurvey, NewUser, Survey, SurveyPage, SurveyPatch, User,
};
use crate::database::store::{StoreError, SurveyStore, UserStore};
use crate::routes;
use crate::state::AppState;

#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<Vec<User>>,
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, new_user: NewUser) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == new_user.email) {
            return Err(StoreError::Conflict("User already exists".to_string()));
        }
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: new_user.name,
            email: new_user.email,
            password_hash: new_user.password_hash,
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }
}

#[derive(Default)]
pub struct MemorySurveyStore {
    surveys: RwLock<Vec<Survey>>,
}

#[async_trait]
impl SurveyStore for MemorySurveyStore {
    async fn insert(&self, owner_id: Uuid, new_survey: NewSurvey) -> Result<Survey, StoreError> {
        let now = Utc::now();
        let survey = Survey {
            id: Uuid::new_v4(),
            owner_id,
            title: new_survey.title,
            description: new_survey.description,
            status: Default::default(),
            nodes: Vec::new(),
            edges: Vec::new(),
            response_count: 0,
            created_at: now,
            updated_at: now,
        };
        self.surveys.write().await.push(survey.clone());
        Ok(survey)
    }

    async fn page(&self, owner_id: Uuid, page: u32, limit: u32) -> Result<SurveyPage, StoreError> {
        let surveys = self.surveys.read().await;
        let mut owned: Vec<Survey> = surveys
            .iter()
            .filter(|s| s.owner_id == owner_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

        let total = owned.len() as i64;
        let offset = (page.saturating_sub(1) as usize) * limit as usize;
        let surveys = owned
            .into_iter()
            .skip(offset)
            .take(limit as usize)
            .collect();

        Ok(SurveyPage {
            surveys,
            page,
            limit,
            total,
        })
    }

    async fn all_for_owner(&self, owner_id: Uuid) -> Result<Vec<Survey>, StoreError> {
        let surveys = self.surveys.read().await;
        Ok(surveys
            .iter()
            .filter(|s| s.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn get(&self, owner_id: Uuid, id: Uuid) -> Result<Survey, StoreError> {
        let surveys = self.surveys.read().await;
        surveys
            .iter()
            .find(|s| s.owner_id == owner_id && s.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound("Survey not found".to_string()))
    }

    async fn update(
        &self,
        owner_id: Uuid,
        id: Uuid,
        patch: SurveyPatch,
    ) -> Result<Survey, StoreError> {
        let mut surveys = self.surveys.write().await;
        let survey = surveys
            .iter_mut()
            .find(|s| s.owner_id == owner_id && s.id == id)
            .ok_or_else(|| StoreError::NotFound("Survey not found".to_string()))?;

        if let Some(title) = patch.title {
            survey.title = title;
        }
        if let Some(description) = patch.description {
            survey.description = description;
        }
        if let Some(nodes) = patch.nodes {
            survey.nodes = nodes;
        }
        if let Some(edges) = patch.edges {
            survey.edges = edges;
        }
        if let Some(status) = patch.status {
            survey.status = status;
        }
        survey.updated_at = Utc::now();

        Ok(survey.clone())
    }

    async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<(), StoreError> {
        let mut surveys = self.surveys.write().await;
        let before = surveys.len();
        surveys.retain(|s| !(s.owner_id == owner_id && s.id == id));
        if surveys.len() == before {
            return Err(StoreError::NotFound("Survey not found".to_string()));
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// App state over in-memory stores with the development config.
pub fn test_state() -> AppState {
    AppState::new(
        AppConfig::development(),
        Arc::new(MemoryUserStore::default()),
        Arc::new(MemorySurveyStore::default()),
    )
}

/// The real router wired to in-memory stores.
pub fn test_app() -> Router {
    routes::app(test_state())
}

/// Issue one request against the router and return status plus parsed body.
pub async fn send(
    app: Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(value) => builder
            .header("content-type", "application/json")
            .body(Body::from(value.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request builder");

    let response = app.oneshot(request).await.expect("router call");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, value)
}
