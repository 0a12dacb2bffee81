use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::database::models::{NewSurvey, NewUser, Survey, SurveyPage, SurveyPatch, User};

/// Errors from the persistence layer.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Invalid stored document: {0}")]
    InvalidDocument(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// User persistence seam. Production uses Postgres; tests swap in an
/// in-memory implementation.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert(&self, new_user: NewUser) -> Result<User, StoreError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;
}

/// Survey persistence seam. Every operation is scoped to the owning user; a
/// survey belonging to someone else behaves exactly like a missing one.
#[async_trait]
pub trait SurveyStore: Send + Sync {
    async fn insert(&self, owner_id: Uuid, new_survey: NewSurvey) -> Result<Survey, StoreError>;
    async fn page(&self, owner_id: Uuid, page: u32, limit: u32) -> Result<SurveyPage, StoreError>;
    /// All surveys of one owner, for analytics aggregation.
    async fn all_for_owner(&self, owner_id: Uuid) -> Result<Vec<Survey>, StoreError>;
    async fn get(&self, owner_id: Uuid, id: Uuid) -> Result<Survey, StoreError>;
    async fn update(
        &self,
        owner_id: Uuid,
        id: Uuid,
        patch: SurveyPatch,
    ) -> Result<Survey, StoreError>;
    async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<(), StoreError>;
    /// Connectivity probe for the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;
}
