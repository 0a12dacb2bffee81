use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::database::models::{NewSurvey, Survey, SurveyPage, SurveyPatch, SurveyStatus};
use crate::database::store::{StoreError, SurveyStore};
use crate::flow::{Edge, Node};

const SURVEY_COLUMNS: &str =
    "id, owner_id, title, description, status, nodes, edges, response_count, created_at, updated_at";

/// Row shape with JSONB documents still wrapped; converted into the domain
/// `Survey` on the way out.
#[derive(Debug, FromRow)]
struct SurveyRow {
    id: Uuid,
    owner_id: Uuid,
    title: String,
    description: String,
    status: String,
    nodes: Json<Vec<Node>>,
    edges: Json<Vec<Edge>>,
    response_count: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<SurveyRow> for Survey {
    type Error = StoreError;

    fn try_from(row: SurveyRow) -> Result<Self, StoreError> {
        // The status column carries a CHECK constraint, so this only fails on
        // documents written outside the API.
        let status = SurveyStatus::parse(&row.status)
            .ok_or_else(|| StoreError::InvalidDocument(format!("status '{}'", row.status)))?;

        Ok(Survey {
            id: row.id,
            owner_id: row.owner_id,
            title: row.title,
            description: row.description,
            status,
            nodes: row.nodes.0,
            edges: row.edges.0,
            response_count: row.response_count,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

pub struct PgSurveyStore {
    pool: PgPool,
}

impl PgSurveyStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SurveyStore for PgSurveyStore {
    async fn insert(&self, owner_id: Uuid, new_survey: NewSurvey) -> Result<Survey, StoreError> {
        let sql = format!(
            "INSERT INTO surveys (id, owner_id, title, description) \
             VALUES ($1, $2, $3, $4) RETURNING {SURVEY_COLUMNS}"
        );

        let row = sqlx::query_as::<_, SurveyRow>(&sql)
            .bind(Uuid::new_v4())
            .bind(owner_id)
            .bind(&new_survey.title)
            .bind(&new_survey.description)
            .fetch_one(&self.pool)
            .await?;

        row.try_into()
    }

    async fn page(&self, owner_id: Uuid, page: u32, limit: u32) -> Result<SurveyPage, StoreError> {
        let offset = (page.saturating_sub(1) as i64) * limit as i64;

        let sql = format!(
            "SELECT {SURVEY_COLUMNS} FROM surveys WHERE owner_id = $1 \
             ORDER BY updated_at DESC LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, SurveyRow>(&sql)
            .bind(owner_id)
            .bind(limit as i64)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        let (total,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM surveys WHERE owner_id = $1")
                .bind(owner_id)
                .fetch_one(&self.pool)
                .await?;

        let surveys = rows
            .into_iter()
            .map(Survey::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SurveyPage {
            surveys,
            page,
            limit,
            total,
        })
    }

    async fn all_for_owner(&self, owner_id: Uuid) -> Result<Vec<Survey>, StoreError> {
        let sql = format!(
            "SELECT {SURVEY_COLUMNS} FROM surveys WHERE owner_id = $1 ORDER BY created_at"
        );
        let rows = sqlx::query_as::<_, SurveyRow>(&sql)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Survey::try_from).collect()
    }

    async fn get(&self, owner_id: Uuid, id: Uuid) -> Result<Survey, StoreError> {
        let sql = format!(
            "SELECT {SURVEY_COLUMNS} FROM surveys WHERE owner_id = $1 AND id = $2"
        );
        let row = sqlx::query_as::<_, SurveyRow>(&sql)
            .bind(owner_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound("Survey not found".to_string()))?;

        row.try_into()
    }

    async fn update(
        &self,
        owner_id: Uuid,
        id: Uuid,
        patch: SurveyPatch,
    ) -> Result<Survey, StoreError> {
        // Whole-document merge; absent fields keep their stored value.
        let sql = format!(
            "UPDATE surveys SET \
                title = COALESCE($3, title), \
                description = COALESCE($4, description), \
                nodes = COALESCE($5, nodes), \
                edges = COALESCE($6, edges), \
                status = COALESCE($7, status), \
                updated_at = now() \
             WHERE owner_id = $1 AND id = $2 RETURNING {SURVEY_COLUMNS}"
        );

        let row = sqlx::query_as::<_, SurveyRow>(&sql)
            .bind(owner_id)
            .bind(id)
            .bind(patch.title)
            .bind(patch.description)
            .bind(patch.nodes.map(Json))
            .bind(patch.edges.map(Json))
            .bind(patch.status.map(|s| s.as_str()))
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound("Survey not found".to_string()))?;

        row.try_into()
    }

    async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM surveys WHERE owner_id = $1 AND id = $2")
            .bind(owner_id)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound("Survey not found".to_string()));
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
