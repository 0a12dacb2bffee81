use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::flow::{Edge, Node};

/// Survey lifecycle. The only transition is `draft -> published`, one-way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurveyStatus {
    #[default]
    Draft,
    Published,
}

impl SurveyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SurveyStatus::Draft => "draft",
            SurveyStatus::Published => "published",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "draft" => Some(SurveyStatus::Draft),
            "published" => Some(SurveyStatus::Published),
            _ => None,
        }
    }
}

impl std::fmt::Display for SurveyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted eligibility-flow document. `nodes` and `edges` are stored as
/// JSONB documents, one row per survey.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Survey {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub description: String,
    pub status: SurveyStatus,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub response_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a survey; it starts as an empty draft.
#[derive(Debug, Clone)]
pub struct NewSurvey {
    pub title: String,
    pub description: String,
}

/// Partial update applied by `PUT /api/surveys/:id`. Absent fields keep their
/// stored value; the whole document is merged and rewritten (last writer
/// wins).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SurveyPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub nodes: Option<Vec<Node>>,
    pub edges: Option<Vec<Edge>>,
    pub status: Option<SurveyStatus>,
}

/// One page of the caller's surveys.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyPage {
    pub surveys: Vec<Survey>,
    pub page: u32,
    pub limit: u32,
    pub total: i64,
}

/// Aggregate metrics over the caller's surveys.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub total_surveys: i64,
    pub published_surveys: i64,
    pub total_responses: i64,
    pub avg_eligibility_rate: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(SurveyStatus::Published).unwrap(),
            serde_json::json!("published")
        );
        assert_eq!(SurveyStatus::parse("draft"), Some(SurveyStatus::Draft));
        assert_eq!(SurveyStatus::parse("archived"), None);
    }

    #[test]
    fn patch_deserializes_partial_bodies() {
        let patch: SurveyPatch = serde_json::from_value(serde_json::json!({
            "status": "published"
        }))
        .unwrap();
        assert_eq!(patch.status, Some(SurveyStatus::Published));
        assert!(patch.title.is_none());
        assert!(patch.nodes.is_none());
    }
}
