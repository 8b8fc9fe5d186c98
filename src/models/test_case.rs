//! Test case DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{require_non_blank, require_non_negative};
use crate::entity::test_case;
use crate::error::AppResult;

/// Estimate used when the request does not carry one.
pub const DEFAULT_ESTIMATE_MINUTES: i32 = 1;

/// Request body for `POST /versiones/{versionId}/casos`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateTestCaseRequest {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "pasos")]
    pub steps: String,
    #[serde(rename = "resultadoEsperado")]
    pub expected_result: String,
    #[serde(rename = "prioridad")]
    pub priority: String,
    /// Estimated minutes, defaults to 1.
    #[serde(rename = "estimado", default)]
    pub estimate_minutes: Option<i32>,
    #[serde(rename = "asignadoA")]
    pub assignee: String,
}

impl CreateTestCaseRequest {
    pub fn validate(&self) -> AppResult<()> {
        require_non_blank("titulo", &self.title)?;
        require_non_blank("pasos", &self.steps)?;
        require_non_blank("resultadoEsperado", &self.expected_result)?;
        require_non_blank("prioridad", &self.priority)?;
        require_non_blank("asignadoA", &self.assignee)?;
        if let Some(minutes) = self.estimate_minutes {
            require_non_negative("estimado", minutes)?;
        }
        Ok(())
    }
}

/// A test case as returned by the API.
#[derive(Debug, Serialize, ToSchema)]
pub struct TestCaseResponse {
    pub id: i32,
    #[serde(rename = "versionId")]
    pub version_id: i32,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "pasos")]
    pub steps: String,
    #[serde(rename = "resultadoEsperado")]
    pub expected_result: String,
    #[serde(rename = "prioridad")]
    pub priority: String,
    #[serde(rename = "estimado")]
    pub estimate_minutes: i32,
    #[serde(rename = "asignadoA")]
    pub assignee: String,
    #[serde(rename = "creadoEn")]
    pub created_at: DateTime<Utc>,
}

impl From<test_case::Model> for TestCaseResponse {
    fn from(m: test_case::Model) -> Self {
        Self {
            id: m.id,
            version_id: m.version_id,
            title: m.title,
            steps: m.steps,
            expected_result: m.expected_result,
            priority: m.priority,
            estimate_minutes: m.estimate_minutes,
            assignee: m.assignee,
            created_at: m.created_at,
        }
    }
}

/// Response for `DELETE /casos/{id}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteTestCaseResponse {
    #[serde(rename = "mensaje")]
    pub message: String,
    pub id: i32,
}
