//! Execution DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use super::evidence::EvidenceResponse;
use super::{dates, require_non_blank, require_non_negative};
use crate::entity::{evidence, execution};
use crate::error::AppResult;

/// Request body for `POST /casos/{casoId}/ejecuciones`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateExecutionRequest {
    /// Who ran the test; numbers are accepted and stored as text.
    #[serde(rename = "usuarioId", deserialize_with = "string_or_number")]
    #[schema(value_type = String)]
    pub user_id: String,
    /// Free text outcome, e.g. "Exitoso" or "Fallido".
    #[serde(rename = "estado")]
    pub status: String,
    /// Minutes actually spent, defaults to 0.
    #[serde(rename = "tiempoReal", default)]
    pub actual_time_minutes: Option<i32>,
    #[serde(rename = "observaciones", default)]
    pub notes: Option<String>,
    /// Defaults to the creation time.
    #[serde(
        rename = "fecha",
        default,
        deserialize_with = "dates::deserialize_optional"
    )]
    pub date: Option<DateTime<Utc>>,
}

impl CreateExecutionRequest {
    pub fn validate(&self) -> AppResult<()> {
        require_non_blank("usuarioId", &self.user_id)?;
        require_non_blank("estado", &self.status)?;
        if let Some(minutes) = self.actual_time_minutes {
            require_non_negative("tiempoReal", minutes)?;
        }
        Ok(())
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}

/// An execution with its evidence.
#[derive(Debug, Serialize, ToSchema)]
pub struct ExecutionResponse {
    pub id: i32,
    #[serde(rename = "casoId")]
    pub test_case_id: i32,
    #[serde(rename = "usuarioId")]
    pub user_id: String,
    #[serde(rename = "fecha")]
    pub date: DateTime<Utc>,
    #[serde(rename = "estado")]
    pub status: String,
    #[serde(rename = "tiempoReal")]
    pub actual_time_minutes: i32,
    #[serde(rename = "observaciones")]
    pub notes: Option<String>,
    #[serde(rename = "evidencias")]
    pub evidence: Vec<EvidenceResponse>,
}

impl ExecutionResponse {
    pub fn new(execution: execution::Model, evidence: Vec<evidence::Model>) -> Self {
        Self {
            id: execution.id,
            test_case_id: execution.test_case_id,
            user_id: execution.user_id,
            date: execution.date,
            status: execution.status,
            actual_time_minutes: execution.actual_time_minutes,
            notes: execution.notes,
            evidence: evidence.into_iter().map(EvidenceResponse::from).collect(),
        }
    }
}
