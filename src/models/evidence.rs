//! Evidence DTOs.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::entity::evidence;

/// An evidence image as returned by the API.
#[derive(Debug, Serialize, ToSchema)]
pub struct EvidenceResponse {
    pub id: i32,
    #[serde(rename = "ejecucionId")]
    pub execution_id: i32,
    /// Path under which the image is served, e.g. `/uploads/<name>.png`.
    pub url: String,
    #[serde(rename = "descripcion")]
    pub description: Option<String>,
    #[serde(rename = "creadoEn")]
    pub created_at: DateTime<Utc>,
}

impl From<evidence::Model> for EvidenceResponse {
    fn from(m: evidence::Model) -> Self {
        Self {
            id: m.id,
            execution_id: m.execution_id,
            url: m.url,
            description: m.description,
            created_at: m.created_at,
        }
    }
}
