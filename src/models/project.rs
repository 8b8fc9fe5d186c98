//! Project DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::require_non_blank;
use crate::entity::project;
use crate::error::AppResult;

/// Request body for `POST /proyectos`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateProjectRequest {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "cliente")]
    pub client: String,
    #[serde(rename = "responsable")]
    pub owner: String,
    /// Defaults to `true`.
    #[serde(rename = "activo", default)]
    pub active: Option<bool>,
}

impl CreateProjectRequest {
    pub fn validate(&self) -> AppResult<()> {
        require_non_blank("nombre", &self.name)?;
        require_non_blank("cliente", &self.client)?;
        require_non_blank("responsable", &self.owner)
    }
}

/// A project as returned by the API.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectResponse {
    pub id: i32,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "cliente")]
    pub client: String,
    #[serde(rename = "responsable")]
    pub owner: String,
    #[serde(rename = "activo")]
    pub active: bool,
    #[serde(rename = "creadoEn")]
    pub created_at: DateTime<Utc>,
}

impl From<project::Model> for ProjectResponse {
    fn from(m: project::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            client: m.client,
            owner: m.owner,
            active: m.active,
            created_at: m.created_at,
        }
    }
}
