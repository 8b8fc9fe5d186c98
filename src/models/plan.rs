//! Test plan DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::require_non_blank;
use super::version::VersionResponse;
use crate::entity::{plan, version};
use crate::error::{AppError, AppResult};

/// Request body for `POST /proyectos/{id}/planes`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreatePlanRequest {
    #[serde(rename = "nombre")]
    pub name: String,
    /// Free text, the UI offers "Alta", "Media" and "Baja".
    #[serde(rename = "criticidad")]
    pub criticality: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "responsable")]
    pub owner: String,
}

impl CreatePlanRequest {
    pub fn validate(&self) -> AppResult<()> {
        require_non_blank("nombre", &self.name)?;
        require_non_blank("criticidad", &self.criticality)?;
        require_non_blank("responsable", &self.owner)
    }
}

/// Request body for `POST /planes`, the project id travels in the body.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreatePlanForProjectRequest {
    #[serde(rename = "proyectoId")]
    pub project_id: i32,
    #[serde(flatten)]
    pub plan: CreatePlanRequest,
}

/// Request body for `PUT /planes/{id}`. Omitted fields keep their value.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdatePlanRequest {
    #[serde(rename = "nombre")]
    pub name: Option<String>,
    #[serde(rename = "criticidad")]
    pub criticality: Option<String>,
    #[serde(rename = "descripcion")]
    pub description: Option<String>,
    #[serde(rename = "responsable")]
    pub owner: Option<String>,
}

impl UpdatePlanRequest {
    pub fn validate(&self) -> AppResult<()> {
        if self.name.is_none()
            && self.criticality.is_none()
            && self.description.is_none()
            && self.owner.is_none()
        {
            return Err(AppError::InvalidInput(
                "at least one field must be provided".to_string(),
            ));
        }
        if let Some(ref name) = self.name {
            require_non_blank("nombre", name)?;
        }
        if let Some(ref criticality) = self.criticality {
            require_non_blank("criticidad", criticality)?;
        }
        if let Some(ref owner) = self.owner {
            require_non_blank("responsable", owner)?;
        }
        Ok(())
    }
}

/// A plan with its versions.
#[derive(Debug, Serialize, ToSchema)]
pub struct PlanResponse {
    pub id: i32,
    #[serde(rename = "proyectoId")]
    pub project_id: i32,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "criticidad")]
    pub criticality: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "responsable")]
    pub owner: String,
    #[serde(rename = "creadoEn")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "actualizadoEn")]
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "versiones")]
    pub versions: Vec<VersionResponse>,
}

impl PlanResponse {
    pub fn new(plan: plan::Model, versions: Vec<version::Model>) -> Self {
        Self {
            id: plan.id,
            project_id: plan.project_id,
            name: plan.name,
            criticality: plan.criticality,
            description: plan.description,
            owner: plan.owner,
            created_at: plan.created_at,
            updated_at: plan.updated_at,
            versions: versions.into_iter().map(VersionResponse::from).collect(),
        }
    }
}
