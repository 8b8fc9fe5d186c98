//! Version DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{dates, require_non_blank};
use crate::entity::version;
use crate::error::{AppError, AppResult};

/// Request body for `POST /planes/{planId}/versiones`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateVersionRequest {
    #[serde(rename = "nombre")]
    pub name: String,
    /// Defaults to the creation time.
    #[serde(
        rename = "fechaInicio",
        default,
        deserialize_with = "dates::deserialize_optional"
    )]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(
        rename = "fechaFin",
        default,
        deserialize_with = "dates::deserialize_optional"
    )]
    pub end_date: Option<DateTime<Utc>>,
}

impl CreateVersionRequest {
    /// `now` stands in for a missing start date when checking the range.
    pub fn validate(&self, now: DateTime<Utc>) -> AppResult<()> {
        require_non_blank("nombre", &self.name)?;
        let start = self.start_date.unwrap_or(now);
        if let Some(end) = self.end_date
            && end < start
        {
            return Err(AppError::InvalidInput(
                "fechaFin must not be earlier than fechaInicio".to_string(),
            ));
        }
        Ok(())
    }
}

/// A version as returned by the API.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct VersionResponse {
    pub id: i32,
    #[serde(rename = "planId")]
    pub plan_id: i32,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "fechaInicio")]
    pub start_date: DateTime<Utc>,
    #[serde(rename = "fechaFin")]
    pub end_date: Option<DateTime<Utc>>,
}

impl From<version::Model> for VersionResponse {
    fn from(m: version::Model) -> Self {
        Self {
            id: m.id,
            plan_id: m.plan_id,
            name: m.name,
            start_date: m.start_date,
            end_date: m.end_date,
        }
    }
}
