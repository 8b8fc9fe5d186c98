//! Database queries for plan versions.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::entity::version::{self, ActiveModel, Entity as Version};
use crate::error::{AppError, AppResult};
use crate::models::CreateVersionRequest;

use super::DbPool;

impl DbPool {
    /// Insert a version under an existing plan. The start date defaults to now.
    pub async fn insert_version(
        &self,
        plan_id: i32,
        req: CreateVersionRequest,
    ) -> AppResult<version::Model> {
        if self.get_plan_by_id(plan_id).await?.is_none() {
            return Err(AppError::not_found("Plan", plan_id));
        }

        let model = ActiveModel {
            plan_id: Set(plan_id),
            name: Set(req.name),
            start_date: Set(req.start_date.unwrap_or_else(Utc::now)),
            end_date: Set(req.end_date),
            ..Default::default()
        };

        let result = model
            .insert(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert version: {}", e)))?;

        Ok(result)
    }

    /// List the versions of a plan.
    pub async fn list_versions_for_plan(&self, plan_id: i32) -> AppResult<Vec<version::Model>> {
        let result = Version::find()
            .filter(version::Column::PlanId.eq(plan_id))
            .order_by_asc(version::Column::Id)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list versions: {}", e)))?;

        Ok(result)
    }

    /// Get a version by ID.
    pub async fn get_version_by_id(&self, id: i32) -> AppResult<Option<version::Model>> {
        let result = Version::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get version: {}", e)))?;

        Ok(result)
    }
}
