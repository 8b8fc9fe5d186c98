//! Database queries for evidence rows.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::entity::evidence::{self, ActiveModel, Entity as Evidence};
use crate::error::{AppError, AppResult};

use super::DbPool;

impl DbPool {
    /// Record an already stored evidence file.
    pub async fn insert_evidence(
        &self,
        execution_id: i32,
        url: String,
        description: Option<String>,
    ) -> AppResult<evidence::Model> {
        let model = ActiveModel {
            execution_id: Set(execution_id),
            url: Set(url),
            description: Set(description),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let result = model
            .insert(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert evidence: {}", e)))?;

        Ok(result)
    }

    /// List the evidence of an execution.
    pub async fn list_evidence_for_execution(
        &self,
        execution_id: i32,
    ) -> AppResult<Vec<evidence::Model>> {
        let result = Evidence::find()
            .filter(evidence::Column::ExecutionId.eq(execution_id))
            .order_by_asc(evidence::Column::Id)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list evidence: {}", e)))?;

        Ok(result)
    }
}
