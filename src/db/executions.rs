//! Database queries for test executions.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::entity::evidence::{self, Entity as Evidence};
use crate::entity::execution::{self, ActiveModel, Entity as Execution};
use crate::error::{AppError, AppResult};
use crate::models::CreateExecutionRequest;

use super::DbPool;

impl DbPool {
    /// Record an execution of an existing test case. The date defaults to now.
    pub async fn insert_execution(
        &self,
        test_case_id: i32,
        req: CreateExecutionRequest,
    ) -> AppResult<execution::Model> {
        if self.get_test_case_by_id(test_case_id).await?.is_none() {
            return Err(AppError::not_found("Test case", test_case_id));
        }

        let model = ActiveModel {
            test_case_id: Set(test_case_id),
            user_id: Set(req.user_id),
            date: Set(req.date.unwrap_or_else(Utc::now)),
            status: Set(req.status),
            actual_time_minutes: Set(req.actual_time_minutes.unwrap_or(0)),
            notes: Set(req.notes),
            ..Default::default()
        };

        let result = model
            .insert(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert execution: {}", e)))?;

        Ok(result)
    }

    /// List the executions of a test case, each with its evidence.
    pub async fn list_executions_for_test_case(
        &self,
        test_case_id: i32,
    ) -> AppResult<Vec<(execution::Model, Vec<evidence::Model>)>> {
        let executions = Execution::find()
            .filter(execution::Column::TestCaseId.eq(test_case_id))
            .order_by_asc(execution::Column::Id)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list executions: {}", e)))?;

        if executions.is_empty() {
            return Ok(vec![]);
        }

        let execution_ids: Vec<i32> = executions.iter().map(|e| e.id).collect();
        let evidence = Evidence::find()
            .filter(evidence::Column::ExecutionId.is_in(execution_ids))
            .order_by_asc(evidence::Column::Id)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list evidence: {}", e)))?;

        let mut by_execution: HashMap<i32, Vec<evidence::Model>> = HashMap::new();
        for ev in evidence {
            by_execution.entry(ev.execution_id).or_default().push(ev);
        }

        Ok(executions
            .into_iter()
            .map(|e| {
                let evidence = by_execution.remove(&e.id).unwrap_or_default();
                (e, evidence)
            })
            .collect())
    }

    /// Get an execution by ID.
    pub async fn get_execution_by_id(&self, id: i32) -> AppResult<Option<execution::Model>> {
        let result = Execution::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get execution: {}", e)))?;

        Ok(result)
    }
}
