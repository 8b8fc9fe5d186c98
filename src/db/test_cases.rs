//! Database queries for test cases.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

use tracing::warn;

use crate::entity::evidence::{self, Entity as Evidence};
use crate::entity::execution::{self, Entity as Execution};
use crate::entity::test_case::{self, ActiveModel, Entity as TestCase};
use crate::error::{AppError, AppResult};
use crate::models::CreateTestCaseRequest;
use crate::models::test_case::DEFAULT_ESTIMATE_MINUTES;

use super::DbPool;

impl DbPool {
    /// Insert a test case under an existing version.
    pub async fn insert_test_case(
        &self,
        version_id: i32,
        req: CreateTestCaseRequest,
    ) -> AppResult<test_case::Model> {
        if self.get_version_by_id(version_id).await?.is_none() {
            return Err(AppError::not_found("Version", version_id));
        }

        let model = ActiveModel {
            version_id: Set(version_id),
            title: Set(req.title),
            steps: Set(req.steps),
            expected_result: Set(req.expected_result),
            priority: Set(req.priority),
            estimate_minutes: Set(req.estimate_minutes.unwrap_or(DEFAULT_ESTIMATE_MINUTES)),
            assignee: Set(req.assignee),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let result = model
            .insert(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert test case: {}", e)))?;

        Ok(result)
    }

    /// List the test cases of a version.
    pub async fn list_test_cases_for_version(
        &self,
        version_id: i32,
    ) -> AppResult<Vec<test_case::Model>> {
        let result = TestCase::find()
            .filter(test_case::Column::VersionId.eq(version_id))
            .order_by_asc(test_case::Column::Id)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list test cases: {}", e)))?;

        Ok(result)
    }

    /// Get a test case by ID.
    pub async fn get_test_case_by_id(&self, id: i32) -> AppResult<Option<test_case::Model>> {
        let result = TestCase::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get test case: {}", e)))?;

        Ok(result)
    }

    /// Delete a test case with its executions and their evidence rows.
    ///
    /// Returns the URLs of the evidence files that belonged to the removed
    /// rows so the caller can delete them from storage.
    pub async fn delete_test_case(&self, id: i32) -> AppResult<Vec<String>> {
        let txn = self
            .connection()
            .begin()
            .await
            .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

        match delete_test_case_tree(&txn, id).await {
            Ok(urls) => {
                txn.commit().await.map_err(|e| {
                    AppError::Database(format!("Failed to commit test case deletion: {}", e))
                })?;
                Ok(urls)
            }
            Err(err) => {
                if let Err(e) = txn.rollback().await {
                    warn!("Failed to roll back test case deletion: {}", e);
                }
                Err(err)
            }
        }
    }
}

async fn delete_test_case_tree(txn: &DatabaseTransaction, id: i32) -> AppResult<Vec<String>> {
    // Row locks hold off concurrent executions and evidence inserts, whose
    // foreign key checks need these rows, until the deletion commits.
    let case = TestCase::find_by_id(id)
        .lock_exclusive()
        .one(txn)
        .await
        .map_err(|e| AppError::Database(format!("Failed to get test case: {}", e)))?
        .ok_or_else(|| AppError::not_found("Test case", id))?;

    let execution_ids: Vec<i32> = Execution::find()
        .select_only()
        .column(execution::Column::Id)
        .filter(execution::Column::TestCaseId.eq(case.id))
        .lock_exclusive()
        .into_tuple()
        .all(txn)
        .await
        .map_err(|e| AppError::Database(format!("Failed to list executions: {}", e)))?;

    let mut urls = Vec::new();
    if !execution_ids.is_empty() {
        urls = Evidence::find()
            .select_only()
            .column(evidence::Column::Url)
            .filter(evidence::Column::ExecutionId.is_in(execution_ids.clone()))
            .into_tuple()
            .all(txn)
            .await
            .map_err(|e| AppError::Database(format!("Failed to list evidence: {}", e)))?;

        Evidence::delete_many()
            .filter(evidence::Column::ExecutionId.is_in(execution_ids))
            .exec(txn)
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete evidence: {}", e)))?;

        Execution::delete_many()
            .filter(execution::Column::TestCaseId.eq(case.id))
            .exec(txn)
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete executions: {}", e)))?;
    }

    TestCase::delete_by_id(case.id)
        .exec(txn)
        .await
        .map_err(|e| AppError::Database(format!("Failed to delete test case: {}", e)))?;

    Ok(urls)
}
