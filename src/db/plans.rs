//! Database queries for test plans.
//!
//! A plan is never visible without a version: [`DbPool::create_plan_with_initial_version`]
//! inserts the plan and its "Versión Inicial" in a single transaction.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use tracing::warn;

use crate::entity::plan::{self, ActiveModel, Entity as Plan};
use crate::entity::project::Entity as Project;
use crate::entity::version::{self, Entity as Version};
use crate::error::{AppError, AppResult};
use crate::models::{CreatePlanRequest, UpdatePlanRequest};

use super::DbPool;

/// Name of the version created together with every plan.
pub const INITIAL_VERSION_NAME: &str = "Versión Inicial";

impl DbPool {
    /// Create a plan under `project_id` together with its initial version.
    ///
    /// Both rows are committed or neither is. Returns `NotFound` when the
    /// project does not exist.
    pub async fn create_plan_with_initial_version(
        &self,
        project_id: i32,
        req: CreatePlanRequest,
    ) -> AppResult<(plan::Model, version::Model)> {
        let txn = self
            .connection()
            .begin()
            .await
            .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

        match insert_plan_and_initial_version(&txn, project_id, req).await {
            Ok(created) => {
                txn.commit().await.map_err(|e| {
                    AppError::Database(format!("Failed to commit plan creation: {}", e))
                })?;
                Ok(created)
            }
            Err(err) => {
                if let Err(e) = txn.rollback().await {
                    warn!("Failed to roll back plan creation: {}", e);
                }
                Err(err)
            }
        }
    }

    /// List the plans of a project with their versions.
    pub async fn list_plans_for_project(
        &self,
        project_id: i32,
    ) -> AppResult<Vec<(plan::Model, Vec<version::Model>)>> {
        let plans = Plan::find()
            .filter(plan::Column::ProjectId.eq(project_id))
            .order_by_asc(plan::Column::Id)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list plans: {}", e)))?;

        self.attach_versions(plans).await
    }

    /// List every plan with its versions.
    pub async fn list_all_plans(&self) -> AppResult<Vec<(plan::Model, Vec<version::Model>)>> {
        let plans = Plan::find()
            .order_by_asc(plan::Column::Id)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list plans: {}", e)))?;

        self.attach_versions(plans).await
    }

    /// Get a plan by ID.
    pub async fn get_plan_by_id(&self, id: i32) -> AppResult<Option<plan::Model>> {
        let result = Plan::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get plan: {}", e)))?;

        Ok(result)
    }

    /// Get a plan with its versions.
    pub async fn get_plan_with_versions(
        &self,
        id: i32,
    ) -> AppResult<Option<(plan::Model, Vec<version::Model>)>> {
        let Some(plan) = self.get_plan_by_id(id).await? else {
            return Ok(None);
        };
        let versions = self.list_versions_for_plan(plan.id).await?;
        Ok(Some((plan, versions)))
    }

    /// Update the descriptive fields of a plan. `None` fields are left unchanged.
    pub async fn update_plan(&self, id: i32, req: UpdatePlanRequest) -> AppResult<plan::Model> {
        let plan = self
            .get_plan_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Plan", id))?;

        let mut active: ActiveModel = plan.into();
        if let Some(name) = req.name {
            active.name = Set(name);
        }
        if let Some(criticality) = req.criticality {
            active.criticality = Set(criticality);
        }
        if let Some(description) = req.description {
            active.description = Set(description);
        }
        if let Some(owner) = req.owner {
            active.owner = Set(owner);
        }
        active.updated_at = Set(Utc::now());

        let result = active
            .update(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to update plan: {}", e)))?;

        Ok(result)
    }

    /// Pair each plan with its versions using one batch query.
    async fn attach_versions(
        &self,
        plans: Vec<plan::Model>,
    ) -> AppResult<Vec<(plan::Model, Vec<version::Model>)>> {
        if plans.is_empty() {
            return Ok(vec![]);
        }

        let plan_ids: Vec<i32> = plans.iter().map(|p| p.id).collect();
        let versions = Version::find()
            .filter(version::Column::PlanId.is_in(plan_ids))
            .order_by_asc(version::Column::Id)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list plan versions: {}", e)))?;

        let mut by_plan: HashMap<i32, Vec<version::Model>> = HashMap::new();
        for v in versions {
            by_plan.entry(v.plan_id).or_default().push(v);
        }

        Ok(plans
            .into_iter()
            .map(|p| {
                let versions = by_plan.remove(&p.id).unwrap_or_default();
                (p, versions)
            })
            .collect())
    }
}

async fn insert_plan_and_initial_version(
    txn: &DatabaseTransaction,
    project_id: i32,
    req: CreatePlanRequest,
) -> AppResult<(plan::Model, version::Model)> {
    let project = Project::find_by_id(project_id)
        .one(txn)
        .await
        .map_err(|e| AppError::Database(format!("Failed to get project: {}", e)))?;
    if project.is_none() {
        return Err(AppError::not_found("Project", project_id));
    }

    let now = Utc::now();

    let plan = ActiveModel {
        project_id: Set(project_id),
        name: Set(req.name),
        criticality: Set(req.criticality),
        description: Set(req.description),
        owner: Set(req.owner),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(txn)
    .await
    .map_err(|e| AppError::Database(format!("Failed to insert plan: {}", e)))?;

    let version = version::ActiveModel {
        plan_id: Set(plan.id),
        name: Set(INITIAL_VERSION_NAME.to_string()),
        start_date: Set(now),
        end_date: Set(None),
        ..Default::default()
    }
    .insert(txn)
    .await
    .map_err(|e| AppError::Database(format!("Failed to insert initial version: {}", e)))?;

    Ok((plan, version))
}
