//! Database queries for projects.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};

use crate::entity::project::{self, ActiveModel, Entity as Project};
use crate::error::{AppError, AppResult};
use crate::models::CreateProjectRequest;

use super::DbPool;

impl DbPool {
    /// Insert a new project. Projects are active unless told otherwise.
    pub async fn insert_project(&self, req: CreateProjectRequest) -> AppResult<project::Model> {
        let model = ActiveModel {
            name: Set(req.name),
            client: Set(req.client),
            owner: Set(req.owner),
            active: Set(req.active.unwrap_or(true)),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let result = model
            .insert(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert project: {}", e)))?;

        Ok(result)
    }

    /// List all projects, oldest first.
    pub async fn list_projects(&self) -> AppResult<Vec<project::Model>> {
        let result = Project::find()
            .order_by_asc(project::Column::Id)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list projects: {}", e)))?;

        Ok(result)
    }

    /// Get a project by ID.
    pub async fn get_project_by_id(&self, id: i32) -> AppResult<Option<project::Model>> {
        let result = Project::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get project: {}", e)))?;

        Ok(result)
    }
}
