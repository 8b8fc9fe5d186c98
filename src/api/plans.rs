//! Test plan API handlers.
//!
//! Plans are created through two routes that share one transaction:
//! `POST /proyectos/{id}/planes` and `POST /planes` with `proyectoId` in the
//! body. Either way the plan comes back with its initial version.

use actix_web::{HttpResponse, web};
use tracing::info;

use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{
    CreatePlanForProjectRequest, CreatePlanRequest, PlanResponse, UpdatePlanRequest,
};

/// List the plans of a project, each with its versions.
#[utoipa::path(
    get,
    path = "/proyectos/{id}/planes",
    tag = "Plans",
    params(("id" = i32, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Plans of the project", body = [PlanResponse]),
        (status = 404, description = "Project not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn list_project_plans(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let project_id = path.into_inner();
    if pool.get_project_by_id(project_id).await?.is_none() {
        return Err(AppError::not_found("Project", project_id));
    }

    let plans: Vec<PlanResponse> = pool
        .list_plans_for_project(project_id)
        .await?
        .into_iter()
        .map(|(plan, versions)| PlanResponse::new(plan, versions))
        .collect();

    Ok(HttpResponse::Ok().json(plans))
}

/// Create a plan under a project.
#[utoipa::path(
    post,
    path = "/proyectos/{id}/planes",
    tag = "Plans",
    params(("id" = i32, Path, description = "Project ID")),
    request_body = CreatePlanRequest,
    responses(
        (status = 201, description = "Plan created with its initial version", body = PlanResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 404, description = "Project not found", body = crate::error::ErrorResponse),
        (status = 500, description = "Plan creation failed", body = crate::error::ErrorResponse),
    )
)]
pub async fn create_project_plan(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    body: web::Json<CreatePlanRequest>,
) -> AppResult<HttpResponse> {
    create_plan(&pool, path.into_inner(), body.into_inner()).await
}

/// List every plan.
#[utoipa::path(
    get,
    path = "/planes",
    tag = "Plans",
    responses(
        (status = 200, description = "All plans", body = [PlanResponse]),
    )
)]
pub async fn list_plans(pool: web::Data<DbPool>) -> AppResult<HttpResponse> {
    let plans: Vec<PlanResponse> = pool
        .list_all_plans()
        .await?
        .into_iter()
        .map(|(plan, versions)| PlanResponse::new(plan, versions))
        .collect();

    Ok(HttpResponse::Ok().json(plans))
}

/// Create a plan for the project named in the body.
#[utoipa::path(
    post,
    path = "/planes",
    tag = "Plans",
    request_body = CreatePlanForProjectRequest,
    responses(
        (status = 201, description = "Plan created with its initial version", body = PlanResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 404, description = "Project not found", body = crate::error::ErrorResponse),
        (status = 500, description = "Plan creation failed", body = crate::error::ErrorResponse),
    )
)]
pub async fn create_plan_from_body(
    pool: web::Data<DbPool>,
    body: web::Json<CreatePlanForProjectRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    create_plan(&pool, req.project_id, req.plan).await
}

/// Get a plan with its versions.
#[utoipa::path(
    get,
    path = "/planes/{id}",
    tag = "Plans",
    params(("id" = i32, Path, description = "Plan ID")),
    responses(
        (status = 200, description = "Plan", body = PlanResponse),
        (status = 404, description = "Plan not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn get_plan(pool: web::Data<DbPool>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let (plan, versions) = pool
        .get_plan_with_versions(id)
        .await?
        .ok_or_else(|| AppError::not_found("Plan", id))?;

    Ok(HttpResponse::Ok().json(PlanResponse::new(plan, versions)))
}

/// Update the descriptive fields of a plan.
#[utoipa::path(
    put,
    path = "/planes/{id}",
    tag = "Plans",
    params(("id" = i32, Path, description = "Plan ID")),
    request_body = UpdatePlanRequest,
    responses(
        (status = 200, description = "Updated plan", body = PlanResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 404, description = "Plan not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn update_plan(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    body: web::Json<UpdatePlanRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();
    req.validate()?;

    let plan = pool.update_plan(id, req).await?;
    let versions = pool.list_versions_for_plan(plan.id).await?;
    info!("Plan updated: id={}", plan.id);

    Ok(HttpResponse::Ok().json(PlanResponse::new(plan, versions)))
}

async fn create_plan(
    pool: &DbPool,
    project_id: i32,
    req: CreatePlanRequest,
) -> AppResult<HttpResponse> {
    req.validate()?;

    let (plan, version) = pool
        .create_plan_with_initial_version(project_id, req)
        .await?;
    info!(
        "Plan created: id={}, project_id={}, initial_version_id={}",
        plan.id, project_id, version.id
    );

    Ok(HttpResponse::Created().json(PlanResponse::new(plan, vec![version])))
}

/// Configure plan routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/proyectos/{id}/planes")
            .route(web::get().to(list_project_plans))
            .route(web::post().to(create_project_plan)),
    )
    .service(
        web::resource("/planes")
            .route(web::get().to(list_plans))
            .route(web::post().to(create_plan_from_body)),
    )
    .service(
        web::resource("/planes/{id}")
            .route(web::get().to(get_plan))
            .route(web::put().to(update_plan)),
    );
}
