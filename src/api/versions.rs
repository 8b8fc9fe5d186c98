//! Version API handlers.

use actix_web::{HttpResponse, web};
use chrono::Utc;
use tracing::info;

use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{CreateVersionRequest, VersionResponse};

/// List the versions of a plan.
#[utoipa::path(
    get,
    path = "/planes/{planId}/versiones",
    tag = "Versions",
    params(("planId" = i32, Path, description = "Plan ID")),
    responses(
        (status = 200, description = "Versions of the plan", body = [VersionResponse]),
        (status = 404, description = "Plan not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn list_versions(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let plan_id = path.into_inner();
    if pool.get_plan_by_id(plan_id).await?.is_none() {
        return Err(AppError::not_found("Plan", plan_id));
    }

    let versions: Vec<VersionResponse> = pool
        .list_versions_for_plan(plan_id)
        .await?
        .into_iter()
        .map(VersionResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(versions))
}

/// Create a version of a plan.
#[utoipa::path(
    post,
    path = "/planes/{planId}/versiones",
    tag = "Versions",
    params(("planId" = i32, Path, description = "Plan ID")),
    request_body = CreateVersionRequest,
    responses(
        (status = 201, description = "Version created", body = VersionResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 404, description = "Plan not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn create_version(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    body: web::Json<CreateVersionRequest>,
) -> AppResult<HttpResponse> {
    let plan_id = path.into_inner();
    let req = body.into_inner();
    req.validate(Utc::now())?;

    let version = pool.insert_version(plan_id, req).await?;
    info!(
        "Version created: id={}, plan_id={}, name={}",
        version.id, plan_id, version.name
    );

    Ok(HttpResponse::Created().json(VersionResponse::from(version)))
}

/// Get a single version.
#[utoipa::path(
    get,
    path = "/versiones/{versionId}",
    tag = "Versions",
    params(("versionId" = i32, Path, description = "Version ID")),
    responses(
        (status = 200, description = "Version", body = VersionResponse),
        (status = 404, description = "Version not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn get_version(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let version = pool
        .get_version_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Version", id))?;

    Ok(HttpResponse::Ok().json(VersionResponse::from(version)))
}

/// Configure version routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/planes/{planId}/versiones")
            .route(web::get().to(list_versions))
            .route(web::post().to(create_version)),
    )
    .service(web::resource("/versiones/{versionId}").route(web::get().to(get_version)));
}
