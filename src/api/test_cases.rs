//! Test case API handlers.

use actix_web::{HttpResponse, web};
use tracing::{info, warn};

use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{CreateTestCaseRequest, DeleteTestCaseResponse, TestCaseResponse};
use crate::services::EvidenceStore;

/// List the test cases of a version.
#[utoipa::path(
    get,
    path = "/versiones/{versionId}/casos",
    tag = "Test Cases",
    params(("versionId" = i32, Path, description = "Version ID")),
    responses(
        (status = 200, description = "Test cases of the version", body = [TestCaseResponse]),
        (status = 404, description = "Version not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn list_test_cases(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let version_id = path.into_inner();
    if pool.get_version_by_id(version_id).await?.is_none() {
        return Err(AppError::not_found("Version", version_id));
    }

    let cases: Vec<TestCaseResponse> = pool
        .list_test_cases_for_version(version_id)
        .await?
        .into_iter()
        .map(TestCaseResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(cases))
}

/// Create a test case in a version.
#[utoipa::path(
    post,
    path = "/versiones/{versionId}/casos",
    tag = "Test Cases",
    params(("versionId" = i32, Path, description = "Version ID")),
    request_body = CreateTestCaseRequest,
    responses(
        (status = 201, description = "Test case created", body = TestCaseResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 404, description = "Version not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn create_test_case(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    body: web::Json<CreateTestCaseRequest>,
) -> AppResult<HttpResponse> {
    let version_id = path.into_inner();
    let req = body.into_inner();
    req.validate()?;

    let case = pool.insert_test_case(version_id, req).await?;
    info!(
        "Test case created: id={}, version_id={}, title={}",
        case.id, version_id, case.title
    );

    Ok(HttpResponse::Created().json(TestCaseResponse::from(case)))
}

/// Delete a test case with its executions and evidence.
///
/// Evidence files are removed from disk after the rows are gone; a file that
/// cannot be removed is logged and left behind.
#[utoipa::path(
    delete,
    path = "/casos/{id}",
    tag = "Test Cases",
    params(("id" = i32, Path, description = "Test case ID")),
    responses(
        (status = 200, description = "Test case deleted", body = DeleteTestCaseResponse),
        (status = 404, description = "Test case not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn delete_test_case(
    pool: web::Data<DbPool>,
    store: web::Data<EvidenceStore>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let urls = pool.delete_test_case(id).await?;

    for url in &urls {
        if let Err(e) = store.remove_by_url(url).await {
            warn!("Failed to remove evidence file {}: {}", url, e);
        }
    }

    info!(
        "Test case deleted: id={}, evidence_files={}",
        id,
        urls.len()
    );

    Ok(HttpResponse::Ok().json(DeleteTestCaseResponse {
        message: "Caso de prueba eliminado".to_string(),
        id,
    }))
}

/// Configure test case routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/versiones/{versionId}/casos")
            .route(web::get().to(list_test_cases))
            .route(web::post().to(create_test_case)),
    )
    .service(web::resource("/casos/{id}").route(web::delete().to(delete_test_case)));
}
