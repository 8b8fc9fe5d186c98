//! Test execution API handlers.

use actix_web::{HttpResponse, web};
use tracing::info;

use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{CreateExecutionRequest, ExecutionResponse};

/// List the executions of a test case, each with its evidence.
#[utoipa::path(
    get,
    path = "/casos/{casoId}/ejecuciones",
    tag = "Executions",
    params(("casoId" = i32, Path, description = "Test case ID")),
    responses(
        (status = 200, description = "Executions of the test case", body = [ExecutionResponse]),
        (status = 404, description = "Test case not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn list_executions(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let test_case_id = path.into_inner();
    if pool.get_test_case_by_id(test_case_id).await?.is_none() {
        return Err(AppError::not_found("Test case", test_case_id));
    }

    let executions: Vec<ExecutionResponse> = pool
        .list_executions_for_test_case(test_case_id)
        .await?
        .into_iter()
        .map(|(execution, evidence)| ExecutionResponse::new(execution, evidence))
        .collect();

    Ok(HttpResponse::Ok().json(executions))
}

/// Record an execution of a test case.
#[utoipa::path(
    post,
    path = "/casos/{casoId}/ejecuciones",
    tag = "Executions",
    params(("casoId" = i32, Path, description = "Test case ID")),
    request_body = CreateExecutionRequest,
    responses(
        (status = 201, description = "Execution recorded", body = ExecutionResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 404, description = "Test case not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn create_execution(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    body: web::Json<CreateExecutionRequest>,
) -> AppResult<HttpResponse> {
    let test_case_id = path.into_inner();
    let req = body.into_inner();
    req.validate()?;

    let execution = pool.insert_execution(test_case_id, req).await?;
    info!(
        "Execution recorded: id={}, test_case_id={}, status={}",
        execution.id, test_case_id, execution.status
    );

    Ok(HttpResponse::Created().json(ExecutionResponse::new(execution, vec![])))
}

/// Configure execution routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/casos/{casoId}/ejecuciones")
            .route(web::get().to(list_executions))
            .route(web::post().to(create_execution)),
    );
}
