//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::{api, error, models};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "QA Test Manager API",
        version = "0.1.0",
        description = "Manage QA projects, test plans and their versions, test cases, executions and evidence images"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    paths(
        // Health endpoints
        api::health::root,
        api::health::health,
        api::health::ready,
        // Project endpoints
        api::projects::list_projects,
        api::projects::create_project,
        api::projects::get_project,
        // Plan endpoints
        api::plans::list_project_plans,
        api::plans::create_project_plan,
        api::plans::list_plans,
        api::plans::create_plan_from_body,
        api::plans::get_plan,
        api::plans::update_plan,
        // Version endpoints
        api::versions::list_versions,
        api::versions::create_version,
        api::versions::get_version,
        // Test case endpoints
        api::test_cases::list_test_cases,
        api::test_cases::create_test_case,
        api::test_cases::delete_test_case,
        // Execution endpoints
        api::executions::list_executions,
        api::executions::create_execution,
        // Evidence endpoints
        api::evidence::list_evidence,
        api::evidence::upload_evidence,
    ),
    components(
        schemas(
            // Common
            error::ErrorResponse,
            // Health
            api::health::HealthResponse,
            api::health::ReadyResponse,
            // Projects
            models::CreateProjectRequest,
            models::ProjectResponse,
            // Plans
            models::CreatePlanRequest,
            models::CreatePlanForProjectRequest,
            models::UpdatePlanRequest,
            models::PlanResponse,
            // Versions
            models::CreateVersionRequest,
            models::VersionResponse,
            // Test cases
            models::CreateTestCaseRequest,
            models::TestCaseResponse,
            models::DeleteTestCaseResponse,
            // Executions
            models::CreateExecutionRequest,
            models::ExecutionResponse,
            // Evidence
            models::EvidenceResponse,
            api::evidence::EvidenceUploadForm,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Projects", description = "Client projects"),
        (name = "Plans", description = "Test plans and their initial version"),
        (name = "Versions", description = "Plan versions"),
        (name = "Test Cases", description = "Test cases of a version"),
        (name = "Executions", description = "Recorded test runs"),
        (name = "Evidence", description = "Evidence image uploads")
    )
)]
pub struct ApiDoc;
