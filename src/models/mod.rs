//! Request and response DTOs for the QA test manager API.
//!
//! JSON field names follow the wire contract of the web UI (Spanish
//! camelCase: `nombre`, `fechaInicio`, `resultadoEsperado`, ...).

pub mod dates;
pub mod evidence;
pub mod execution;
pub mod plan;
pub mod project;
pub mod test_case;
pub mod version;

// Re-export commonly used types
pub use evidence::EvidenceResponse;
pub use execution::{CreateExecutionRequest, ExecutionResponse};
pub use plan::{CreatePlanForProjectRequest, CreatePlanRequest, PlanResponse, UpdatePlanRequest};
pub use project::{CreateProjectRequest, ProjectResponse};
pub use test_case::{CreateTestCaseRequest, DeleteTestCaseResponse, TestCaseResponse};
pub use version::{CreateVersionRequest, VersionResponse};

use crate::error::{AppError, AppResult};

/// Reject empty or whitespace-only values of a required text field.
pub(crate) fn require_non_blank(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::InvalidInput(format!("{} is required", field)));
    }
    Ok(())
}

/// Reject negative minute counts.
pub(crate) fn require_non_negative(field: &str, value: i32) -> AppResult<()> {
    if value < 0 {
        return Err(AppError::InvalidInput(format!(
            "{} must not be negative",
            field
        )));
    }
    Ok(())
}
