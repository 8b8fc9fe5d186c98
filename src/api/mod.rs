//! API endpoint modules.

pub mod evidence;
pub mod executions;
pub mod health;
pub mod openapi;
pub mod plans;
pub mod projects;
pub mod test_cases;
pub mod versions;

use actix_web::web;

use crate::error::AppError;

pub use health::configure_health_routes;
pub use openapi::ApiDoc;

/// Register every API route plus the extractor error handlers.
///
/// Malformed JSON bodies and non-numeric path ids are reported as
/// `InvalidInput` so they share the `{error, detalle}` body.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::InvalidInput(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| AppError::InvalidInput(err.to_string()).into()),
    )
    .configure(configure_health_routes)
    .configure(projects::configure_routes)
    .configure(plans::configure_routes)
    .configure(versions::configure_routes)
    .configure(test_cases::configure_routes)
    .configure(executions::configure_routes)
    .configure(evidence::configure_routes);
}
