//! API E2E test suite.
//!
//! Drives the full actix app against an in-memory SQLite database and a
//! temporary upload directory. No external services are needed.
//!
//! Run with: cargo test --test api_e2e

mod test_helpers;

mod test_executions;
mod test_projects;
mod test_test_cases;
mod test_versions;
