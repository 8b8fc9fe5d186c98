//! SeaORM database migrations.

pub use sea_orm_migration::prelude::*;

mod m20251019_000001_create_projects;
mod m20251019_000002_create_plans;
mod m20251019_000003_create_versions;
mod m20251019_000004_create_test_cases;
mod m20251019_000005_create_executions;
mod m20251019_000006_create_evidence;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251019_000001_create_projects::Migration),
            Box::new(m20251019_000002_create_plans::Migration),
            Box::new(m20251019_000003_create_versions::Migration),
            Box::new(m20251019_000004_create_test_cases::Migration),
            Box::new(m20251019_000005_create_executions::Migration),
            Box::new(m20251019_000006_create_evidence::Migration),
        ]
    }
}
