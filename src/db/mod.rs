//! Database module providing connection management, migrations, and queries.
//!
//! Each submodule adds an `impl DbPool` block with the operations of one entity.

pub mod evidence;
pub mod executions;
pub mod plans;
pub mod projects;
pub mod test_cases;
pub mod versions;

use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use sea_orm_migration::MigratorTrait;
use tracing::{info, warn};

use crate::config::DatabaseSettings;
use crate::error::{AppError, AppResult};
use crate::migration::Migrator;

/// Database connection pool wrapper.
///
/// Cloning is cheap: the underlying SeaORM connection is a shared pool.
#[derive(Clone)]
pub struct DbPool {
    conn: DatabaseConnection,
}

/// Whether the URL names an in-memory SQLite database.
fn is_sqlite_memory(url: &str) -> bool {
    url.starts_with("sqlite:") && (url.contains(":memory:") || url.contains("mode=memory"))
}

/// Pool size limits to connect with.
///
/// Every connection to an in-memory SQLite database opens its own empty
/// database, so such URLs are held to a single connection.
fn pool_limits(settings: &DatabaseSettings) -> (u32, u32) {
    if is_sqlite_memory(&settings.url) {
        if settings.max_connections != 1 {
            warn!(
                "In-memory SQLite database, using 1 connection instead of {}",
                settings.max_connections
            );
        }
        return (1, 1);
    }
    (
        settings.max_connections,
        settings.min_connections.min(settings.max_connections),
    )
}

impl DbPool {
    /// Connect to the database described by `settings`.
    pub async fn new(settings: &DatabaseSettings) -> AppResult<Self> {
        let (max_connections, min_connections) = pool_limits(settings);
        let mut options = ConnectOptions::new(settings.url.clone());
        options
            .max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        let conn = Database::connect(options)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to database: {}", e)))?;

        info!(
            "Database pool ready (backend={:?}, max_connections={})",
            conn.get_database_backend(),
            max_connections
        );

        Ok(Self { conn })
    }

    /// Get the underlying connection for executing queries.
    pub fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }

    /// Apply all pending schema migrations.
    pub async fn run_migrations(&self) -> AppResult<()> {
        Migrator::up(&self.conn, None)
            .await
            .map_err(|e| AppError::Database(format!("Failed to run migrations: {}", e)))
    }

    /// Round-trip a trivial query to verify connectivity.
    pub async fn ping(&self) -> AppResult<()> {
        let backend = self.conn.get_database_backend();
        let stmt = Statement::from_string(backend, "SELECT 1".to_owned());
        self.conn
            .query_one_raw(stmt)
            .await
            .map_err(|e| AppError::Database(format!("Database ping failed: {}", e)))?;
        Ok(())
    }
}
