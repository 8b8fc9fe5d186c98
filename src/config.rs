//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

/// Development default values - NEVER use in production.
pub mod defaults {
    pub const DEV_DATABASE_URL: &str = "postgres://qa:qa@localhost:5432/qa_tests";
    pub const DEV_HOST: &str = "127.0.0.1";
    pub const DEV_PORT: u16 = 3001;
    pub const DEV_DB_MAX_CONNECTIONS: u32 = 10;
    pub const DEV_DB_MIN_CONNECTIONS: u32 = 1;
    pub const DEV_UPLOAD_DIR: &str = "uploads";
    pub const DEV_MAX_EVIDENCE_SIZE: usize = 5 * 1024 * 1024; // 5MB per image
    pub const DEV_CORS_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";
}

/// Runtime environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Parse environment from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Some(Self::Development),
            "production" | "prod" => Some(Self::Production),
            _ => None,
        }
    }

    /// Check if this is a development environment.
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    /// Check if this is a production environment.
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

/// Database connection settings.
#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    /// Connection URL (`postgres://...` or `sqlite:...`)
    pub url: String,
    /// Upper bound of pooled connections
    pub max_connections: u32,
    /// Connections kept open while idle
    pub min_connections: u32,
}

/// Evidence upload settings.
#[derive(Debug, Clone)]
pub struct UploadSettings {
    /// Directory evidence images are written to and served from
    pub dir: PathBuf,
    /// Maximum size of a single evidence image in bytes
    pub max_evidence_size: usize,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Runtime environment
    pub environment: Environment,
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database settings
    pub database: DatabaseSettings,
    /// Evidence upload settings
    pub uploads: UploadSettings,
    /// Directory for static frontend assets (optional)
    pub static_dir: Option<PathBuf>,
    /// Origins allowed by CORS
    pub cors_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// In development mode (RUST_ENV=development) every variable has a default
    /// and only RUST_ENV is required. In production mode the server will NOT
    /// start if DATABASE_URL still points at the development default.
    ///
    /// Environment variables:
    /// - `RUST_ENV`: Environment (development/production) - REQUIRED
    /// - `QATM_HOST`: Server host (default: 127.0.0.1)
    /// - `QATM_PORT`: Server port (default: 3001)
    /// - `DATABASE_URL`: PostgreSQL or SQLite connection string
    /// - `QATM_DB_MAX_CONNECTIONS`: Pool size upper bound (default: 10)
    /// - `QATM_DB_MIN_CONNECTIONS`: Idle pool size (default: 1)
    /// - `QATM_UPLOAD_DIR`: Evidence directory (default: ./uploads)
    /// - `QATM_MAX_EVIDENCE_SIZE`: Max evidence image size in bytes (default: 5MB)
    /// - `QATM_STATIC_DIR`: Static frontend assets directory
    /// - `QATM_CORS_ORIGINS`: Comma separated list of allowed origins
    pub fn from_env() -> Result<Self, ConfigError> {
        let env_str = env::var("RUST_ENV").map_err(|_| ConfigError::MissingEnvVar("RUST_ENV"))?;

        let environment = Environment::parse(&env_str).ok_or(ConfigError::InvalidValue(
            "RUST_ENV must be 'development' or 'production'",
        ))?;

        let host = env::var("QATM_HOST").unwrap_or_else(|_| defaults::DEV_HOST.to_string());

        let port = env::var("QATM_PORT")
            .unwrap_or_else(|_| defaults::DEV_PORT.to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidValue("QATM_PORT must be a valid port number"))?;

        let database = DatabaseSettings {
            url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| defaults::DEV_DATABASE_URL.to_string()),
            max_connections: env::var("QATM_DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| defaults::DEV_DB_MAX_CONNECTIONS.to_string())
                .parse::<u32>()
                .map_err(|_| {
                    ConfigError::InvalidValue("QATM_DB_MAX_CONNECTIONS must be a valid number")
                })?,
            min_connections: env::var("QATM_DB_MIN_CONNECTIONS")
                .unwrap_or_else(|_| defaults::DEV_DB_MIN_CONNECTIONS.to_string())
                .parse::<u32>()
                .map_err(|_| {
                    ConfigError::InvalidValue("QATM_DB_MIN_CONNECTIONS must be a valid number")
                })?,
        };

        let uploads = UploadSettings {
            dir: PathBuf::from(
                env::var("QATM_UPLOAD_DIR").unwrap_or_else(|_| defaults::DEV_UPLOAD_DIR.to_string()),
            ),
            max_evidence_size: env::var("QATM_MAX_EVIDENCE_SIZE")
                .unwrap_or_else(|_| defaults::DEV_MAX_EVIDENCE_SIZE.to_string())
                .parse::<usize>()
                .map_err(|_| {
                    ConfigError::InvalidValue("QATM_MAX_EVIDENCE_SIZE must be a valid number")
                })?,
        };

        let static_dir = env::var("QATM_STATIC_DIR").ok().map(PathBuf::from);

        let cors_origins = match env::var("QATM_CORS_ORIGINS") {
            Ok(list) => parse_origin_list(&list),
            Err(_) if environment.is_development() => parse_origin_list(defaults::DEV_CORS_ORIGINS),
            Err(_) => Vec::new(),
        };

        let config = Config {
            environment,
            host,
            port,
            database,
            uploads,
            static_dir,
            cors_origins,
        };

        if environment.is_production() {
            config.validate_production()?;
        }

        Ok(config)
    }

    /// Validate that production configuration does not use development defaults.
    fn validate_production(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.database.url == defaults::DEV_DATABASE_URL {
            errors.push(format!(
                "DATABASE_URL is using development default '{}'. Set a production PostgreSQL URL.",
                defaults::DEV_DATABASE_URL
            ));
        }

        if self.database.min_connections > self.database.max_connections {
            errors.push(format!(
                "QATM_DB_MIN_CONNECTIONS ({}) exceeds QATM_DB_MAX_CONNECTIONS ({})",
                self.database.min_connections, self.database.max_connections
            ));
        }

        if self.uploads.max_evidence_size == 0 {
            errors.push("QATM_MAX_EVIDENCE_SIZE must be greater than zero".to_string());
        }

        if !errors.is_empty() {
            return Err(ConfigError::ProductionValidation(errors));
        }

        Ok(())
    }

    /// Get the server bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check if running in development mode.
    pub fn is_development(&self) -> bool {
        self.environment.is_development()
    }
}

fn parse_origin_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(&'static str),

    #[error("Production configuration validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    ProductionValidation(Vec<String>),
}
