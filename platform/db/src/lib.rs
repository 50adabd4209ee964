//! Database primitives shared by the server binary and the product crates.

use std::time::Duration;

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, SqlErr, Statement,
};
use thiserror::Error;
use tracing::info;

/// Shared pooled connection alias.
pub type DbPool = DatabaseConnection;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("database url missing (set {0})")]
    MissingUrl(String),
    #[error("failed to connect to database: {0}")]
    Connect(#[source] DbErr),
}

pub type DbResult<T> = Result<T, DbError>;

/// Environment-driven pool settings.
#[derive(Clone, Debug)]
pub struct DatabaseSettings {
    env_key: String,
    url: Option<String>,
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            env_key: default_url_key(),
            url: None,
            max_connections: default_max_connections(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

fn default_url_key() -> String {
    "DATABASE_URL".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_connect_timeout_secs() -> u64 {
    5
}

impl DatabaseSettings {
    pub fn new(env_key: impl Into<String>) -> Self {
        Self {
            env_key: env_key.into(),
            ..Self::default()
        }
    }

    /// Settings pinned to an explicit url, bypassing the environment.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }

    /// Reads `DATABASE_URL`, `DB_MAX_CONNECTIONS` and `DB_CONNECT_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        let max_connections = std::env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or_else(default_max_connections);
        let connect_timeout_secs = std::env::var("DB_CONNECT_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or_else(default_connect_timeout_secs);
        Self {
            max_connections,
            connect_timeout_secs,
            ..Self::default()
        }
    }

    pub fn database_url(&self) -> DbResult<String> {
        if let Some(url) = &self.url {
            return Ok(url.clone());
        }
        std::env::var(&self.env_key).map_err(|_| DbError::MissingUrl(self.env_key.clone()))
    }

    fn connect_options(&self) -> DbResult<ConnectOptions> {
        let url = self.database_url()?;
        // Every connection to an in-memory sqlite url opens a fresh database.
        let max_connections = if url.contains(":memory:") {
            1
        } else {
            self.max_connections
        };
        let mut options = ConnectOptions::new(url);
        options
            .max_connections(max_connections)
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .sqlx_logging(false);
        Ok(options)
    }
}

/// Open the connection pool described by `settings`.
pub async fn connect(settings: &DatabaseSettings) -> DbResult<DbPool> {
    let options = settings.connect_options()?;
    let pool = Database::connect(options).await.map_err(DbError::Connect)?;
    info!(
        backend = ?pool.get_database_backend(),
        max_connections = settings.max_connections,
        "database pool ready"
    );
    Ok(pool)
}

/// Cheap liveness probe used by the health endpoint.
pub async fn ping(pool: &DbPool) -> bool {
    let backend = pool.get_database_backend();
    pool.execute(Statement::from_string(backend, "SELECT 1".to_string()))
        .await
        .is_ok()
}

/// True when the error is a unique index violation, on any supported backend.
pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
