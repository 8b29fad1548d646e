use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use migration::MigratorTrait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

/// Connection settings for the embedded SQLite store.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub path: PathBuf,
    pub max_connections: u32,
    pub connect_timeout: Duration,
    pub acquire_timeout: Duration,
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/shared.db"),
            max_connections: 1,
            connect_timeout: Duration::from_secs(10),
            acquire_timeout: Duration::from_secs(10),
            sqlx_logging: false,
        }
    }
}

impl DatabaseConfig {
    pub fn from_share(cfg: &configs::ShareConfig) -> Self {
        Self {
            path: cfg.db_path.clone(),
            max_connections: cfg.max_connections,
            ..Self::default()
        }
    }

    pub fn for_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), ..Self::default() }
    }

    /// `mode=rwc` lets SQLite create the file on first open.
    pub fn url(&self) -> String {
        sqlite_url(&self.path)
    }
}

pub fn sqlite_url(path: &Path) -> String {
    format!("sqlite://{}?mode=rwc", path.display())
}

pub async fn connect_with_config(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new(cfg.url());
    opts.max_connections(cfg.max_connections)
        .min_connections(1)
        .connect_timeout(cfg.connect_timeout)
        .acquire_timeout(cfg.acquire_timeout)
        .sqlx_logging(cfg.sqlx_logging);
    let db = Database::connect(opts).await?;
    Ok(db)
}

pub async fn connect(path: impl Into<PathBuf>) -> anyhow::Result<DatabaseConnection> {
    connect_with_config(&DatabaseConfig::for_path(path)).await
}

/// Open the store and bring its schema up to date.
pub async fn connect_and_migrate(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let db = connect_with_config(cfg).await?;
    migration::Migrator::up(&db, None).await?;
    info!(path = %cfg.path.display(), "share store ready");
    Ok(db)
}
